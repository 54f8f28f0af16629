// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::Tag;
use crate::value::{Table, Value};

/// Writes `table` as a plain key/value table.
///
/// A table whose class is not registered lands here too and loses its class.
pub fn write(table: &Table, value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    if let Some(class) = table.class() {
        log::debug!("{:?} is not registered, writing it as a plain table", class);
    }
    context.inc_depth()?;
    context.ref_writer.record(value);
    let entries = table.entries();
    context.writer.write_u8(Tag::TABLE.into());
    context.writer.write_varuint64(entries.len() as u64);
    for (k, v) in &entries {
        super::write(k, context)?;
        super::write(v, context)?;
    }
    context.dec_depth();
    Ok(())
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    context.inc_depth()?;
    let table = Table::new();
    context.ref_reader.store(Value::Table(table.clone()));
    let pairs = context.reader.read_len()?;
    read_entries(&table, pairs, context)?;
    context.dec_depth();
    Ok(Value::Table(table))
}

/// Reads `pairs` key/value pairs into `table`.
///
/// The table is already visible to back-references, so entries may point
/// at it.
pub(crate) fn read_entries(
    table: &Table,
    pairs: usize,
    context: &mut ReadContext,
) -> Result<(), Error> {
    for _ in 0..pairs {
        let key = super::read(context)?;
        ensure!(
            !key.is_nil(),
            Error::corrupt_data(format!(
                "nil table key at offset {}",
                context.reader.get_cursor()
            ))
        );
        let value = super::read(context)?;
        table.set(key, value);
    }
    Ok(())
}
