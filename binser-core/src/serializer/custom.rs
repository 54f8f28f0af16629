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
use crate::resolver::type_resolver::TypeInfo;
use crate::types::Tag;
use crate::value::{Table, Value};

/// Writes an instance of a registered type: its wire name, then the
/// arguments produced by its encoder.
pub fn write(value: &Value, type_info: &TypeInfo, context: &mut WriteContext) -> Result<(), Error> {
    context.inc_depth()?;
    let ref_id = context.ref_writer.record(value);
    let harness = type_info.get_harness();
    let pending = harness.get_decode_fn().is_some();
    if pending {
        context.ref_writer.begin_pending(ref_id);
    }
    let args = match harness.get_encode_fn() {
        Some(encode) => encode(value)?,
        None => structural_args(value, type_info)?,
    };
    context.writer.write_u8(Tag::CUSTOM.into());
    context
        .writer
        .write_len_prefixed(type_info.get_name().as_bytes());
    context.writer.write_varuint64(args.len() as u64);
    for arg in &args {
        super::write(arg, context)?;
    }
    if pending {
        context.ref_writer.end_pending(ref_id);
    }
    context.dec_depth();
    Ok(())
}

fn structural_args(value: &Value, type_info: &TypeInfo) -> Result<Vec<Value>, Error> {
    let Value::Table(table) = value else {
        return Err(Error::unserializable_type(format!(
            "{} of type '{}' has no encoder",
            value.kind(),
            type_info.get_name()
        )));
    };
    Ok(table
        .entries()
        .into_iter()
        .flat_map(|(k, v)| [k, v])
        .collect())
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    context.inc_depth()?;
    let name = context.reader.read_len_prefixed()?;
    let name = std::str::from_utf8(name)
        .map_err(|e| Error::corrupt_data(format!("type name is not valid UTF-8: {}", e)))?;
    let type_info = context
        .get_type_resolver()
        .get_by_name(name)
        .ok_or_else(|| Error::unknown_type(name.to_owned()))?;
    let argc = context.reader.read_len()?;
    let value = match type_info.get_harness().get_decode_fn() {
        Some(decode) => {
            let ref_id = context.ref_reader.reserve();
            let mut args = Vec::with_capacity(argc.min(context.reader.remaining()));
            for _ in 0..argc {
                args.push(super::read(context)?);
            }
            let value = decode(args)?;
            context.ref_reader.fill(ref_id, value.clone());
            value
        }
        None => {
            ensure!(
                argc % 2 == 0,
                Error::corrupt_data(format!(
                    "type '{}' expects key/value pairs, got {} arguments",
                    name, argc
                ))
            );
            let table = Table::with_class(type_info.get_class().clone());
            context.ref_reader.store(Value::Table(table.clone()));
            super::table::read_entries(&table, argc / 2, context)?;
            Value::Table(table)
        }
    };
    context.dec_depth();
    Ok(value)
}
