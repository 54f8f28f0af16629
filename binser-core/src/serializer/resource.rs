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

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::Tag;
use crate::value::Value;

pub fn write(name: &str, context: &mut WriteContext) {
    context.writer.write_u8(Tag::RESOURCE.into());
    context.writer.write_len_prefixed(name.as_bytes());
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    let name = context.reader.read_len_prefixed()?;
    let name = std::str::from_utf8(name)
        .map_err(|e| Error::corrupt_data(format!("resource name is not valid UTF-8: {}", e)))?;
    context
        .get_resource_resolver()
        .get(name)
        .cloned()
        .ok_or_else(|| Error::unknown_resource(name.to_owned()))
}
