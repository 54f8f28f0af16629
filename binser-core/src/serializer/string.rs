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
use crate::serializer::Serializer;
use crate::types::Tag;

impl Serializer for String {
    const TAG: Tag = Tag::TEXT;

    fn write_data(&self, context: &mut WriteContext) {
        context.writer.write_len_prefixed(self.as_bytes());
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let bytes = context.reader.read_len_prefixed()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::corrupt_data(format!("string is not valid UTF-8: {}", e)))
    }
}
