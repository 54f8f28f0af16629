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

impl Serializer for i64 {
    const TAG: Tag = Tag::INT;

    fn write_data(&self, context: &mut WriteContext) {
        context.writer.write_varint64(*self);
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_varint64()
    }
}

impl Serializer for f64 {
    const TAG: Tag = Tag::FLOAT;

    fn write_data(&self, context: &mut WriteContext) {
        context.writer.write_f64(*self);
    }

    fn read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_f64()
    }
}
