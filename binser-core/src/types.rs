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
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Leading byte of every encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum Tag {
    NIL = 0,
    BOOL = 1,
    // zigzag varint64
    INT = 2,
    // little-endian f64
    FLOAT = 3,
    TEXT = 4,
    TABLE = 5,
    CUSTOM = 6,
    RESOURCE = 7,
    // distance back from the next free reference slot
    BACKREF = 8,
}

impl Tag {
    #[inline(always)]
    pub fn from_byte(byte: u8) -> Result<Tag, Error> {
        Tag::try_from(byte)
            .map_err(|_| Error::corrupt_data(format!("unknown tag 0x{:02x}", byte)))
    }
}
