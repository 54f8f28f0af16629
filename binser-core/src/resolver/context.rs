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

use crate::buffer::{Reader, Writer};
use crate::config::Config;
use crate::error::Error;
use crate::resolver::ref_resolver::{RefReader, RefWriter};
use crate::resolver::resource_resolver::ResourceResolver;
use crate::resolver::type_resolver::TypeResolver;

/// State of one serialize call.
///
/// Owns the output buffer and the reference table, so everything a failed
/// call produced is dropped with the context.
pub struct WriteContext<'se> {
    pub writer: Writer,
    pub ref_writer: RefWriter,
    type_resolver: &'se TypeResolver,
    resource_resolver: &'se ResourceResolver,
    max_depth: u32,
    current_depth: u32,
}

impl<'se> WriteContext<'se> {
    pub fn new(
        type_resolver: &'se TypeResolver,
        resource_resolver: &'se ResourceResolver,
        config: &Config,
    ) -> WriteContext<'se> {
        WriteContext {
            writer: Writer::default(),
            ref_writer: RefWriter::new(),
            type_resolver,
            resource_resolver,
            max_depth: config.max_depth(),
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn get_type_resolver(&self) -> &'se TypeResolver {
        self.type_resolver
    }

    #[inline(always)]
    pub fn get_resource_resolver(&self) -> &'se ResourceResolver {
        self.resource_resolver
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        check_depth(self.current_depth, self.max_depth)
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_bytes()
    }
}

/// State of one deserialize call.
pub struct ReadContext<'de, 'bf> {
    pub reader: Reader<'bf>,
    pub ref_reader: RefReader,
    type_resolver: &'de TypeResolver,
    resource_resolver: &'de ResourceResolver,
    max_depth: u32,
    current_depth: u32,
}

impl<'de, 'bf> ReadContext<'de, 'bf> {
    pub fn new(
        type_resolver: &'de TypeResolver,
        resource_resolver: &'de ResourceResolver,
        reader: Reader<'bf>,
        config: &Config,
    ) -> ReadContext<'de, 'bf> {
        ReadContext {
            reader,
            ref_reader: RefReader::new(),
            type_resolver,
            resource_resolver,
            max_depth: config.max_depth(),
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn get_type_resolver(&self) -> &'de TypeResolver {
        self.type_resolver
    }

    #[inline(always)]
    pub fn get_resource_resolver(&self) -> &'de ResourceResolver {
        self.resource_resolver
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        check_depth(self.current_depth, self.max_depth)
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

fn check_depth(current_depth: u32, max_depth: u32) -> Result<(), Error> {
    if current_depth > max_depth {
        return Err(Error::depth_exceed(format!(
            "Maximum nesting depth ({}) exceeded. Current depth: {}. \
            Consider increasing max_depth if this is expected.",
            max_depth, current_depth
        )));
    }
    Ok(())
}
