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

//! File helpers over [`Binser`].
//!
//! A file holds nothing but concatenated encodings, so appending to a file
//! and reading it back yields every value ever written, in order.

use crate::binser::Binser;
use crate::error::Error;
use crate::value::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

impl Binser {
    /// Serializes `values` into the file at `path`, replacing its contents.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, values: &[Value]) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = self.serialize(values)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.write_all(&bytes)?;
        log::trace!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Serializes `values` onto the end of the file at `path`, creating it
    /// if missing.
    ///
    /// Nothing is written when serialization fails.
    pub fn append_file<P: AsRef<Path>>(&self, path: P, values: &[Value]) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = self.serialize(values)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(&bytes)?;
        log::trace!("appended {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Decodes every value stored in the file at `path`.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<(Vec<Value>, usize), Error> {
        let bytes = fs::read(path)?;
        self.deserialize(&bytes, 0)
    }
}
