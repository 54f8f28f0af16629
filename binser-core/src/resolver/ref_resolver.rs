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
use crate::error::Error;
use crate::types::Tag;
use crate::value::Value;
use std::collections::{HashMap, HashSet};

/// Reference writer for tracking shared references during serialization.
///
/// RefWriter maps object identities to reference ids in encounter order, so
/// that an object met a second time (including while it is still being
/// written, as in a cycle) is emitted as a back-reference instead of being
/// serialized again. Ids are assigned in exactly the order the decoder
/// materializes objects.
///
/// # Examples
///
/// ```rust
/// use binser_core::buffer::Writer;
/// use binser_core::resolver::ref_resolver::RefWriter;
/// use binser_core::value::{Table, Value};
///
/// let mut ref_writer = RefWriter::new();
/// let mut writer = Writer::default();
/// let table = Value::Table(Table::new());
///
/// // First encounter: nothing written, the table gets id 0
/// assert!(!ref_writer.try_write_ref(&mut writer, &table).unwrap());
/// ref_writer.record(&table);
///
/// // Second encounter: a back-reference is written
/// assert!(ref_writer.try_write_ref(&mut writer, &table).unwrap());
/// ```
#[derive(Default)]
pub struct RefWriter {
    /// Maps identities to reference ids
    refs: HashMap<usize, u32>,
    /// Next reference id to assign
    next_ref_id: u32,
    /// Ids of objects whose custom encoder output is still being written.
    /// Their decoder cannot hand out the object before all arguments are
    /// read, so a reference to them cannot be resolved.
    pending: HashSet<u32>,
    /// Keeps recorded objects alive for the whole call. Custom encoders may
    /// return temporaries, and a freed address must not be mistaken for an
    /// object seen earlier.
    held: Vec<Value>,
}

impl RefWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a back-reference if `value` was already recorded.
    ///
    /// Returns `Ok(true)` if a back-reference was written, `Ok(false)` if the
    /// value has no identity or is seen for the first time.
    pub fn try_write_ref(&mut self, writer: &mut Writer, value: &Value) -> Result<bool, Error> {
        let Some(identity) = value.identity() else {
            return Ok(false);
        };
        let Some(&ref_id) = self.refs.get(&identity) else {
            return Ok(false);
        };
        if self.pending.contains(&ref_id) {
            return Err(Error::unserializable_type(format!(
                "{} refers back to itself through the arguments of its custom encoder",
                value.kind()
            )));
        }
        writer.write_u8(Tag::BACKREF.into());
        writer.write_varuint32(self.next_ref_id - ref_id);
        Ok(true)
    }

    /// Assigns the next reference id to `value`.
    pub fn record(&mut self, value: &Value) -> u32 {
        let ref_id = self.next_ref_id;
        self.next_ref_id += 1;
        if let Some(identity) = value.identity() {
            self.refs.insert(identity, ref_id);
            self.held.push(value.clone());
        }
        ref_id
    }

    /// Marks `ref_id` as being built by a custom encoder.
    pub fn begin_pending(&mut self, ref_id: u32) {
        self.pending.insert(ref_id);
    }

    pub fn end_pending(&mut self, ref_id: u32) {
        self.pending.remove(&ref_id);
    }

    pub fn len(&self) -> u32 {
        self.next_ref_id
    }

    pub fn is_empty(&self) -> bool {
        self.next_ref_id == 0
    }
}

/// Reference reader for resolving shared references during deserialization.
///
/// Slot `i` holds the `i`-th table or custom object materialized in this
/// call. A slot is reserved before the object's contents are read and stays
/// empty until the object exists, which is when a custom decode function is
/// still waiting for its arguments.
///
/// # Examples
///
/// ```rust
/// use binser_core::resolver::ref_resolver::RefReader;
/// use binser_core::value::{Table, Value};
///
/// let mut ref_reader = RefReader::new();
/// let table = Value::Table(Table::new());
///
/// let ref_id = ref_reader.reserve();
/// ref_reader.fill(ref_id, table.clone());
///
/// let retrieved = ref_reader.get(ref_id).unwrap();
/// assert!(retrieved.raw_eq(&table));
/// ```
#[derive(Default)]
pub struct RefReader {
    refs: Vec<Option<Value>>,
}

impl RefReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next slot and returns its id.
    pub fn reserve(&mut self) -> u32 {
        let ref_id = self.refs.len() as u32;
        self.refs.push(None);
        ref_id
    }

    /// Reserves the next slot and stores `value` in it.
    pub fn store(&mut self, value: Value) -> u32 {
        let ref_id = self.refs.len() as u32;
        self.refs.push(Some(value));
        ref_id
    }

    pub fn fill(&mut self, ref_id: u32, value: Value) {
        if let Some(slot) = self.refs.get_mut(ref_id as usize) {
            *slot = Some(value);
        }
    }

    pub fn get(&self, ref_id: u32) -> Option<&Value> {
        self.refs.get(ref_id as usize)?.as_ref()
    }

    /// Reads a back-reference payload and resolves it.
    pub fn read_ref(&self, reader: &mut Reader) -> Result<Value, Error> {
        let distance = reader.read_varuint32()?;
        let next = self.refs.len() as u32;
        if distance == 0 || distance > next {
            return Err(Error::invalid_ref(format!(
                "back-reference distance {} with {} objects materialized",
                distance, next
            )));
        }
        let ref_id = next - distance;
        self.get(ref_id).cloned().ok_or_else(|| {
            Error::invalid_ref(format!("object {} is still under construction", ref_id))
        })
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
