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
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

/// Longest encoding of a 64-bit varint.
const MAX_VARINT64_BYTES: usize = 10;

#[derive(Default)]
pub struct Writer {
    pub(crate) bf: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Writer {
        Writer {
            bf: Vec::with_capacity(capacity),
        }
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn write_bytes(&mut self, v: &[u8]) -> usize {
        self.bf.extend_from_slice(v);
        v.len()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bf.push(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        // writing into a Vec never fails
        let _ = self.bf.write_f64::<LittleEndian>(value);
    }

    pub fn write_varint64(&mut self, value: i64) {
        let zigzag = ((value << 1) ^ (value >> 63)) as u64;
        self.write_varuint64(zigzag)
    }

    pub fn write_varuint32(&mut self, value: u32) {
        self.write_varuint64(value as u64)
    }

    pub fn write_varuint64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.bf.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.bf.push(value as u8);
    }

    /// Writes a varuint byte length followed by the raw bytes.
    pub fn write_len_prefixed(&mut self, bytes: &[u8]) {
        self.write_varuint64(bytes.len() as u64);
        self.write_bytes(bytes);
    }
}

/// Bounds-checked cursor over an input slice.
///
/// Every read past the end of the slice is reported as
/// [`Error::CorruptData`], which is how truncated input surfaces.
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    /// Creates a reader positioned at `cursor`.
    pub fn at(bf: &'a [u8], cursor: usize) -> Result<Reader<'a>, Error> {
        if cursor > bf.len() {
            return Err(Error::corrupt_data(format!(
                "start index {} is past the end of a {} byte input",
                cursor,
                bf.len()
            )));
        }
        Ok(Reader { bf, cursor })
    }

    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.bf.len()
    }

    pub fn slice_after_cursor(&self) -> &'a [u8] {
        &self.bf[self.cursor..]
    }

    #[inline(always)]
    fn check_bound(&self, n: usize) -> Result<(), Error> {
        if n > self.remaining() {
            return Err(Error::buffer_out_of_bound(self.cursor, n, self.bf.len()));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check_bound(1)?;
        let result = self.bf[self.cursor];
        self.cursor += 1;
        Ok(result)
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        self.check_bound(8)?;
        let result = LittleEndian::read_f64(self.slice_after_cursor());
        self.cursor += 8;
        Ok(result)
    }

    pub fn read_varuint64(&mut self) -> Result<u64, Error> {
        let start = self.cursor;
        let mut result = 0u64;
        for i in 0..MAX_VARINT64_BYTES {
            let b = self.read_u8()?;
            if i == MAX_VARINT64_BYTES - 1 && b > 0x01 {
                break;
            }
            result |= ((b & 0x7F) as u64) << (7 * i);
            if b < 0x80 {
                return Ok(result);
            }
        }
        self.cursor = start;
        Err(Error::corrupt_data(format!(
            "varint at offset {} overflows 64 bits",
            start
        )))
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let encoded = self.read_varuint64()?;
        Ok(((encoded >> 1) as i64) ^ -((encoded & 1) as i64))
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let start = self.cursor;
        let value = self.read_varuint64()?;
        u32::try_from(value).map_err(|_| {
            Error::corrupt_data(format!("varint at offset {} overflows 32 bits", start))
        })
    }

    /// Reads a varuint length or element count.
    ///
    /// Callers must not pre-allocate from it without clamping to
    /// [`Reader::remaining`]; the value comes straight from the input.
    pub fn read_len(&mut self) -> Result<usize, Error> {
        let len = self.read_varuint64()?;
        let len = usize::try_from(len)
            .map_err(|_| Error::corrupt_data(format!("length {} overflows usize", len)))?;
        Ok(len)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.check_bound(len)?;
        let s = &self.bf[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(s)
    }

    pub fn read_len_prefixed(&mut self) -> Result<&'a [u8], Error> {
        let len = self.read_len()?;
        self.read_bytes(len)
    }
}
