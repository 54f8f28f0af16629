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

use binser_core::buffer::{Reader, Writer};

#[test]
fn test_varint64() {
    let test_data: Vec<i64> = vec![
        0,
        1,
        -1,
        63,
        -64,
        // first values needing 2 bytes after zigzag
        64,
        -65,
        8_191,
        -8_192,
        1_000_000,
        -1_000_000,
        i32::MAX as i64,
        i32::MIN as i64,
        i64::MAX,
        i64::MIN,
    ];
    for &data in &test_data {
        let mut writer = Writer::default();
        writer.write_varint64(data);
        let binding = writer.dump();
        let mut reader = Reader::new(binding.as_slice());
        assert_eq!(reader.read_varint64().unwrap(), data);
        assert!(reader.is_exhausted());
    }
}

#[test]
fn test_varuint64() {
    let test_data: Vec<u64> = vec![
        // 1 byte(0..127)
        0,
        1,
        127,
        // 2 byte(128..16_383)
        128,
        300,
        16_383,
        // 3 byte(16_384..2_097_151)
        16_384,
        2_097_151,
        u32::MAX as u64,
        u64::MAX,
    ];
    for &data in &test_data {
        let mut writer = Writer::default();
        writer.write_varuint64(data);
        let binding = writer.dump();
        let mut reader = Reader::new(binding.as_slice());
        assert_eq!(reader.read_varuint64().unwrap(), data);
    }
}

#[test]
fn test_zigzag_layout() {
    let mut writer = Writer::default();
    writer.write_varint64(0);
    writer.write_varint64(-1);
    writer.write_varint64(1);
    writer.write_varint64(-64);
    writer.write_varint64(64);
    assert_eq!(writer.dump(), vec![0x00, 0x01, 0x02, 0x7f, 0x80, 0x01]);
}

#[test]
fn test_f64_little_endian() {
    let mut writer = Writer::default();
    writer.write_f64(1.0);
    assert_eq!(writer.dump(), 1.0f64.to_le_bytes().to_vec());
    let binding = writer.dump();
    let mut reader = Reader::new(&binding);
    assert_eq!(reader.read_f64().unwrap(), 1.0);
}

#[test]
fn test_len_prefixed() {
    let mut writer = Writer::default();
    writer.write_len_prefixed(b"binser");
    writer.write_len_prefixed(b"");
    let binding = writer.dump();
    assert_eq!(binding[0], 6);
    let mut reader = Reader::new(&binding);
    assert_eq!(reader.read_len_prefixed().unwrap(), b"binser");
    assert_eq!(reader.read_len_prefixed().unwrap(), b"");
    assert!(reader.is_exhausted());
}

#[test]
fn test_truncated_reads_are_corrupt() {
    if binser_core::error::should_panic_on_error() {
        return;
    }
    let mut reader = Reader::new(&[0x80, 0x80]);
    assert!(reader.read_varuint64().unwrap_err().is_corrupt_data());

    let mut reader = Reader::new(&[0, 0, 0]);
    assert!(reader.read_f64().unwrap_err().is_corrupt_data());

    let mut reader = Reader::new(&[5, b'a', b'b']);
    assert!(reader.read_len_prefixed().unwrap_err().is_corrupt_data());
}
