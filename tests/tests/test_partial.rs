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

use binser::{Binser, Table, Value};

fn three_values(binser: &Binser) -> Vec<u8> {
    binser
        .serialize(&[Value::Int(1), "two".into(), Value::Float(3.0)])
        .unwrap()
}

#[test]
fn test_deserialize_n_stops_early() {
    let binser = Binser::default();
    let bytes = three_values(&binser);
    let values = binser.deserialize_n(&bytes, 2, 0).unwrap();
    assert_eq!(values, vec![Value::Int(1), "two".into()]);
}

#[test]
fn test_deserialize_n_beyond_end() {
    let binser = Binser::default();
    let bytes = three_values(&binser);
    let values = binser.deserialize_n(&bytes, 10, 0).unwrap();
    assert_eq!(values.len(), 3);
    assert!(binser.deserialize_n(&bytes, 0, 0).unwrap().is_empty());
}

#[test]
fn test_deserialize_n_ignores_trailing_bytes() {
    let binser = Binser::default();
    let mut bytes = binser.serialize(&[Value::Bool(true)]).unwrap();
    // not a valid tag
    bytes.push(0xee);
    let values = binser.deserialize_n(&bytes, 1, 0).unwrap();
    assert_eq!(values, vec![Value::Bool(true)]);
}

#[test]
fn test_start_index() {
    let binser = Binser::default();
    let first = binser.serialize(&["skip me".into()]).unwrap();
    let mut bytes = first.clone();
    bytes.extend(binser.serialize(&[Value::Int(99)]).unwrap());

    let (values, count) = binser.deserialize(&bytes, first.len()).unwrap();
    assert_eq!(count, 1);
    assert_eq!(values[0], Value::Int(99));

    let values = binser.deserialize_n(&bytes, 1, first.len()).unwrap();
    assert_eq!(values, vec![Value::Int(99)]);

    let (values, count) = binser.deserialize(&bytes, bytes.len()).unwrap();
    assert!(values.is_empty());
    assert_eq!(count, 0);
}

#[test]
fn test_start_index_past_end() {
    if binser_core::error::should_panic_on_error() {
        return;
    }
    let binser = Binser::default();
    let bytes = three_values(&binser);
    assert!(binser
        .deserialize(&bytes, bytes.len() + 1)
        .unwrap_err()
        .is_corrupt_data());
    assert!(binser
        .deserialize_n(&bytes, 1, bytes.len() + 1)
        .unwrap_err()
        .is_corrupt_data());
}

#[test]
fn test_partial_decode_keeps_references() {
    let binser = Binser::default();
    let shared = Value::Table(Table::new());
    let bytes = binser
        .serialize(&[shared.clone(), shared, Value::Nil])
        .unwrap();
    let values = binser.deserialize_n(&bytes, 2, 0).unwrap();
    assert!(values[0].raw_eq(&values[1]));
}
