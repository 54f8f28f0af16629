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

fn roundtrip(binser: &Binser, value: Value) -> Value {
    let bytes = binser.serialize(std::slice::from_ref(&value)).unwrap();
    let (mut values, count) = binser.deserialize(&bytes, 0).unwrap();
    assert_eq!(count, 1);
    values.remove(0)
}

#[test]
fn test_primitives() {
    let binser = Binser::default();
    let cases = vec![
        Value::Nil,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(0),
        Value::Int(-1),
        Value::Int(i64::MAX),
        Value::Int(i64::MIN),
        Value::Float(0.0),
        Value::Float(-2.75),
        Value::Float(1e300),
        Value::Float(f64::INFINITY),
        Value::Float(f64::NEG_INFINITY),
        Value::Text(String::new()),
        Value::Text("hello".to_owned()),
        Value::Text("héllo wörld ✓".to_owned()),
        Value::Text("x".repeat(10_000)),
    ];
    for value in cases {
        assert_eq!(roundtrip(&binser, value.clone()), value);
    }
}

#[test]
fn test_nan() {
    let binser = Binser::default();
    let result = roundtrip(&binser, Value::Float(f64::NAN));
    match result {
        Value::Float(f) => assert!(f.is_nan()),
        other => panic!("expected a float, got {:?}", other),
    }
}

#[test]
fn test_integral_float_stays_float() {
    let binser = Binser::default();
    let result = roundtrip(&binser, Value::Float(3.0));
    assert!(matches!(result, Value::Float(f) if f == 3.0));
    assert_ne!(result, Value::Int(3));
}

#[test]
fn test_primitive_layout() {
    let binser = Binser::default();
    assert_eq!(binser.serialize(&[Value::Nil]).unwrap(), vec![0]);
    assert_eq!(binser.serialize(&[Value::Bool(true)]).unwrap(), vec![1, 1]);
    assert_eq!(binser.serialize(&[Value::Int(1)]).unwrap(), vec![2, 2]);
    assert_eq!(binser.serialize(&[Value::Int(-1)]).unwrap(), vec![2, 1]);
    assert_eq!(
        binser.serialize(&["hi".into()]).unwrap(),
        vec![4, 2, b'h', b'i']
    );
    let mut float = vec![3];
    float.extend_from_slice(&0.5f64.to_le_bytes());
    assert_eq!(binser.serialize(&[Value::Float(0.5)]).unwrap(), float);
    assert_eq!(
        binser.serialize(&[Value::Table(Table::new())]).unwrap(),
        vec![5, 0]
    );
}

#[test]
fn test_nested_tables() {
    let binser = Binser::default();
    let inner = Table::from_array([Value::Int(1), Value::Int(2), Value::Int(3)]);
    let outer = Table::new();
    outer.set("name", "outer");
    outer.set("list", inner);
    outer.set(7, 7.5);
    outer.set(true, "yes");
    outer.set(2.5, Value::Nil);
    let deeper = Table::new();
    deeper.set("leaf", false);
    outer.set("deeper", deeper);

    let value = Value::Table(outer);
    let result = roundtrip(&binser, value.clone());
    assert_eq!(result, value);

    let table = result.as_table().unwrap();
    assert_eq!(table.get_str("name").unwrap().as_str(), Some("outer"));
    let list = table.get_str("list").unwrap();
    assert_eq!(list.as_table().unwrap().sequence_len(), 3);
    assert_eq!(table.get(&Value::Int(7)), Some(Value::Float(7.5)));
    assert!(table.get(&Value::Float(2.5)).is_none());
}

#[test]
fn test_entry_order_is_preserved() {
    let binser = Binser::default();
    let table = Table::new();
    for key in ["z", "a", "m", "b"] {
        table.set(key, key.len() as i64);
    }
    let result = roundtrip(&binser, Value::Table(table.clone()));
    let keys: Vec<Value> = result
        .as_table()
        .unwrap()
        .entries()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    let expected: Vec<Value> = ["z", "a", "m", "b"].iter().map(|&k| k.into()).collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_table_keys() {
    let binser = Binser::default();
    let key = Table::new();
    key.set("id", 1);
    let table = Table::new();
    table.set(key.clone(), "value for a table key");

    let result = roundtrip(&binser, Value::Table(table));
    let entries = result.as_table().unwrap().entries();
    assert_eq!(entries.len(), 1);
    let (decoded_key, decoded_value) = &entries[0];
    assert_eq!(decoded_key, &Value::Table(key));
    assert_eq!(decoded_value.as_str(), Some("value for a table key"));
}

#[test]
fn test_multiple_values() {
    let binser = Binser::default();
    let values = vec![Value::Int(1), "two".into(), Value::Float(3.0)];
    let bytes = binser.serialize(&values).unwrap();
    let (result, count) = binser.deserialize(&bytes, 0).unwrap();
    assert_eq!(count, 3);
    assert_eq!(result, values);
}

#[test]
fn test_empty_input() {
    let binser = Binser::default();
    let bytes = binser.serialize(&[]).unwrap();
    assert!(bytes.is_empty());
    let (values, count) = binser.deserialize(&bytes, 0).unwrap();
    assert!(values.is_empty());
    assert_eq!(count, 0);
}

#[test]
fn test_unregistered_class_is_dropped() {
    let binser = Binser::default();
    let table = Table::with_class(binser::Class::new("Anonymous"));
    table.set("k", 1);
    let result = roundtrip(&binser, Value::Table(table));
    let decoded = result.as_table().unwrap();
    assert!(decoded.class().is_none());
    assert_eq!(decoded.get_str("k"), Some(Value::Int(1)));
}

#[test]
fn test_large_table() {
    let binser = Binser::default();
    let n = 200_000;
    let table = Table::from_array((0..n).map(Value::Int));
    for i in 0..1_000 {
        table.set(format!("key-{}", i), i as f64);
    }
    assert_eq!(table.sequence_len(), n as usize);

    let result = roundtrip(&binser, Value::Table(table.clone()));
    let decoded = result.as_table().unwrap();
    assert_eq!(decoded.len(), n as usize + 1_000);
    assert_eq!(decoded.sequence_len(), n as usize);
    assert_eq!(decoded.get(&Value::Int(n)), Some(Value::Int(n - 1)));
    assert_eq!(decoded.get_str("key-999"), Some(Value::Float(999.0)));
    assert_eq!(result, Value::Table(table));
}
