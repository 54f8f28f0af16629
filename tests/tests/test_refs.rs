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

#[test]
fn test_shared_table_decodes_once() {
    let binser = Binser::default();
    let shared = Table::new();
    shared.set("n", 1);
    let value = Value::Table(shared);

    let bytes = binser.serialize(&[value.clone(), value.clone()]).unwrap();
    let (values, count) = binser.deserialize(&bytes, 0).unwrap();
    assert_eq!(count, 2);
    let first = values[0].as_table().unwrap();
    let second = values[1].as_table().unwrap();
    assert!(first.ptr_eq(second));

    first.set("n", 2);
    assert_eq!(second.get_str("n"), Some(Value::Int(2)));
}

#[test]
fn test_backref_layout() {
    let binser = Binser::default();
    let value = Value::Table(Table::new());
    let bytes = binser.serialize(&[value.clone(), value]).unwrap();
    assert_eq!(bytes, vec![5, 0, 8, 1]);
}

#[test]
fn test_shared_nested_table() {
    let binser = Binser::default();
    let shared = Table::from_array([Value::Int(10)]);
    let outer = Table::new();
    outer.set("a", shared.clone());
    outer.set("b", shared.clone());
    outer.set("c", Table::from_array([Value::Table(shared)]));

    let bytes = binser.serialize(&[Value::Table(outer)]).unwrap();
    let (values, _) = binser.deserialize(&bytes, 0).unwrap();
    let outer = values[0].as_table().unwrap();
    let a = outer.get_str("a").unwrap();
    let b = outer.get_str("b").unwrap();
    let c = outer.get_str("c").unwrap();
    let c0 = c.as_table().unwrap().get(&Value::Int(1)).unwrap();
    assert!(a.raw_eq(&b));
    assert!(a.raw_eq(&c0));
}

#[test]
fn test_self_cycle() {
    let binser = Binser::default();
    let node = Table::new();
    node.set("name", "loop");
    node.set("self", node.clone());

    let bytes = binser.serialize(&[Value::Table(node)]).unwrap();
    let (values, _) = binser.deserialize(&bytes, 0).unwrap();
    let decoded = values[0].as_table().unwrap();
    let inner = decoded.get_str("self").unwrap();
    assert!(inner.as_table().unwrap().ptr_eq(decoded));
    assert_eq!(decoded.get_str("name").unwrap().as_str(), Some("loop"));
}

#[test]
fn test_mutual_cycle() {
    let binser = Binser::default();
    let a = Table::new();
    let b = Table::new();
    a.set("peer", b.clone());
    b.set("peer", a.clone());
    a.set("id", "a");
    b.set("id", "b");

    let bytes = binser
        .serialize(&[Value::Table(a), Value::Table(b)])
        .unwrap();
    let (values, _) = binser.deserialize(&bytes, 0).unwrap();
    let a = values[0].as_table().unwrap();
    let b = values[1].as_table().unwrap();
    assert!(a.get_str("peer").unwrap().as_table().unwrap().ptr_eq(b));
    assert!(b.get_str("peer").unwrap().as_table().unwrap().ptr_eq(a));
    assert_eq!(b.get_str("id").unwrap().as_str(), Some("b"));
}

#[test]
fn test_table_as_key_and_value() {
    let binser = Binser::default();
    let shared = Table::new();
    let table = Table::new();
    table.set(shared.clone(), shared.clone());

    let bytes = binser.serialize(&[Value::Table(table)]).unwrap();
    let (values, _) = binser.deserialize(&bytes, 0).unwrap();
    let entries = values[0].as_table().unwrap().entries();
    let (k, v) = &entries[0];
    assert!(k.raw_eq(v));
}

#[test]
fn test_calls_do_not_share_references() {
    let binser = Binser::default();
    let value = Value::Table(Table::from_array([Value::Int(1)]));
    let first = binser.serialize(&[value.clone()]).unwrap();
    let second = binser.serialize(&[value]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0], 5);
}

#[test]
fn test_concatenated_outputs() {
    let binser = Binser::default();
    let a = Value::Table(Table::from_array(["a".into()]));
    let b = Value::Table(Table::from_array(["b".into()]));

    let mut bytes = binser.serialize(&[a.clone(), a]).unwrap();
    bytes.extend(binser.serialize(&[Value::Int(0), b.clone(), b]).unwrap());

    let (values, count) = binser.deserialize(&bytes, 0).unwrap();
    assert_eq!(count, 5);
    assert!(values[0].raw_eq(&values[1]));
    assert!(values[3].raw_eq(&values[4]));
    assert!(!values[1].raw_eq(&values[3]));
    assert_eq!(values[2], Value::Int(0));
    let b_first = values[3].as_table().unwrap().get(&Value::Int(1));
    assert_eq!(b_first, Some(Value::from("b")));
}
