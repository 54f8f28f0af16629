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

use binser::{Binser, Class, Error, Function, Table, Userdata, Value};

#[test]
fn test_function_is_unserializable() {
    if binser_core::error::should_panic_on_error() {
        return;
    }
    let binser = Binser::default();
    let f = Value::Function(Function::new(|_| vec![]));
    let err = binser.serialize(&[f]).unwrap_err();
    assert!(matches!(err, Error::UnserializableType(_)));
    assert!(err.to_string().contains("function"));
}

#[test]
fn test_plain_userdata_is_unserializable() {
    if binser_core::error::should_panic_on_error() {
        return;
    }
    let binser = Binser::default();
    let u = Value::Userdata(Userdata::new(vec![1u8, 2, 3], None));
    let err = binser.serialize(&[u]).unwrap_err();
    assert!(matches!(err, Error::UnserializableType(_)));
    assert!(err.to_string().contains("userdata"));

    let u = Value::Userdata(Userdata::new(0u8, Some(Class::new("File"))));
    let err = binser.serialize(&[u]).unwrap_err();
    assert!(err.to_string().contains("File"));
}

#[test]
fn test_userdata_without_encoder() {
    if binser_core::error::should_panic_on_error() {
        return;
    }
    let mut binser = Binser::default();
    let class = binser.register_class(Class::new("Handle"), None).unwrap();
    let u = Value::Userdata(Userdata::new(1u64, Some(class)));
    let err = binser.serialize(&[u]).unwrap_err();
    assert!(matches!(err, Error::UnserializableType(_)));
    assert!(err.to_string().contains("Handle"));
}

#[test]
fn test_nested_function_fails_whole_call() {
    if binser_core::error::should_panic_on_error() {
        return;
    }
    let binser = Binser::default();
    let table = Table::new();
    table.set("ok", 1);
    table.set("callback", Function::new(|args| args.to_vec()));
    let result = binser.serialize(&[Value::Int(1), Value::Table(table)]);
    assert!(matches!(result, Err(Error::UnserializableType(_))));
}
