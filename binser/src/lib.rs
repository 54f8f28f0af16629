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

//! # Binser
//!
//! Binser is a binary serialization engine for dynamically typed values:
//! nil, booleans, integers, floats, strings, tables, and user-defined
//! objects. Encodings are compact and self-describing, and need no schema.
//!
//! ## Key Features
//!
//! - **Shared and cyclic structure**: a table referenced twice is written
//!   once, and self-containing tables round-trip
//! - **Custom types**: register a class with an encode/decode pair, or with
//!   the structural codec that writes the object's own entries
//! - **Resources**: register an object by name and only the name is written
//! - **Streams of values**: outputs concatenate, so files can be appended to
//!
//! ## Basic Usage
//!
//! ```rust
//! use binser::{Binser, Table, Value};
//!
//! let binser = Binser::default();
//!
//! let node = Table::new();
//! node.set("name", "root");
//! node.set("self", node.clone());
//!
//! let bytes = binser.serialize(&[Value::Table(node), 42.into()]).unwrap();
//! let (values, count) = binser.deserialize(&bytes, 0).unwrap();
//! assert_eq!(count, 2);
//!
//! let root = values[0].as_table().unwrap();
//! let inner = root.get_str("self").unwrap();
//! assert!(inner.as_table().unwrap().ptr_eq(root));
//! assert_eq!(values[1], Value::Int(42));
//! ```
//!
//! ## Custom Types
//!
//! ```rust
//! use binser::{Binser, Class, Error, Harness, Table, Value};
//!
//! let mut binser = Binser::default();
//! let color = Class::new("Color");
//! let class = color.clone();
//! binser
//!     .register(
//!         color.clone(),
//!         "Color",
//!         Harness::new(
//!             |v: &Value| {
//!                 let t = v.as_table().ok_or_else(|| Error::custom("not a table"))?;
//!                 Ok(vec![t.get_str("hex").unwrap_or_default()])
//!             },
//!             move |args: Vec<Value>| {
//!                 let t = Table::with_class(class.clone());
//!                 t.set("hex", args.into_iter().next().unwrap_or_default());
//!                 Ok(Value::Table(t))
//!             },
//!         ),
//!     )
//!     .unwrap();
//!
//! let red = Table::with_class(color.clone());
//! red.set("hex", "#ff0000");
//! let bytes = binser.serialize(&[Value::Table(red)]).unwrap();
//! let (values, _) = binser.deserialize(&bytes, 0).unwrap();
//! assert_eq!(values[0].class(), Some(color));
//! ```
//!
//! ## Getting Started
//!
//! Add binser to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! binser = "0.3"
//! ```

pub use binser_core::{
    bail, ensure, error::Error, resolver::resource_resolver::ResourceResolver,
    resolver::type_resolver::TypeResolver, Binser, Class, Config, DuplicatePolicy, Function,
    Harness, Table, Userdata, Value,
};
