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

//! # Binser Core
//!
//! This is the core implementation of the binser serialization engine. It
//! turns sequences of dynamically typed values into compact,
//! self-describing byte strings and back.
//!
//! ## Architecture
//!
//! The core library is organized into several key modules:
//!
//! - **`binser`**: The engine and its public API
//! - **`buffer`**: Bounds-checked binary Reader/Writer with varint codecs
//! - **`value`**: The dynamic value model (`Value`, `Table`, `Userdata`, ...)
//! - **`serializer`**: Tag dispatch and one codec per value kind
//! - **`resolver`**: Type and resource registries, reference tables, contexts
//! - **`types`**: Wire tags
//! - **`config`**: Engine configuration
//! - **`file`**: Write/append/read helpers for files
//! - **`error`**: Error handling
//!
//! ## Key Concepts
//!
//! ### Format
//!
//! Every value starts with a one byte tag. There is no outer header, so
//! two outputs concatenated decode as the values of both.
//!
//! ### Shared and cyclic references
//!
//! Tables and custom objects are tracked by identity within a call. The
//! second time one is met, a back-reference is written instead, so shared
//! structure stays shared and cycles terminate.
//!
//! ### Custom types and resources
//!
//! A [`value::Class`] registered with a name and an encode/decode pair is
//! written as that name plus the encoder's arguments. A registered resource
//! is written as its name alone and resolved against the reader's registry.
//!
//! ## Usage
//!
//! ```rust
//! use binser_core::value::{Class, Table, Value};
//! use binser_core::Binser;
//!
//! let mut binser = Binser::default();
//! let vec2 = binser.register_class(Class::new("Vec2"), None).unwrap();
//!
//! let v = Table::with_class(vec2.clone());
//! v.set("x", 3);
//! v.set("y", 4);
//! let bytes = binser.serialize(&[Value::Table(v)]).unwrap();
//!
//! let (values, _) = binser.deserialize(&bytes, 0).unwrap();
//! assert_eq!(values[0].class(), Some(vec2));
//! ```

pub mod binser;
pub mod buffer;
pub mod config;
pub mod error;
pub mod file;
pub mod resolver;
pub mod serializer;
pub mod types;
pub mod value;

pub use binser::Binser;
pub use config::{Config, DuplicatePolicy};
pub use error::Error;
pub use resolver::type_resolver::Harness;
pub use value::{Class, Function, Table, Userdata, Value};
