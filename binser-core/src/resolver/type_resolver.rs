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

use crate::config::DuplicatePolicy;
use crate::error::Error;
use crate::value::{Class, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Turns an object into the ordered argument list written after its type name.
pub type EncodeFn = Rc<dyn Fn(&Value) -> Result<Vec<Value>, Error>>;
/// Rebuilds an object from the argument list produced by an [`EncodeFn`].
pub type DecodeFn = Rc<dyn Fn(Vec<Value>) -> Result<Value, Error>>;

/// Encode/decode pair of a registered type.
///
/// A missing half falls back to the structural codec: the object's own
/// table entries flattened as `k1, v1, k2, v2, ...` on encode, and a table
/// carrying the registered class on decode.
///
/// ```rust
/// use binser_core::resolver::type_resolver::Harness;
/// use binser_core::value::Value;
///
/// let harness = Harness::new(
///     |v: &Value| Ok(vec![v.clone()]),
///     |mut args: Vec<Value>| Ok(args.pop().unwrap_or_default()),
/// );
/// assert!(!harness.is_structural());
/// assert!(Harness::structural().is_structural());
/// ```
#[derive(Clone, Default)]
pub struct Harness {
    encode_fn: Option<EncodeFn>,
    decode_fn: Option<DecodeFn>,
}

impl Harness {
    pub fn new<E, D>(encode: E, decode: D) -> Harness
    where
        E: Fn(&Value) -> Result<Vec<Value>, Error> + 'static,
        D: Fn(Vec<Value>) -> Result<Value, Error> + 'static,
    {
        Harness::structural().with_encoder(encode).with_decoder(decode)
    }

    /// Harness using the structural codec in both directions.
    pub fn structural() -> Harness {
        Harness::default()
    }

    pub fn with_encoder<E>(mut self, encode: E) -> Harness
    where
        E: Fn(&Value) -> Result<Vec<Value>, Error> + 'static,
    {
        self.encode_fn = Some(Rc::new(encode));
        self
    }

    pub fn with_decoder<D>(mut self, decode: D) -> Harness
    where
        D: Fn(Vec<Value>) -> Result<Value, Error> + 'static,
    {
        self.decode_fn = Some(Rc::new(decode));
        self
    }

    #[inline(always)]
    pub fn get_encode_fn(&self) -> Option<&EncodeFn> {
        self.encode_fn.as_ref()
    }

    #[inline(always)]
    pub fn get_decode_fn(&self) -> Option<&DecodeFn> {
        self.decode_fn.as_ref()
    }

    pub fn is_structural(&self) -> bool {
        self.encode_fn.is_none() && self.decode_fn.is_none()
    }
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("custom_encode", &self.encode_fn.is_some())
            .field("custom_decode", &self.decode_fn.is_some())
            .finish()
    }
}

/// Registration record of one custom type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    class: Class,
    name: String,
    harness: Harness,
}

impl TypeInfo {
    #[inline(always)]
    pub fn get_class(&self) -> &Class {
        &self.class
    }

    #[inline(always)]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn get_harness(&self) -> &Harness {
        &self.harness
    }
}

/// TypeResolver is the registry mapping classes to their wire names and
/// codecs, and wire names back to classes.
///
/// Names are unique within one resolver, and so are classes: a class
/// registered again under a new name gives up its old one.
#[derive(Default)]
pub struct TypeResolver {
    type_info_map_by_name: HashMap<String, Rc<TypeInfo>>,
    type_info_map_by_class: HashMap<usize, Rc<TypeInfo>>,
    duplicate_policy: DuplicatePolicy,
}

impl TypeResolver {
    pub fn new(duplicate_policy: DuplicatePolicy) -> TypeResolver {
        TypeResolver {
            duplicate_policy,
            ..TypeResolver::default()
        }
    }

    pub fn set_duplicate_policy(&mut self, duplicate_policy: DuplicatePolicy) {
        self.duplicate_policy = duplicate_policy;
    }

    /// Registers `class` under `name` with the given codec.
    ///
    /// When `name` already belongs to another class, the outcome depends on
    /// the [`DuplicatePolicy`]: `Replace` drops the old record and logs a
    /// warning, `Error` fails with [`Error::DuplicateName`].
    pub fn register(&mut self, class: Class, name: &str, harness: Harness) -> Result<Class, Error> {
        if let Some(existing) = self.type_info_map_by_name.get(name) {
            if !existing.class.ptr_eq(&class) {
                match self.duplicate_policy {
                    DuplicatePolicy::Error => return Err(Error::duplicate_name(name.to_owned())),
                    DuplicatePolicy::Replace => {
                        log::warn!(
                            "type name '{}' re-registered: {:?} replaces {:?}",
                            name,
                            class,
                            existing.class
                        );
                        let old_class_id = existing.class.id();
                        self.type_info_map_by_class.remove(&old_class_id);
                    }
                }
            }
        }
        if let Some(existing) = self.type_info_map_by_class.get(&class.id()) {
            if existing.name != name {
                log::debug!(
                    "{:?} renamed from '{}' to '{}'",
                    class,
                    existing.name,
                    name
                );
                let old_name = existing.name.clone();
                self.type_info_map_by_name.remove(&old_name);
            }
        }
        let type_info = Rc::new(TypeInfo {
            class: class.clone(),
            name: name.to_owned(),
            harness,
        });
        self.type_info_map_by_name
            .insert(name.to_owned(), type_info.clone());
        self.type_info_map_by_class.insert(class.id(), type_info);
        Ok(class)
    }

    /// Registers `class` with the structural codec, named after the class's
    /// own declared name unless `name` is given.
    pub fn register_class(&mut self, class: Class, name: Option<&str>) -> Result<Class, Error> {
        let name = name.unwrap_or_else(|| class.name()).to_owned();
        self.register(class, &name, Harness::structural())
    }

    /// Removes the type registered as `name` and returns its class.
    pub fn unregister(&mut self, name: &str) -> Result<Class, Error> {
        let type_info = self
            .type_info_map_by_name
            .remove(name)
            .ok_or_else(|| Error::not_found(name.to_owned()))?;
        self.type_info_map_by_class
            .remove(&type_info.class.id());
        log::debug!("type '{}' unregistered", name);
        Ok(type_info.class.clone())
    }

    #[inline(always)]
    pub fn get_by_class(&self, class: &Class) -> Option<&Rc<TypeInfo>> {
        self.type_info_map_by_class.get(&class.id())
    }

    #[inline(always)]
    pub fn get_by_name(&self, name: &str) -> Option<&Rc<TypeInfo>> {
        self.type_info_map_by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.type_info_map_by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.type_info_map_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_info_map_by_name.is_empty()
    }
}
