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
use crate::value::Value;
use std::collections::HashMap;

/// Registry of resources: objects serialized by name only.
///
/// A resource is an externally managed handle (a loaded image, a device,
/// a callback) whose contents are never inspected. Both sides of an
/// exchange register equivalent objects under the same name, and the name
/// is all that travels. The registry holds a handle to every resource, so
/// an identity stays valid for as long as it is registered.
///
/// ```rust
/// use binser_core::resolver::resource_resolver::ResourceResolver;
/// use binser_core::value::{Table, Value};
///
/// let mut resources = ResourceResolver::default();
/// let atlas = Value::Table(Table::new());
/// resources.register(atlas.clone(), "atlas").unwrap();
/// assert_eq!(resources.name_of(&atlas), Some("atlas"));
/// assert!(resources.get("atlas").unwrap().raw_eq(&atlas));
/// ```
#[derive(Default)]
pub struct ResourceResolver {
    name_by_identity: HashMap<usize, String>,
    resource_by_name: HashMap<String, Value>,
}

impl ResourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resource` under `name` and returns it.
    ///
    /// Fails with [`Error::DuplicateName`] if `name` is bound to a different
    /// object, and with [`Error::NotAllowed`] for values without identity.
    /// An object registered again under a new name gives up its old one.
    pub fn register(&mut self, resource: Value, name: &str) -> Result<Value, Error> {
        let Some(identity) = resource.identity() else {
            return Err(Error::not_allowed(format!(
                "resource '{}' must be a table, userdata or function, got {}",
                name,
                resource.kind()
            )));
        };
        if let Some(existing) = self.resource_by_name.get(name) {
            if existing.raw_eq(&resource) {
                return Ok(resource);
            }
            return Err(Error::duplicate_name(name.to_owned()));
        }
        if let Some(old_name) = self.name_by_identity.remove(&identity) {
            log::debug!(
                "resource {:?} renamed from '{}' to '{}'",
                resource,
                old_name,
                name
            );
            self.resource_by_name.remove(&old_name);
        }
        self.name_by_identity.insert(identity, name.to_owned());
        self.resource_by_name
            .insert(name.to_owned(), resource.clone());
        Ok(resource)
    }

    /// Removes the resource registered as `name` and returns it.
    pub fn unregister(&mut self, name: &str) -> Result<Value, Error> {
        let resource = self
            .resource_by_name
            .remove(name)
            .ok_or_else(|| Error::not_found(name.to_owned()))?;
        if let Some(identity) = resource.identity() {
            self.name_by_identity.remove(&identity);
        }
        Ok(resource)
    }

    /// Name under which `value` is registered, if it is a resource.
    #[inline(always)]
    pub fn name_of(&self, value: &Value) -> Option<&str> {
        if self.name_by_identity.is_empty() {
            return None;
        }
        let identity = value.identity()?;
        self.name_by_identity.get(&identity).map(String::as_str)
    }

    #[inline(always)]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resource_by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.resource_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_by_name.is_empty()
    }
}
