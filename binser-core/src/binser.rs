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

use crate::buffer::Reader;
use crate::config::{Config, DuplicatePolicy};
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::resource_resolver::ResourceResolver;
use crate::resolver::type_resolver::{Harness, TypeResolver};
use crate::serializer;
use crate::value::{Class, Value};

/// The serialization engine.
///
/// `Binser` owns the configuration and both registries. Every call to
/// [`Binser::serialize`] or [`Binser::deserialize`] gets a fresh context, so
/// reference tables never leak from one call into the next.
///
/// # Examples
///
/// ```rust
/// use binser_core::value::{Table, Value};
/// use binser_core::Binser;
///
/// let binser = Binser::default();
/// let point = Table::new();
/// point.set("x", 1);
/// point.set("y", 2.5);
///
/// let bytes = binser
///     .serialize(&[Value::Table(point.clone()), "label".into()])
///     .unwrap();
/// let (values, count) = binser.deserialize(&bytes, 0).unwrap();
/// assert_eq!(count, 2);
/// assert_eq!(values[0], Value::Table(point));
/// assert_eq!(values[1].as_str(), Some("label"));
/// ```
#[derive(Default)]
pub struct Binser {
    config: Config,
    type_resolver: TypeResolver,
    resource_resolver: ResourceResolver,
}

impl Binser {
    pub fn new(config: Config) -> Self {
        Self::with_resolvers(config, TypeResolver::default(), ResourceResolver::default())
    }

    /// Creates an engine over pre-populated registries.
    ///
    /// The type resolver adopts the duplicate policy of `config`.
    pub fn with_resolvers(
        config: Config,
        mut type_resolver: TypeResolver,
        resource_resolver: ResourceResolver,
    ) -> Self {
        type_resolver.set_duplicate_policy(config.duplicate_policy());
        Binser {
            config,
            type_resolver,
            resource_resolver,
        }
    }

    /// Sets the maximum nesting depth of tables and custom objects.
    ///
    /// Encoding or decoding anything nested deeper fails with
    /// [`Error::DepthExceed`]. The default is `128`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binser_core::Binser;
    ///
    /// let binser = Binser::default().max_depth(16);
    /// assert_eq!(binser.get_config().max_depth(), 16);
    /// ```
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Sets what happens when a type name is registered twice.
    pub fn duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = duplicate_policy;
        self.type_resolver.set_duplicate_policy(duplicate_policy);
        self
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_type_resolver(&self) -> &TypeResolver {
        &self.type_resolver
    }

    pub fn get_type_resolver_mut(&mut self) -> &mut TypeResolver {
        &mut self.type_resolver
    }

    pub fn get_resource_resolver(&self) -> &ResourceResolver {
        &self.resource_resolver
    }

    pub fn get_resource_resolver_mut(&mut self) -> &mut ResourceResolver {
        &mut self.resource_resolver
    }

    /// Serializes `values` into one byte string.
    ///
    /// The output is the concatenation of each value's encoding with no
    /// header, so outputs of separate calls can be joined and still decode
    /// as one list.
    ///
    /// # Errors
    ///
    /// * [`Error::UnserializableType`] for functions and userdata that are
    ///   neither registered resources nor instances of a registered type.
    /// * [`Error::DepthExceed`] when nesting exceeds the configured limit.
    /// * Whatever a registered encode function returns.
    ///
    /// No bytes are returned on failure.
    pub fn serialize(&self, values: &[Value]) -> Result<Vec<u8>, Error> {
        let mut context = WriteContext::new(&self.type_resolver, &self.resource_resolver, &self.config);
        self.serialize_with_context(values, &mut context)?;
        log::trace!(
            "serialized {} values into {} bytes, {} objects tracked",
            values.len(),
            context.writer.len(),
            context.ref_writer.len()
        );
        Ok(context.into_bytes())
    }

    pub fn serialize_with_context(
        &self,
        values: &[Value],
        context: &mut WriteContext,
    ) -> Result<(), Error> {
        for value in values {
            serializer::write(value, context)?;
        }
        Ok(())
    }

    /// Decodes every value from `index` to the end of `bf`.
    ///
    /// Returns the values and their count. An empty tail decodes to no
    /// values.
    ///
    /// # Errors
    ///
    /// * [`Error::CorruptData`] for malformed or truncated input, and when
    ///   `index` is past the end of `bf`.
    /// * [`Error::UnknownType`] / [`Error::UnknownResource`] for names not
    ///   registered on this engine.
    pub fn deserialize(&self, bf: &[u8], index: usize) -> Result<(Vec<Value>, usize), Error> {
        let reader = Reader::at(bf, index)?;
        let mut context = ReadContext::new(
            &self.type_resolver,
            &self.resource_resolver,
            reader,
            &self.config,
        );
        let values = self.deserialize_with_context(&mut context, None)?;
        let count = values.len();
        Ok((values, count))
    }

    /// Decodes at most `n` values starting at `index`.
    ///
    /// Decoding stops early at the end of input, and bytes after the `n`-th
    /// value are never looked at.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binser_core::value::Value;
    /// use binser_core::Binser;
    ///
    /// let binser = Binser::default();
    /// let bytes = binser
    ///     .serialize(&[Value::Int(1), Value::Int(2), Value::Int(3)])
    ///     .unwrap();
    /// let values = binser.deserialize_n(&bytes, 2, 0).unwrap();
    /// assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
    /// ```
    pub fn deserialize_n(&self, bf: &[u8], n: usize, index: usize) -> Result<Vec<Value>, Error> {
        let reader = Reader::at(bf, index)?;
        let mut context = ReadContext::new(
            &self.type_resolver,
            &self.resource_resolver,
            reader,
            &self.config,
        );
        self.deserialize_with_context(&mut context, Some(n))
    }

    pub fn deserialize_with_context(
        &self,
        context: &mut ReadContext,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, Error> {
        let start = context.reader.get_cursor();
        let mut values = Vec::new();
        while !context.reader.is_exhausted() && limit.map_or(true, |n| values.len() < n) {
            values.push(serializer::read(context)?);
        }
        log::trace!(
            "deserialized {} values from bytes {}..{}, {} objects materialized",
            values.len(),
            start,
            context.reader.get_cursor(),
            context.ref_reader.len()
        );
        Ok(values)
    }

    /// Registers `class` under the wire name `name`.
    ///
    /// Instances of `class`, tables carrying it or userdata created with
    /// it, are written as CUSTOM values through `harness`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binser_core::resolver::type_resolver::Harness;
    /// use binser_core::value::{Class, Userdata, Value};
    /// use binser_core::Binser;
    ///
    /// let mut binser = Binser::default();
    /// let celsius = Class::new("Celsius");
    /// let class = celsius.clone();
    /// binser
    ///     .register(
    ///         celsius.clone(),
    ///         "Celsius",
    ///         Harness::new(
    ///             |v: &Value| {
    ///                 let degrees = v.as_userdata().and_then(|u| u.downcast_ref::<f64>());
    ///                 Ok(vec![Value::Float(degrees.copied().unwrap_or_default())])
    ///             },
    ///             move |args: Vec<Value>| {
    ///                 let degrees = args.first().and_then(Value::as_number).unwrap_or_default();
    ///                 Ok(Value::Userdata(Userdata::new(degrees, Some(class.clone()))))
    ///             },
    ///         ),
    ///     )
    ///     .unwrap();
    ///
    /// let t = Value::Userdata(Userdata::new(21.5f64, Some(celsius)));
    /// let bytes = binser.serialize(&[t]).unwrap();
    /// let (values, _) = binser.deserialize(&bytes, 0).unwrap();
    /// let u = values[0].as_userdata().unwrap();
    /// assert_eq!(u.downcast_ref::<f64>(), Some(&21.5));
    /// ```
    pub fn register(&mut self, class: Class, name: &str, harness: Harness) -> Result<Class, Error> {
        self.type_resolver.register(class, name, harness)
    }

    /// Registers `class` with the structural codec, under its own name
    /// unless `name` is given.
    pub fn register_class(&mut self, class: Class, name: Option<&str>) -> Result<Class, Error> {
        self.type_resolver.register_class(class, name)
    }

    pub fn unregister(&mut self, name: &str) -> Result<Class, Error> {
        self.type_resolver.unregister(name)
    }

    /// Registers `resource` so it is written as `name` alone.
    pub fn register_resource(
        &mut self,
        resource: impl Into<Value>,
        name: &str,
    ) -> Result<Value, Error> {
        self.resource_resolver.register(resource.into(), name)
    }

    pub fn unregister_resource(&mut self, name: &str) -> Result<Value, Error> {
        self.resource_resolver.unregister(name)
    }
}
