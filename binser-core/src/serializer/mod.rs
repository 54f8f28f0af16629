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
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::Tag;
use crate::value::Value;

mod bool;
pub mod custom;
mod number;
pub mod resource;
mod string;
pub mod table;

/// Codec of a value kind carried inline, with no identity.
pub trait Serializer
where
    Self: Sized,
{
    const TAG: Tag;

    /// Write the payload that follows the tag.
    fn write_data(&self, context: &mut WriteContext);

    /// Read the payload that follows the tag.
    fn read_data(context: &mut ReadContext) -> Result<Self, Error>;

    /// Entry point of the serialization.
    ///
    /// Step 1: write the tag.
    /// Step 2: invoke [`Serializer::write_data`] for the payload.
    fn write(&self, context: &mut WriteContext) {
        context.writer.write_u8(Self::TAG.into());
        self.write_data(context);
    }
}

/// Writes one value, dispatching on its kind.
///
/// Registered resources win over everything else, then objects already
/// written in this call become back-references.
pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    if let Some(name) = context.get_resource_resolver().name_of(value) {
        resource::write(name, context);
        return Ok(());
    }
    if context
        .ref_writer
        .try_write_ref(&mut context.writer, value)?
    {
        return Ok(());
    }
    match value {
        Value::Nil => context.writer.write_u8(Tag::NIL.into()),
        Value::Bool(v) => v.write(context),
        Value::Int(v) => v.write(context),
        Value::Float(v) => v.write(context),
        Value::Text(v) => v.write(context),
        Value::Table(_) | Value::Userdata(_) => {
            let type_info = value
                .class()
                .and_then(|class| context.get_type_resolver().get_by_class(&class));
            match (type_info, value) {
                (Some(type_info), _) => custom::write(value, type_info, context)?,
                (None, Value::Table(table)) => table::write(table, value, context)?,
                (None, _) => {
                    let msg = match value.class() {
                        Some(class) => format!("userdata of unregistered class '{}'", class.name()),
                        None => "userdata".to_owned(),
                    };
                    return Err(Error::unserializable_type(msg));
                }
            }
        }
        Value::Function(_) => return Err(Error::unserializable_type(value.kind())),
    }
    Ok(())
}

/// Reads one value starting at the reader's cursor.
pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    let tag = Tag::from_byte(context.reader.read_u8()?)?;
    match tag {
        Tag::NIL => Ok(Value::Nil),
        Tag::BOOL => Ok(Value::Bool(Serializer::read_data(context)?)),
        Tag::INT => Ok(Value::Int(Serializer::read_data(context)?)),
        Tag::FLOAT => Ok(Value::Float(Serializer::read_data(context)?)),
        Tag::TEXT => Ok(Value::Text(Serializer::read_data(context)?)),
        Tag::TABLE => table::read(context),
        Tag::CUSTOM => custom::read(context),
        Tag::RESOURCE => resource::read(context),
        Tag::BACKREF => context.ref_reader.read_ref(&mut context.reader),
    }
}
