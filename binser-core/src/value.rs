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

//! Dynamic values understood by the encoder and produced by the decoder.
//!
//! Tables, userdata and functions are reference types: cloning a [`Value`]
//! holding one of them clones the handle, not the contents, and two handles
//! are the same object exactly when they share an allocation. That pointer
//! identity is what the reference tables and the resource registry key on.

use indexmap::IndexMap;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

/// Opaque type identity, the analogue of a metatable.
///
/// Two classes are the same type only if they are the same allocation;
/// the declared name is informational and used as the default registration
/// name by [`crate::resolver::type_resolver::TypeResolver::register_class`].
#[derive(Clone)]
pub struct Class(Rc<ClassInner>);

struct ClassInner {
    name: String,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Class {
        Class(Rc::new(ClassInner { name: name.into() }))
    }

    /// The class's own declared name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline(always)]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &Class) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({}@{:#x})", self.name(), self.id())
    }
}

/// Associative container holding ordered key/value entries.
///
/// Serves both as array (integer keys `1..=n` via [`Table::push`]) and as
/// map. Keys are matched by raw equality: primitives by value, reference
/// types by identity.
#[derive(Clone, Default)]
pub struct Table(Rc<RefCell<TableInner>>);

#[derive(Default)]
struct TableInner {
    class: Option<Class>,
    entries: IndexMap<RawKey, Value>,
    /// Keys `1..=border` are all present.
    border: usize,
}

impl TableInner {
    fn advance_border(&mut self) {
        while self
            .entries
            .contains_key(&RawKey(Value::Int(self.border as i64 + 1)))
        {
            self.border += 1;
        }
    }
}

/// Table key hashed and compared by raw equality.
///
/// Floats hash by their bits with `-0.0` folded into `0.0`, and every NaN is
/// the same key.
struct RawKey(Value);

impl PartialEq for RawKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (a, b) => a.raw_eq(b),
        }
    }
}

impl Eq for RawKey {}

impl Hash for RawKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(&self.0).hash(state);
        match &self.0 {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => {
                let bits = if *f == 0.0 {
                    0
                } else if f.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    f.to_bits()
                };
                bits.hash(state)
            }
            Value::Text(s) => s.hash(state),
            other => other.identity().hash(state),
        }
    }
}

impl Table {
    pub fn new() -> Table {
        Table::default()
    }

    pub fn with_class(class: Class) -> Table {
        Table(Rc::new(RefCell::new(TableInner {
            class: Some(class),
            ..TableInner::default()
        })))
    }

    /// Builds an array-like table with keys `1..=n`.
    pub fn from_array<I: IntoIterator<Item = Value>>(items: I) -> Table {
        let table = Table::new();
        for item in items {
            table.push(item);
        }
        table
    }

    pub fn class(&self) -> Option<Class> {
        self.0.borrow().class.clone()
    }

    pub fn set_class(&self, class: Option<Class>) {
        self.0.borrow_mut().class = class;
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0.borrow().entries.get(&RawKey(key.clone())).cloned()
    }

    /// Looks up a text key.
    pub fn get_str(&self, key: &str) -> Option<Value> {
        self.get(&Value::Text(key.to_owned()))
    }

    /// Inserts or replaces an entry. Setting a key to nil removes it, and a
    /// nil key is ignored since nil can never index a table.
    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if key.is_nil() {
            return;
        }
        let index = match key {
            Value::Int(i) if i > 0 => usize::try_from(i).ok(),
            _ => None,
        };
        let mut inner = self.0.borrow_mut();
        if value.is_nil() {
            if inner.entries.shift_remove(&RawKey(key)).is_some() {
                if let Some(index) = index {
                    if index <= inner.border {
                        inner.border = index - 1;
                    }
                }
            }
            return;
        }
        inner.entries.insert(RawKey(key), value);
        if index == Some(inner.border + 1) {
            inner.advance_border();
        }
    }

    /// Appends `value` under the next integer key.
    pub fn push(&self, value: impl Into<Value>) {
        let next = self.sequence_len() as i64 + 1;
        self.set(Value::Int(next), value);
    }

    /// Length of the array part: the largest `n` such that keys `1..=n` are
    /// all present.
    pub fn sequence_len(&self) -> usize {
        self.0.borrow().border
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().entries.is_empty()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.0
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.0.clone(), v.clone()))
            .collect()
    }

    #[inline(always)]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // entries are not printed, a table may contain itself
        let inner = self.0.borrow();
        match &inner.class {
            Some(class) => write!(
                f,
                "Table({}@{:#x}, {} entries)",
                class.name(),
                self.id(),
                inner.entries.len()
            ),
            None => write!(f, "Table(@{:#x}, {} entries)", self.id(), inner.entries.len()),
        }
    }
}

/// Opaque host object, such as a device handle or loaded media.
///
/// The encoder never looks inside userdata: it serializes only through a
/// registered encode function, or by name when registered as a resource.
#[derive(Clone)]
pub struct Userdata(Rc<UserdataInner>);

struct UserdataInner {
    class: Option<Class>,
    data: Box<dyn Any>,
}

impl Userdata {
    pub fn new<T: Any>(data: T, class: Option<Class>) -> Userdata {
        Userdata(Rc::new(UserdataInner {
            class,
            data: Box::new(data),
        }))
    }

    pub fn class(&self) -> Option<&Class> {
        self.0.class.as_ref()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.data.downcast_ref::<T>()
    }

    #[inline(always)]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }

    pub fn ptr_eq(&self, other: &Userdata) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Userdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.class {
            Some(class) => write!(f, "Userdata({}@{:#x})", class.name(), self.id()),
            None => write!(f, "Userdata(@{:#x})", self.id()),
        }
    }
}

type NativeFn = dyn Fn(&[Value]) -> Vec<Value>;

/// Host callable. Never serializable unless registered as a resource.
#[derive(Clone)]
pub struct Function(Rc<NativeFn>);

impl Function {
    pub fn new<F>(f: F) -> Function
    where
        F: Fn(&[Value]) -> Vec<Value> + 'static,
    {
        Function(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Vec<Value> {
        (self.0)(args)
    }

    #[inline(always)]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function(@{:#x})", self.id())
    }
}

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Table(Table),
    Userdata(Userdata),
    Function(Function),
}

impl Value {
    /// Name of the value's kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Table(_) => "table",
            Value::Userdata(_) => "userdata",
            Value::Function(_) => "function",
        }
    }

    /// Pointer identity of reference types; `None` for primitives.
    #[inline(always)]
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Table(t) => Some(t.id()),
            Value::Userdata(u) => Some(u.id()),
            Value::Function(f) => Some(f.id()),
            _ => None,
        }
    }

    /// Class of a table or userdata, if any.
    pub fn class(&self) -> Option<Class> {
        match self {
            Value::Table(t) => t.class(),
            Value::Userdata(u) => u.class().cloned(),
            _ => None,
        }
    }

    /// Raw equality: primitives by value, reference types by identity.
    pub fn raw_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a.ptr_eq(b),
            (Value::Userdata(a), Value::Userdata(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as `f64`, converting integers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_userdata(&self) -> Option<&Userdata> {
        match self {
            Value::Userdata(u) => Some(u),
            _ => None,
        }
    }

    /// Structural equality that tolerates cycles.
    ///
    /// Tables are equal when they share a class (or both have none) and hold
    /// pairwise equal entries in the same order; userdata and functions are
    /// equal only by identity. Floats compare by value, with NaN equal to
    /// itself bit for bit.
    pub fn deep_eq(&self, other: &Value) -> bool {
        deep_eq(self, other, &mut HashSet::new())
    }
}

fn deep_eq(a: &Value, b: &Value, visiting: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x == y || x.to_bits() == y.to_bits(),
        (Value::Table(x), Value::Table(y)) => {
            if x.ptr_eq(y) || !visiting.insert((x.id(), y.id())) {
                return true;
            }
            let same_class = match (x.class(), y.class()) {
                (None, None) => true,
                (Some(cx), Some(cy)) => cx.ptr_eq(&cy),
                _ => false,
            };
            if !same_class || x.len() != y.len() {
                return false;
            }
            x.entries()
                .iter()
                .zip(y.entries().iter())
                .all(|((ka, va), (kb, vb))| deep_eq(ka, kb, visiting) && deep_eq(va, vb, visiting))
        }
        _ => a.raw_eq(b),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.deep_eq(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Text(s) => write!(f, "Text({:?})", s),
            Value::Table(t) => t.fmt(f),
            Value::Userdata(u) => u.fmt(f),
            Value::Function(func) => func.fmt(f),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self {
        Value::Table(v)
    }
}

impl From<Userdata> for Value {
    fn from(v: Userdata) -> Self {
        Value::Userdata(v)
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Value::Function(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Nil)
    }
}
