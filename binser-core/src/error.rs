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

//! Error type shared by the encoder, the decoder and both registries.
//!
//! Error constructors sit on the hot path of every buffer read, so they are
//! marked `#[cold]` to keep the success path tight.

use std::borrow::Cow;

use thiserror::Error;

/// Set BINSER_PANIC_ON_ERROR at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("BINSER_PANIC_ON_ERROR").is_some();

/// Check if BINSER_PANIC_ON_ERROR was set at compile time.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for binser serialization, deserialization and registration.
///
/// # Always Use Static Constructor Functions
///
/// Do not build variants with the enum syntax; use the constructor functions
/// ([`Error::corrupt_data`], [`Error::unknown_type`], ...). They accept
/// anything convertible into `Cow<'static, str>` and honor
/// `BINSER_PANIC_ON_ERROR`.
///
/// ```rust
/// use binser_core::error::Error;
///
/// let err = Error::unknown_type("Vec2");
/// assert_eq!(err.to_string(), "unknown type 'Vec2'");
///
/// let err = Error::corrupt_data(format!("unknown tag 0x{:02x}", 0xee));
/// assert!(matches!(err, Error::CorruptData(_)));
/// ```
///
/// ## Debug Mode: BINSER_PANIC_ON_ERROR
///
/// ```bash
/// RUST_BACKTRACE=1 BINSER_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The encoder met a value that has no primitive, composite or registered
    /// type handling, such as a function or an unregistered userdata.
    ///
    /// Do not construct this variant directly; use [`Error::unserializable_type`] instead.
    #[error("{0}")]
    UnserializableType(Cow<'static, str>),

    /// A name is already bound to a different type or resource.
    ///
    /// Do not construct this variant directly; use [`Error::duplicate_name`] instead.
    #[error("name '{0}' is already registered")]
    DuplicateName(Cow<'static, str>),

    /// Unregistering a name that is not registered.
    ///
    /// Do not construct this variant directly; use [`Error::not_found`] instead.
    #[error("name '{0}' is not registered")]
    NotFound(Cow<'static, str>),

    /// The input refers to a type name with no registry entry.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_type`] instead.
    #[error("unknown type '{0}'")]
    UnknownType(Cow<'static, str>),

    /// The input refers to a resource name with no registry entry.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_resource`] instead.
    #[error("unknown resource '{0}'")]
    UnknownResource(Cow<'static, str>),

    /// Malformed tag, truncated payload or invalid back-reference.
    ///
    /// Do not construct this variant directly; use [`Error::corrupt_data`],
    /// [`Error::buffer_out_of_bound`] or [`Error::invalid_ref`] instead.
    #[error("corrupt data: {0}")]
    CorruptData(Cow<'static, str>),

    /// Maximum nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Operation not allowed for the given value.
    ///
    /// Do not construct this variant directly; use [`Error::not_allowed`] instead.
    #[error("{0}")]
    NotAllowed(Cow<'static, str>),

    /// Raised by user supplied encode or decode functions.
    ///
    /// Do not construct this variant directly; use [`Error::custom`] instead.
    #[error("{0}")]
    Custom(Cow<'static, str>),

    /// I/O failure in the file adapter.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

macro_rules! cow_constructor {
    ($(#[$meta:meta])* $fn_name:ident => $variant:ident) => {
        $(#[$meta])*
        ///
        /// If `BINSER_PANIC_ON_ERROR` was set at compile time, this panics with the error message.
        #[inline(always)]
        #[cold]
        #[track_caller]
        pub fn $fn_name<S: Into<Cow<'static, str>>>(s: S) -> Self {
            let err = Error::$variant(s.into());
            if PANIC_ON_ERROR {
                panic!("BINSER_PANIC_ON_ERROR: {}", err);
            }
            err
        }
    };
}

impl Error {
    cow_constructor!(
        /// Creates a new [`Error::UnserializableType`].
        unserializable_type => UnserializableType
    );
    cow_constructor!(
        /// Creates a new [`Error::DuplicateName`] for the given name.
        duplicate_name => DuplicateName
    );
    cow_constructor!(
        /// Creates a new [`Error::NotFound`] for the given name.
        not_found => NotFound
    );
    cow_constructor!(
        /// Creates a new [`Error::UnknownType`] for the given type name.
        unknown_type => UnknownType
    );
    cow_constructor!(
        /// Creates a new [`Error::UnknownResource`] for the given resource name.
        unknown_resource => UnknownResource
    );
    cow_constructor!(
        /// Creates a new [`Error::CorruptData`].
        corrupt_data => CorruptData
    );
    cow_constructor!(
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed => DepthExceed
    );
    cow_constructor!(
        /// Creates a new [`Error::NotAllowed`].
        not_allowed => NotAllowed
    );
    cow_constructor!(
        /// Creates a new [`Error::Custom`]. Intended for user encode and decode functions.
        custom => Custom
    );

    /// Creates a [`Error::CorruptData`] describing a read past the end of the input.
    ///
    /// ```
    /// use binser_core::error::Error;
    ///
    /// let err = Error::buffer_out_of_bound(10, 4, 12);
    /// assert_eq!(err.to_string(), "corrupt data: buffer out of bound: 10 + 4 > 12");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        Error::corrupt_data(format!(
            "buffer out of bound: {} + {} > {}",
            offset, length, capacity
        ))
    }

    /// Creates a [`Error::CorruptData`] for a back-reference that cannot be resolved.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_ref<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let s: Cow<'static, str> = s.into();
        Error::corrupt_data(format!("invalid reference: {}", s))
    }

    /// Returns true for every error raised by malformed input.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Error::CorruptData(_))
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use binser_core::ensure;
/// use binser_core::error::Error;
///
/// fn check_count(n: usize) -> Result<(), Error> {
///     ensure!(n % 2 == 0, Error::corrupt_data("odd argument count"));
///     ensure!(n < 10, "count {} too large", n);
///     Ok(())
/// }
/// assert!(check_count(3).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::custom($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::custom(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`Error::Custom`].
///
/// Handy inside user encode and decode functions.
///
/// # Examples
/// ```
/// use binser_core::bail;
/// use binser_core::error::Error;
///
/// fn fail_fast(field: &str) -> Result<(), Error> {
///     bail!("missing field {}", field);
/// }
/// assert!(fail_fast("x").is_err());
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::custom($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::custom(format!($fmt, $($arg)*)))
    };
}
