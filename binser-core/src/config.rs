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

/// What happens when a type name is registered a second time for a
/// different class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Drop the previous registration and log the override.
    #[default]
    Replace,
    /// Reject the registration with [`crate::error::Error::DuplicateName`].
    Error,
}

/// Configuration for binser serialization.
///
/// Shared between the [`crate::Binser`] instance and the per-call
/// `WriteContext`/`ReadContext`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum nesting depth of tables and custom objects, on both the
    /// encode and the decode side. Guards the call stack against
    /// adversarial input.
    pub max_depth: u32,
    /// Policy applied by the type registry on duplicate names.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 128,
            duplicate_policy: DuplicatePolicy::Replace,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get maximum nesting depth.
    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline(always)]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }
}
