// Copyright 2024 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! Error type for icosphere construction.

use std::convert::Infallible;
use thiserror::Error;

/// Result type alias for icosphere operations
pub type Result<T> = std::result::Result<T, IcoError>;

/// Errors raised before any mesh data is allocated.
///
/// Internal bookkeeping failures are not represented here; they panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcoError {
    /// The subdivision frequency (or a request derived from it) is unusable
    #[error("invalid subdivision frequency {value}: {reason}")]
    InvalidArgument {
        /// Offending value as given by the caller
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },
    /// Face list does not describe triangles over the given vertices
    #[error("invalid mesh face {face}: {reason}")]
    InvalidMesh {
        /// Index of the offending face
        face: usize,
        reason: &'static str,
    },
}

impl IcoError {
    pub(crate) fn invalid(value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidArgument {
            value: value.to_string(),
            reason,
        }
    }

    /// True for `InvalidArgument`
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<Infallible> for IcoError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
