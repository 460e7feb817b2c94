// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::TryReserveError;

/// Error returned when a surface cannot be produced or stored.
///
/// Carries a non-exhaustive [`ErrorKind`] plus a short static description of
/// what went wrong. Every error leaves the cache usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// What exactly failed, for display.
    detail: &'static str,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// A human-readable description of the failure.
    pub fn detail(&self) -> &'static str {
        self.detail
    }

    pub(crate) fn invalid_input(detail: &'static str) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            detail,
        }
    }

    pub(crate) fn resource_exhausted(detail: &'static str) -> Self {
        Self {
            kind: ErrorKind::ResourceExhausted,
            detail,
        }
    }

    pub(crate) fn decode_failure(detail: &'static str) -> Self {
        Self {
            kind: ErrorKind::DecodeFailure,
            detail,
        }
    }

    pub(crate) fn from_reserve(_: TryReserveError, detail: &'static str) -> Self {
        Self::resource_exhausted(detail)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidInput => write!(f, "invalid input: {}", self.detail),
            ErrorKind::ResourceExhausted => write!(f, "out of memory: {}", self.detail),
            ErrorKind::DecodeFailure => write!(f, "failed to decode bitmap: {}", self.detail),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required argument was missing or malformed, e.g. a paletted bitmap
    /// without a palette.
    InvalidInput,

    /// An allocation failed or a requested size does not fit in memory.
    ResourceExhausted,

    /// A compressed payload was truncated or malformed.
    DecodeFailure,
}
