/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use siren_types::ParseVariantError;

/// Failure to reconstruct an entity from Siren JSON.
///
/// Every variant aborts the call that produced it. Per-property conversion failures are not
/// reported here; they are logged and the property is skipped.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DeserializeError {
    /// The input is not valid JSON.
    #[error("failed to parse Siren JSON")]
    Parse(#[source] serde_json::Error),
    /// A value has the wrong JSON type, including a top-level value that is not an object.
    #[error("expected {expected} at `{path}`")]
    UnexpectedShape {
        /// Location of the offending value, e.g. `$.actions[0].fields`.
        path: String,
        /// Description of the expected JSON type.
        expected: &'static str,
    },
    /// A required member is absent.
    #[error("missing required member `{member}` at `{path}`")]
    MissingMember {
        /// Location of the object missing the member.
        path: String,
        /// Name of the missing member.
        member: &'static str,
    },
    /// An enumerated value such as an action method is not recognized.
    #[error("invalid value at `{path}`")]
    InvalidVariant {
        /// Location of the offending value.
        path: String,
        /// The underlying parse failure.
        #[source]
        source: ParseVariantError,
    },
    /// No entity type is registered for the requested tag.
    #[error("no entity type is registered for `{tag}`")]
    UnsupportedType {
        /// The tag that was requested.
        tag: String,
    },
}

impl DeserializeError {
    pub(super) fn unexpected_shape(path: &str, expected: &'static str) -> Self {
        DeserializeError::UnexpectedShape {
            path: path.to_string(),
            expected,
        }
    }

    pub(super) fn missing_member(path: &str, member: &'static str) -> Self {
        DeserializeError::MissingMember {
            path: path.to_string(),
            member,
        }
    }

    /// Returns true if the input could not be read as a Siren document.
    pub fn is_parse_error(&self) -> bool {
        !self.is_unsupported_type()
    }

    /// Returns true if the requested target type could not be instantiated.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, DeserializeError::UnsupportedType { .. })
    }
}
