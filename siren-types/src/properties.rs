/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Typed entity members exposed as Siren `properties`.
//!
//! Rust has no runtime reflection, so every entity type describes its own members through
//! [`HasProperties`]. The [`siren_properties!`](crate::siren_properties) macro writes that
//! implementation for plain structs whose members implement `serde::Serialize` and
//! `serde::de::DeserializeOwned`.

use crate::BoxError;
use serde_json::Value;

/// A property value could not be converted to the type of the member it targets.
#[derive(Debug, thiserror::Error)]
#[error("cannot convert property `{name}`")]
pub struct PropertyConversionError {
    name: String,
    #[source]
    source: BoxError,
}

impl PropertyConversionError {
    /// Creates a conversion error for the member `name`.
    pub fn new(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Creates an error for a member that the target type does not declare.
    pub fn unknown_member(name: impl Into<String>) -> Self {
        let name = name.into();
        let source = format!("no member named `{name}`");
        Self::new(name, source)
    }

    /// Name of the member that failed to convert.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Exposes the typed members of an entity to the Siren codec.
///
/// Members are addressed by their Rust field name. Names listed by
/// [`excluded_members`](HasProperties::excluded_members) never take part in
/// serialization or deserialization even though they are not reserved.
pub trait HasProperties {
    /// Names of the typed members, in declaration order.
    fn member_names(&self) -> &'static [&'static str];

    /// Reads a member as JSON.
    ///
    /// Returns `None` when the member is unset (null) or unknown, and also when its value has
    /// no JSON form, such as a map with non-string keys. The last case is logged as a warning.
    fn read_member(&self, name: &str) -> Option<Value>;

    /// Converts `value` to the member's declared type and assigns it.
    fn write_member(&mut self, name: &str, value: Value) -> Result<(), PropertyConversionError>;

    /// Members marked as excluded from Siren `properties`.
    fn excluded_members(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns true if `name` carries the exclusion marker.
    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_members().contains(&name)
    }
}

/// Serializes a member value, mapping `null` to `None`.
#[doc(hidden)]
pub fn member_to_value<T: serde::Serialize + ?Sized>(name: &str, value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                member = name,
                error = %err,
                "member has no JSON form; treating it as unset"
            );
            None
        }
    }
}

/// Deserializes `value` into a member of type `T`.
#[doc(hidden)]
pub fn member_from_value<T: serde::de::DeserializeOwned>(
    name: &str,
    value: Value,
) -> Result<T, PropertyConversionError> {
    serde_json::from_value(value).map_err(|err| PropertyConversionError::new(name, err))
}

/// Implements [`HasProperties`] for a struct by listing its property members.
///
/// Members named in the optional `exclude { .. }` block carry the exclusion marker: they are
/// still readable and writable through the trait, but the codec skips them.
///
/// ```
/// use siren_types::{siren_properties, HasProperties};
///
/// #[derive(Default)]
/// struct Wheel {
///     size: String,
///     pressure: Option<f64>,
///     cache_key: u64,
/// }
///
/// siren_properties!(Wheel { size, pressure } exclude { cache_key });
///
/// let wheel = Wheel::default();
/// assert_eq!(&["size", "pressure", "cache_key"], wheel.member_names());
/// assert!(wheel.is_excluded("cache_key"));
/// assert_eq!(None, wheel.read_member("pressure"));
/// ```
#[macro_export]
macro_rules! siren_properties {
    ($ty:ty { $($member:ident),* $(,)? }) => {
        $crate::siren_properties!($ty { $($member),* } exclude {});
    };
    ($ty:ty { $($member:ident),* $(,)? } exclude { $($excluded:ident),* $(,)? }) => {
        impl $crate::HasProperties for $ty {
            fn member_names(&self) -> &'static [&'static str] {
                &[$(stringify!($member),)* $(stringify!($excluded),)*]
            }

            fn read_member(&self, name: &str) -> ::std::option::Option<$crate::Value> {
                match name {
                    $(stringify!($member) => $crate::properties::member_to_value(name, &self.$member),)*
                    $(stringify!($excluded) => $crate::properties::member_to_value(name, &self.$excluded),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn write_member(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::PropertyConversionError> {
                match name {
                    $(stringify!($member) => {
                        self.$member = $crate::properties::member_from_value(name, value)?;
                    })*
                    $(stringify!($excluded) => {
                        self.$excluded = $crate::properties::member_from_value(name, value)?;
                    })*
                    _ => return ::std::result::Result::Err(
                        $crate::PropertyConversionError::unknown_member(name),
                    ),
                }
                ::std::result::Result::Ok(())
            }

            fn excluded_members(&self) -> &'static [&'static str] {
                &[$(stringify!($excluded),)*]
            }
        }
    };
}
