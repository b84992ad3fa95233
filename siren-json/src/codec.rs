/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Codec configuration and the [`SirenCodec`] entry point.

use crate::deserialize::{DeserializeError, Deserializer};
use crate::serialize::EntitySerializer;
use convert_case::{Case, Casing};
use serde_json::Value;
use siren_types::{Entity, EntityRegistry, SubEntity};
use std::borrow::Cow;
use std::io;

/// Naming convention applied to typed member names in `properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyCase {
    /// `number_of_wheels` is written as `numberOfWheels`.
    #[default]
    LowerCamel,
    /// Member names are written exactly as declared.
    Preserve,
}

impl PropertyCase {
    /// Returns the wire name for the member `name`.
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            PropertyCase::Preserve => Cow::Borrowed(name),
            PropertyCase::LowerCamel => lower_camel(name),
        }
    }

    /// Returns true if the wire key `key` addresses the member `name`.
    ///
    /// Matching is case-insensitive against both the declared name and its wire name, so
    /// reading accepts everything writing produces under either convention.
    pub fn matches(&self, name: &str, key: &str) -> bool {
        name.eq_ignore_ascii_case(key) || self.apply(name).eq_ignore_ascii_case(key)
    }
}

fn lower_camel(name: &str) -> Cow<'_, str> {
    let camel = name.to_case(Case::Camel);
    if camel.is_empty() || camel == name {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(camel)
    }
}

/// Configuration for Siren codec behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SirenCodecSettings {
    /// Naming convention for typed member names in `properties`.
    pub property_case: PropertyCase,
    /// Whether `"class": []` is written for entities without classes.
    pub emit_empty_class: bool,
    /// Whether `"entities": []` is written for entities without sub-entities.
    pub emit_empty_entities: bool,
}

impl Default for SirenCodecSettings {
    fn default() -> Self {
        Self {
            property_case: PropertyCase::LowerCamel,
            emit_empty_class: true,
            emit_empty_entities: true,
        }
    }
}

/// Siren codec for serializing entity graphs and reconstructing them from JSON.
///
/// # Examples
///
/// ```
/// use siren_json::{PropertyCase, SirenCodec, SirenCodecSettings};
/// use siren_types::DynamicEntity;
///
/// // Default settings: lower camel property names, empty class and entities are written.
/// let codec = SirenCodec::default();
///
/// // Strict omission of empty collections, member names kept as declared.
/// let strict = SirenCodec::new(SirenCodecSettings {
///     property_case: PropertyCase::Preserve,
///     emit_empty_class: false,
///     emit_empty_entities: false,
/// });
///
/// let entity: DynamicEntity = codec.from_str(r#"{"class":["Car"]}"#).unwrap();
/// assert_eq!(r#"{"class":["Car"],"entities":[]}"#, codec.to_string(&entity));
/// assert_eq!(r#"{"class":["Car"]}"#, strict.to_string(&entity));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SirenCodec {
    settings: SirenCodecSettings,
}

impl SirenCodec {
    /// Creates a new Siren codec with the given settings.
    pub fn new(settings: SirenCodecSettings) -> Self {
        Self { settings }
    }

    /// Returns the codec settings.
    pub fn settings(&self) -> &SirenCodecSettings {
        &self.settings
    }

    /// Renders a root entity.
    pub fn serialize<E: Entity + ?Sized>(&self, entity: &E) -> Value {
        EntitySerializer::new(&self.settings).entity(entity)
    }

    /// Renders a sub-entity on its own, including its `rel`.
    pub fn serialize_sub_entity<E: SubEntity + ?Sized>(&self, sub_entity: &E) -> Value {
        EntitySerializer::new(&self.settings).sub_entity(sub_entity)
    }

    /// Renders a root entity as compact JSON text.
    pub fn to_string<E: Entity + ?Sized>(&self, entity: &E) -> String {
        self.serialize(entity).to_string()
    }

    /// Renders a root entity as compact JSON bytes.
    pub fn to_vec<E: Entity + ?Sized>(&self, entity: &E) -> Vec<u8> {
        self.to_string(entity).into_bytes()
    }

    /// Writes a root entity as compact JSON to `writer`.
    pub fn to_writer<W: io::Write, E: Entity + ?Sized>(
        &self,
        writer: W,
        entity: &E,
    ) -> io::Result<()> {
        serde_json::to_writer(writer, &self.serialize(entity)).map_err(io::Error::from)
    }

    /// Returns a deserializer that resolves types through `registry`.
    pub fn deserializer<'a>(&self, registry: &'a EntityRegistry) -> Deserializer<'a> {
        Deserializer::new(self.settings.clone()).with_registry(registry)
    }

    /// Reconstructs an entity of type `T` from a parsed JSON value.
    pub fn deserialize<T: Entity + Default>(&self, value: Value) -> Result<T, DeserializeError> {
        Deserializer::new(self.settings.clone()).deserialize(value)
    }

    /// Reconstructs a sub-entity of type `T`, including its `rel`.
    pub fn deserialize_sub_entity<T: SubEntity + Default>(
        &self,
        value: Value,
    ) -> Result<T, DeserializeError> {
        Deserializer::new(self.settings.clone()).deserialize_sub_entity(value)
    }

    /// Parses JSON text and reconstructs an entity of type `T`.
    pub fn from_str<T: Entity + Default>(&self, input: &str) -> Result<T, DeserializeError> {
        Deserializer::new(self.settings.clone()).from_str(input)
    }

    /// Parses JSON bytes and reconstructs an entity of type `T`.
    pub fn from_slice<T: Entity + Default>(&self, input: &[u8]) -> Result<T, DeserializeError> {
        Deserializer::new(self.settings.clone()).from_slice(input)
    }

    /// Reads JSON from `reader` and reconstructs an entity of type `T`.
    pub fn from_reader<R: io::Read, T: Entity + Default>(
        &self,
        reader: R,
    ) -> Result<T, DeserializeError> {
        Deserializer::new(self.settings.clone()).from_reader(reader)
    }
}
