/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Siren JSON codec.
//!
//! Renders [`siren_types`] entity graphs as `application/vnd.siren+json` documents and
//! reconstructs them from parsed JSON. Object keys are written in a fixed order: `class`,
//! `title`, `rel`, `properties`, `entities`, `actions`, `links`.
//!
//! ```
//! use siren_types::{siren_entity, siren_properties, Action, Envelope, Link, Method};
//!
//! #[derive(Debug, Default)]
//! struct Wheel {
//!     envelope: Envelope,
//!     id: i64,
//!     size: Option<String>,
//! }
//!
//! siren_properties!(Wheel { id, size });
//! siren_entity!(Wheel, envelope);
//!
//! let mut wheel = Wheel {
//!     envelope: Envelope::with_class("Wheel").title("My Car Wheel"),
//!     id: 1,
//!     size: Some("124x55x18".into()),
//! };
//! wheel.envelope.links.push(Link::self_link("https://api.test.com/wheel/1"));
//! wheel.envelope.actions.push(Action::new(
//!     "Inflate",
//!     "Inflate the wheel",
//!     Method::Put,
//!     "https://api.test.com/wheel/inflate",
//! ));
//!
//! let json = siren_json::to_string(&wheel);
//! let parsed: Wheel = siren_json::from_str(&json).unwrap();
//! assert_eq!(1, parsed.id);
//! assert_eq!(Some("My Car Wheel"), parsed.envelope.title.as_deref());
//! assert_eq!(json, siren_json::to_string(&parsed));
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod codec;
mod deserialize;
mod serialize;

pub use codec::{PropertyCase, SirenCodec, SirenCodecSettings};
pub use deserialize::{DeserializeError, Deserializer};

use serde_json::Value;
use siren_types::{Entity, SubEntity};
use std::io;

/// Media type of Siren JSON documents.
pub const MEDIA_TYPE: &str = "application/vnd.siren+json";

/// Renders a root entity with default settings.
pub fn serialize<E: Entity + ?Sized>(entity: &E) -> Value {
    SirenCodec::default().serialize(entity)
}

/// Renders a sub-entity on its own, including its `rel`, with default settings.
pub fn serialize_sub_entity<E: SubEntity + ?Sized>(sub_entity: &E) -> Value {
    SirenCodec::default().serialize_sub_entity(sub_entity)
}

/// Renders a root entity as compact JSON text with default settings.
pub fn to_string<E: Entity + ?Sized>(entity: &E) -> String {
    SirenCodec::default().to_string(entity)
}

/// Renders a root entity as compact JSON bytes with default settings.
pub fn to_vec<E: Entity + ?Sized>(entity: &E) -> Vec<u8> {
    SirenCodec::default().to_vec(entity)
}

/// Writes a root entity as compact JSON to `writer` with default settings.
pub fn to_writer<W: io::Write, E: Entity + ?Sized>(writer: W, entity: &E) -> io::Result<()> {
    SirenCodec::default().to_writer(writer, entity)
}

/// Reconstructs an entity of type `T` with default settings.
pub fn deserialize<T: Entity + Default>(value: Value) -> Result<T, DeserializeError> {
    SirenCodec::default().deserialize(value)
}

/// Reconstructs a sub-entity of type `T` with default settings.
pub fn deserialize_sub_entity<T: SubEntity + Default>(value: Value) -> Result<T, DeserializeError> {
    SirenCodec::default().deserialize_sub_entity(value)
}

/// Parses JSON text and reconstructs an entity of type `T` with default settings.
pub fn from_str<T: Entity + Default>(input: &str) -> Result<T, DeserializeError> {
    SirenCodec::default().from_str(input)
}

/// Parses JSON bytes and reconstructs an entity of type `T` with default settings.
pub fn from_slice<T: Entity + Default>(input: &[u8]) -> Result<T, DeserializeError> {
    SirenCodec::default().from_slice(input)
}

/// Reads JSON from `reader` and reconstructs an entity of type `T` with default settings.
pub fn from_reader<R: io::Read, T: Entity + Default>(reader: R) -> Result<T, DeserializeError> {
    SirenCodec::default().from_reader(reader)
}
