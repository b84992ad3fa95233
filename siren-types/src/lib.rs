/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Entity model for the [Siren](https://github.com/kevinswiber/siren) hypermedia format.
//!
//! User types become Siren entities by embedding an [`Envelope`] and implementing
//! [`Entity`] (or [`SubEntity`] when they are nested under another entity) together
//! with [`HasProperties`], which exposes their typed members as Siren `properties`.
//!
//! ```
//! use siren_types::{siren_properties, Entity, Envelope};
//!
//! #[derive(Debug, Default)]
//! struct Car {
//!     envelope: Envelope,
//!     colour: Option<String>,
//!     number_of_wheels: i32,
//! }
//!
//! siren_properties!(Car { colour, number_of_wheels });
//!
//! impl Entity for Car {
//!     fn envelope(&self) -> &Envelope {
//!         &self.envelope
//!     }
//!
//!     fn envelope_mut(&mut self) -> &mut Envelope {
//!         &mut self.envelope
//!     }
//! }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod action;
mod entity;
mod link;
pub mod properties;
pub mod registry;
pub mod reserved;

pub use action::{Action, Field, InputType, Method, ParseVariantError, DEFAULT_ACTION_TYPE};
pub use entity::{
    DynamicEntity, DynamicSubEntity, EmbeddedLink, Entity, EntityChild, Envelope, SubEntity,
};
pub use link::Link;
pub use properties::{HasProperties, PropertyConversionError};
pub use registry::EntityRegistry;

/// Generic JSON value used for property values and field values.
pub use serde_json::Value;

/// Ordered JSON object used for the dynamic property bag.
pub type PropertyMap = serde_json::Map<String, Value>;

/// A boxed [std::error::Error] trait object that's [Send] and [Sync]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
