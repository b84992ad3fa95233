/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::properties::{HasProperties, PropertyConversionError};
use crate::{Action, Link, PropertyMap};
use serde_json::Value;
use std::fmt;

/// The reserved part of an entity: everything Siren defines besides typed properties.
///
/// Collections are never absent; an entity that has no actions simply holds an empty `Vec`.
#[derive(Debug, Default)]
pub struct Envelope {
    /// Describes the nature of the entity's content.
    pub class: Vec<String>,
    /// Descriptive text about the entity.
    pub title: Option<String>,
    /// Properties that are not exposed as typed members.
    pub properties: PropertyMap,
    /// Related sub-entities and embedded links.
    pub entities: Vec<EntityChild>,
    /// Behaviors the entity exposes.
    pub actions: Vec<Action>,
    /// Navigational links.
    pub links: Vec<Link>,
}

impl Envelope {
    /// Creates an envelope with a single class.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: vec![class.into()],
            ..Default::default()
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns true if `class` is one of the envelope's classes.
    pub fn has_class(&self, class: &str) -> bool {
        self.class.iter().any(|c| c == class)
    }

    /// Finds the first link carrying `rel`.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.has_rel(rel))
    }

    /// Finds an action by name.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// Iterates over the embedded sub-entity representations, skipping embedded links.
    pub fn sub_entities(&self) -> impl Iterator<Item = &dyn SubEntity> {
        self.entities.iter().filter_map(EntityChild::as_sub_entity)
    }

    /// Iterates over the embedded links, skipping sub-entity representations.
    pub fn embedded_links(&self) -> impl Iterator<Item = &EmbeddedLink> {
        self.entities.iter().filter_map(EntityChild::as_embedded_link)
    }
}

/// A URI-addressable resource with properties, actions, links and optional sub-entities.
pub trait Entity: HasProperties + fmt::Debug {
    /// The reserved Siren members of this entity.
    fn envelope(&self) -> &Envelope;

    /// Mutable access to the reserved Siren members of this entity.
    fn envelope_mut(&mut self) -> &mut Envelope;

    /// Whether properties that match no typed member are kept in [`Envelope::properties`].
    ///
    /// Typed entities drop unmatched properties; the dynamic entity types keep them.
    fn collects_unmatched_properties(&self) -> bool {
        false
    }
}

/// An entity nested inside another entity. It must describe its relationship to the parent.
pub trait SubEntity: Entity {
    /// Relationship of this sub-entity to its parent.
    fn rel(&self) -> &[String];

    /// Mutable access to the relationship list.
    fn rel_mut(&mut self) -> &mut Vec<String>;
}

/// Implements [`Entity`], and optionally [`SubEntity`], by delegating to named struct members.
///
/// ```
/// use siren_types::{siren_entity, siren_properties, Envelope, SubEntity};
///
/// #[derive(Debug, Default)]
/// struct Wheel {
///     envelope: Envelope,
///     rel: Vec<String>,
///     size: String,
/// }
///
/// siren_properties!(Wheel { size });
/// siren_entity!(Wheel, envelope, rel = rel);
///
/// let wheel = Wheel { rel: vec!["wheel".into()], ..Default::default() };
/// assert_eq!(&["wheel".to_string()], wheel.rel());
/// ```
#[macro_export]
macro_rules! siren_entity {
    ($ty:ty, $envelope:ident) => {
        impl $crate::Entity for $ty {
            fn envelope(&self) -> &$crate::Envelope {
                &self.$envelope
            }

            fn envelope_mut(&mut self) -> &mut $crate::Envelope {
                &mut self.$envelope
            }
        }
    };
    ($ty:ty, $envelope:ident, rel = $rel:ident) => {
        $crate::siren_entity!($ty, $envelope);

        impl $crate::SubEntity for $ty {
            fn rel(&self) -> &[::std::string::String] {
                &self.$rel
            }

            fn rel_mut(&mut self) -> &mut ::std::vec::Vec<::std::string::String> {
                &mut self.$rel
            }
        }
    };
}

/// An un-expanded reference to a related resource.
///
/// Unlike a sub-entity representation it carries no properties, actions or nested entities.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbeddedLink {
    /// Describes the nature of the referenced entity.
    pub class: Vec<String>,
    /// Relationship of the referenced entity to its parent. Required.
    pub rel: Vec<String>,
    /// URI of the referenced entity. Required.
    pub href: String,
    /// Media type of the referenced entity.
    pub type_: Option<String>,
}

impl EmbeddedLink {
    /// Creates an embedded link with a single class and a single relationship.
    pub fn new(href: impl Into<String>, class: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::with_lists(href, vec![class.into()], vec![rel.into()])
    }

    /// Creates an embedded link from class and relationship lists.
    pub fn with_lists(href: impl Into<String>, class: Vec<String>, rel: Vec<String>) -> Self {
        Self {
            class,
            rel,
            href: href.into(),
            type_: None,
        }
    }

    /// Sets the media type.
    pub fn media_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }
}

/// One element of an entity's `entities` list.
#[derive(Debug)]
pub enum EntityChild {
    /// A full embedded representation.
    SubEntity(Box<dyn SubEntity>),
    /// A bare reference to the related resource.
    EmbeddedLink(EmbeddedLink),
}

impl EntityChild {
    /// Wraps a sub-entity representation.
    pub fn sub_entity(sub_entity: impl SubEntity + 'static) -> Self {
        EntityChild::SubEntity(Box::new(sub_entity))
    }

    /// Returns the sub-entity representation, if this is one.
    pub fn as_sub_entity(&self) -> Option<&dyn SubEntity> {
        match self {
            EntityChild::SubEntity(sub_entity) => Some(sub_entity.as_ref()),
            EntityChild::EmbeddedLink(_) => None,
        }
    }

    /// Returns the embedded link, if this is one.
    pub fn as_embedded_link(&self) -> Option<&EmbeddedLink> {
        match self {
            EntityChild::SubEntity(_) => None,
            EntityChild::EmbeddedLink(link) => Some(link),
        }
    }

    /// Relationship of the child to its parent.
    pub fn rel(&self) -> &[String] {
        match self {
            EntityChild::SubEntity(sub_entity) => sub_entity.rel(),
            EntityChild::EmbeddedLink(link) => &link.rel,
        }
    }
}

impl From<EmbeddedLink> for EntityChild {
    fn from(link: EmbeddedLink) -> Self {
        EntityChild::EmbeddedLink(link)
    }
}

impl From<Box<dyn SubEntity>> for EntityChild {
    fn from(sub_entity: Box<dyn SubEntity>) -> Self {
        EntityChild::SubEntity(sub_entity)
    }
}

/// An entity with no typed members. All of its properties live in [`Envelope::properties`].
#[derive(Debug, Default)]
pub struct DynamicEntity {
    /// Reserved Siren members.
    pub envelope: Envelope,
}

/// A sub-entity with no typed members.
///
/// The deserializer produces these for nested representations whose class names no
/// registered type.
#[derive(Debug, Default)]
pub struct DynamicSubEntity {
    /// Reserved Siren members.
    pub envelope: Envelope,
    /// Relationship to the parent entity.
    pub rel: Vec<String>,
}

macro_rules! dynamic_properties {
    ($ty:ty) => {
        impl HasProperties for $ty {
            fn member_names(&self) -> &'static [&'static str] {
                &[]
            }

            fn read_member(&self, _name: &str) -> Option<Value> {
                None
            }

            fn write_member(
                &mut self,
                name: &str,
                _value: Value,
            ) -> Result<(), PropertyConversionError> {
                Err(PropertyConversionError::unknown_member(name))
            }
        }
    };
}

dynamic_properties!(DynamicEntity);
dynamic_properties!(DynamicSubEntity);

impl Entity for DynamicEntity {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn collects_unmatched_properties(&self) -> bool {
        true
    }
}

impl Entity for DynamicSubEntity {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn collects_unmatched_properties(&self) -> bool {
        true
    }
}

impl SubEntity for DynamicSubEntity {
    fn rel(&self) -> &[String] {
        &self.rel
    }

    fn rel_mut(&mut self) -> &mut Vec<String> {
        &mut self.rel
    }
}
