/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Factories that turn a type tag into a fresh, empty entity.

use crate::{Entity, SubEntity};
use std::collections::HashMap;
use std::fmt;

type EntityFactory = fn() -> Box<dyn Entity>;
type SubEntityFactory = fn() -> Box<dyn SubEntity>;

fn new_entity<T: Entity + Default + 'static>() -> Box<dyn Entity> {
    Box::<T>::default()
}

fn new_sub_entity<T: SubEntity + Default + 'static>() -> Box<dyn SubEntity> {
    Box::<T>::default()
}

/// Maps type tags to constructors for root entities and sub-entities.
///
/// Root entities are looked up by the tag the caller asks for. Nested sub-entities are looked
/// up by their `class` values, so a sub-entity type is usually registered under the class it
/// declares on the wire.
#[derive(Default, Clone)]
pub struct EntityRegistry {
    entities: HashMap<String, EntityFactory>,
    sub_entities: HashMap<String, SubEntityFactory>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` as the root entity type for `tag`, replacing any previous registration.
    pub fn register_entity<T: Entity + Default + 'static>(
        &mut self,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.entities.insert(tag.into(), new_entity::<T>);
        self
    }

    /// Registers `T` as the sub-entity type for `tag`, replacing any previous registration.
    pub fn register_sub_entity<T: SubEntity + Default + 'static>(
        &mut self,
        tag: impl Into<String>,
    ) -> &mut Self {
        self.sub_entities.insert(tag.into(), new_sub_entity::<T>);
        self
    }

    /// Instantiates the root entity type registered for `tag`.
    pub fn new_entity(&self, tag: &str) -> Option<Box<dyn Entity>> {
        self.entities.get(tag).map(|factory| factory())
    }

    /// Instantiates the sub-entity type registered for `tag`.
    pub fn new_sub_entity(&self, tag: &str) -> Option<Box<dyn SubEntity>> {
        self.sub_entities.get(tag).map(|factory| factory())
    }

    /// Instantiates the sub-entity type registered for the first of `classes` that has one.
    pub fn resolve_sub_entity<'a>(
        &self,
        classes: impl IntoIterator<Item = &'a str>,
    ) -> Option<(&'a str, Box<dyn SubEntity>)> {
        classes
            .into_iter()
            .find_map(|class| self.new_sub_entity(class).map(|entity| (class, entity)))
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.sub_entities.is_empty()
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entities: Vec<_> = self.entities.keys().collect();
        let mut sub_entities: Vec<_> = self.sub_entities.keys().collect();
        entities.sort();
        sub_entities.sort();
        f.debug_struct("EntityRegistry")
            .field("entities", &entities)
            .field("sub_entities", &sub_entities)
            .finish()
    }
}
