/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Rendering of entity graphs into Siren JSON.

use crate::codec::SirenCodecSettings;
use serde_json::{json, Map, Value};
use siren_types::reserved::is_reserved;
use siren_types::{Action, EmbeddedLink, Entity, EntityChild, Field, Link, SubEntity};

/// Walks an entity graph and builds the matching JSON tree.
///
/// Object keys are inserted in wire order: `class`, `title`, `rel`, `properties`, `entities`,
/// `actions`, `links`.
pub(crate) struct EntitySerializer<'a> {
    settings: &'a SirenCodecSettings,
}

impl<'a> EntitySerializer<'a> {
    pub(crate) fn new(settings: &'a SirenCodecSettings) -> Self {
        Self { settings }
    }

    pub(crate) fn entity<E: Entity + ?Sized>(&self, entity: &E) -> Value {
        Value::Object(self.write_entity(entity, None))
    }

    pub(crate) fn sub_entity<E: SubEntity + ?Sized>(&self, sub_entity: &E) -> Value {
        Value::Object(self.write_entity(sub_entity, Some(sub_entity.rel())))
    }

    fn write_entity<E: Entity + ?Sized>(
        &self,
        entity: &E,
        rel: Option<&[String]>,
    ) -> Map<String, Value> {
        let envelope = entity.envelope();
        let mut object = Map::new();

        if !envelope.class.is_empty() || self.settings.emit_empty_class {
            object.insert("class".into(), strings(&envelope.class));
        }
        if let Some(title) = &envelope.title {
            object.insert("title".into(), Value::String(title.clone()));
        }
        if let Some(rel) = rel {
            object.insert("rel".into(), strings(rel));
        }

        let properties = self.properties(entity);
        if !properties.is_empty() {
            object.insert("properties".into(), Value::Object(properties));
        }

        if !envelope.entities.is_empty() || self.settings.emit_empty_entities {
            let entities = envelope
                .entities
                .iter()
                .map(|child| self.child(child))
                .collect();
            object.insert("entities".into(), Value::Array(entities));
        }
        if !envelope.actions.is_empty() {
            let actions = envelope.actions.iter().map(action).collect();
            object.insert("actions".into(), Value::Array(actions));
        }
        if !envelope.links.is_empty() {
            let links = envelope.links.iter().map(link).collect();
            object.insert("links".into(), Value::Array(links));
        }
        object
    }

    /// Typed members first, in declaration order, then the dynamic property bag.
    fn properties<E: Entity + ?Sized>(&self, entity: &E) -> Map<String, Value> {
        let case = self.settings.property_case;
        let mut properties = Map::new();
        let mut emitted = Vec::new();
        for &name in entity.member_names() {
            if is_reserved(name) || entity.is_excluded(name) {
                continue;
            }
            if let Some(value) = entity.read_member(name) {
                properties.insert(case.apply(name).into_owned(), value);
                emitted.push(name);
            }
        }
        for (key, value) in &entity.envelope().properties {
            if value.is_null()
                || is_reserved(key)
                || entity.is_excluded(key)
                || properties.contains_key(key)
            {
                continue;
            }
            // The typed value wins over any spelling of the same member in the bag.
            if emitted.iter().any(|name| case.matches(name, key)) {
                continue;
            }
            properties.insert(key.clone(), value.clone());
        }
        properties
    }

    fn child(&self, child: &EntityChild) -> Value {
        match child {
            EntityChild::SubEntity(sub_entity) => self.sub_entity(sub_entity.as_ref()),
            EntityChild::EmbeddedLink(link) => embedded_link(link),
        }
    }
}

fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

fn embedded_link(link: &EmbeddedLink) -> Value {
    let mut object = Map::new();
    object.insert("class".into(), strings(&link.class));
    object.insert("rel".into(), strings(&link.rel));
    object.insert("href".into(), Value::String(link.href.clone()));
    if let Some(type_) = &link.type_ {
        object.insert("type".into(), Value::String(type_.clone()));
    }
    Value::Object(object)
}

fn action(action: &Action) -> Value {
    json!({
        "name": action.name,
        "class": action.class,
        "method": action.method.as_str(),
        "href": action.href,
        "title": action.title,
        "type": action.type_,
        "fields": action.fields.iter().map(field).collect::<Vec<_>>(),
    })
}

fn field(field: &Field) -> Value {
    json!({
        "name": field.name,
        "title": field.title,
        "value": field.value,
        "type": field.type_.as_str(),
    })
}

// Unset title and type are written as null rather than omitted.
fn link(link: &Link) -> Value {
    json!({
        "rel": link.rel,
        "href": link.href,
        "title": link.title,
        "type": link.type_,
    })
}
