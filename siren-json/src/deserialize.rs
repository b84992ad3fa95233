/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Reconstruction of typed entity graphs from Siren JSON.

mod error;

pub use error::DeserializeError;

use crate::codec::SirenCodecSettings;
use serde_json::{Map, Value};
use siren_types::reserved::is_reserved;
use siren_types::{
    Action, DynamicSubEntity, EmbeddedLink, Entity, EntityChild, EntityRegistry, Field, Link,
    ParseVariantError, SubEntity, DEFAULT_ACTION_TYPE,
};
use std::error::Error as _;
use std::io;
use std::str::FromStr;
use tracing::{debug, trace, warn};

const ROOT: &str = "$";

/// Members whose presence marks an `entities` element as a full sub-entity representation.
const REPRESENTATION_MEMBERS: &[&str] = &["properties", "entities", "actions", "links"];

/// Rebuilds entities from parsed Siren JSON.
///
/// The root type is chosen by the caller, either statically through a type parameter or at
/// runtime through a tag looked up in an [`EntityRegistry`]. Nested sub-entities are resolved
/// through the registry by their `class` values and fall back to [`DynamicSubEntity`].
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    settings: SirenCodecSettings,
    registry: Option<&'a EntityRegistry>,
}

impl<'a> Deserializer<'a> {
    /// Creates a deserializer without a type registry.
    pub fn new(settings: SirenCodecSettings) -> Self {
        Self {
            settings,
            registry: None,
        }
    }

    /// Resolves tagged roots and nested sub-entities through `registry`.
    pub fn with_registry(mut self, registry: &'a EntityRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Reconstructs an entity of type `T`.
    pub fn deserialize<T: Entity + Default>(&self, value: Value) -> Result<T, DeserializeError> {
        let mut entity = T::default();
        self.read_root(&mut entity, value)?;
        Ok(entity)
    }

    /// Reconstructs a sub-entity of type `T`, including its `rel`.
    pub fn deserialize_sub_entity<T: SubEntity + Default>(
        &self,
        value: Value,
    ) -> Result<T, DeserializeError> {
        let mut sub_entity = T::default();
        let object = expect_object(value, ROOT)?;
        self.read_sub_entity(&mut sub_entity, object, ROOT)?;
        Ok(sub_entity)
    }

    /// Reconstructs an entity of the type registered for `tag`.
    pub fn deserialize_tagged(
        &self,
        tag: &str,
        value: Value,
    ) -> Result<Box<dyn Entity>, DeserializeError> {
        let mut entity = self
            .registry
            .and_then(|registry| registry.new_entity(tag))
            .ok_or_else(|| DeserializeError::UnsupportedType {
                tag: tag.to_string(),
            })?;
        self.read_root(entity.as_mut(), value)?;
        Ok(entity)
    }

    /// Parses JSON text and reconstructs an entity of type `T`.
    pub fn from_str<T: Entity + Default>(&self, input: &str) -> Result<T, DeserializeError> {
        self.deserialize(parsed(serde_json::from_str(input))?)
    }

    /// Parses JSON bytes and reconstructs an entity of type `T`.
    pub fn from_slice<T: Entity + Default>(&self, input: &[u8]) -> Result<T, DeserializeError> {
        self.deserialize(parsed(serde_json::from_slice(input))?)
    }

    /// Reads JSON from `reader` and reconstructs an entity of type `T`.
    pub fn from_reader<R: io::Read, T: Entity + Default>(
        &self,
        reader: R,
    ) -> Result<T, DeserializeError> {
        self.deserialize(parsed(serde_json::from_reader(reader))?)
    }

    fn read_root<E: Entity + ?Sized>(
        &self,
        entity: &mut E,
        value: Value,
    ) -> Result<(), DeserializeError> {
        let object = expect_object(value, ROOT)?;
        if let Some(rel) = self.read_entity(entity, object, ROOT)? {
            debug!(?rel, "ignoring `rel` on a root entity");
        }
        Ok(())
    }

    fn read_sub_entity<E: SubEntity + ?Sized>(
        &self,
        sub_entity: &mut E,
        object: Map<String, Value>,
        path: &str,
    ) -> Result<(), DeserializeError> {
        match self.read_entity(sub_entity, object, path)? {
            Some(rel) => sub_entity.rel_mut().extend(rel),
            None => warn!(path, "sub-entity representation has no `rel`"),
        }
        Ok(())
    }

    /// Fills `target` from `object` and returns the `rel` list if one was present.
    fn read_entity<E: Entity + ?Sized>(
        &self,
        target: &mut E,
        object: Map<String, Value>,
        path: &str,
    ) -> Result<Option<Vec<String>>, DeserializeError> {
        let mut rel = None;
        for (key, value) in object {
            match key.as_str() {
                "class" => {
                    let class = strings(value, &member_path(path, "class"))?;
                    target.envelope_mut().class.extend(class);
                }
                "title" => {
                    target.envelope_mut().title =
                        optional_string(value, &member_path(path, "title"))?;
                }
                "rel" => rel = Some(strings(value, &member_path(path, "rel"))?),
                "properties" => {
                    self.read_properties(target, value, &member_path(path, "properties"))?
                }
                "entities" => {
                    let entities_path = member_path(path, "entities");
                    for (index, element) in array(value, &entities_path)?.into_iter().enumerate() {
                        let child = self.read_child(element, &index_path(&entities_path, index))?;
                        target.envelope_mut().entities.push(child);
                    }
                }
                "actions" => {
                    let actions_path = member_path(path, "actions");
                    for (index, element) in array(value, &actions_path)?.into_iter().enumerate() {
                        let action = read_action(element, &index_path(&actions_path, index))?;
                        target.envelope_mut().actions.push(action);
                    }
                }
                "links" => {
                    let links_path = member_path(path, "links");
                    for (index, element) in array(value, &links_path)?.into_iter().enumerate() {
                        let link = read_link(element, &index_path(&links_path, index))?;
                        target.envelope_mut().links.push(link);
                    }
                }
                _ => debug!(path, key = %key, "ignoring unrecognized Siren member"),
            }
        }
        Ok(rel)
    }

    fn read_properties<E: Entity + ?Sized>(
        &self,
        target: &mut E,
        value: Value,
        path: &str,
    ) -> Result<(), DeserializeError> {
        let properties = match value {
            Value::Null => return Ok(()),
            Value::Object(properties) => properties,
            _ => return Err(DeserializeError::unexpected_shape(path, "an object")),
        };
        let case = self.settings.property_case;
        for (key, value) in properties {
            let member = target
                .member_names()
                .iter()
                .copied()
                .find(|name| !is_reserved(name) && case.matches(name, &key));
            match member {
                Some(name) if target.is_excluded(name) => {
                    debug!(path, property = %key, "dropping excluded property");
                }
                Some(name) => {
                    if let Err(err) = target.write_member(name, value) {
                        warn!(
                            path,
                            property = %key,
                            error = %err,
                            source = ?err.source(),
                            "skipping property that failed to convert"
                        );
                    }
                }
                None if target.collects_unmatched_properties() && !is_reserved(&key) => {
                    target.envelope_mut().properties.insert(key, value);
                }
                None => debug!(path, property = %key, "dropping property that matches no member"),
            }
        }
        Ok(())
    }

    fn read_child(&self, value: Value, path: &str) -> Result<EntityChild, DeserializeError> {
        let mut object = expect_object(value, path)?;
        if is_embedded_link(&object) {
            return read_embedded_link(object, path).map(EntityChild::EmbeddedLink);
        }

        let classes = match object.remove("class") {
            Some(class) => strings(class, &member_path(path, "class"))?,
            None => Vec::new(),
        };
        let resolved = self.registry.and_then(|registry| {
            registry.resolve_sub_entity(classes.iter().map(String::as_str))
        });
        let mut sub_entity = match resolved {
            Some((class, sub_entity)) => {
                trace!(path, class, "resolved registered sub-entity type");
                sub_entity
            }
            None => Box::<DynamicSubEntity>::default(),
        };
        sub_entity.envelope_mut().class.extend(classes);
        self.read_sub_entity(sub_entity.as_mut(), object, path)?;
        Ok(EntityChild::SubEntity(sub_entity))
    }
}

/// An element is an embedded link when it carries `href` and nothing that only a full
/// representation carries.
fn is_embedded_link(object: &Map<String, Value>) -> bool {
    object.contains_key("href")
        && !REPRESENTATION_MEMBERS
            .iter()
            .any(|member| object.contains_key(*member))
}

fn read_embedded_link(
    object: Map<String, Value>,
    path: &str,
) -> Result<EmbeddedLink, DeserializeError> {
    let mut link = EmbeddedLink::default();
    let mut href = None;
    let mut rel = None;
    for (key, value) in object {
        match key.as_str() {
            "class" => link.class = strings(value, &member_path(path, "class"))?,
            "rel" => rel = Some(strings(value, &member_path(path, "rel"))?),
            "href" => href = Some(string(value, &member_path(path, "href"))?),
            "type" => link.type_ = optional_string(value, &member_path(path, "type"))?,
            _ => debug!(path, key = %key, "ignoring unrecognized embedded link member"),
        }
    }
    link.href = href.ok_or_else(|| DeserializeError::missing_member(path, "href"))?;
    link.rel = rel.ok_or_else(|| DeserializeError::missing_member(path, "rel"))?;
    Ok(link)
}

fn read_action(value: Value, path: &str) -> Result<Action, DeserializeError> {
    let object = expect_object(value, path)?;
    let mut name = None;
    let mut class = None;
    let mut method = None;
    let mut href = None;
    let mut title = None;
    let mut type_ = None;
    let mut fields = Vec::new();
    for (key, value) in object {
        match key.as_str() {
            "name" => name = Some(string(value, &member_path(path, "name"))?),
            "class" => class = Some(strings(value, &member_path(path, "class"))?),
            "method" => method = variant(value, &member_path(path, "method"))?,
            "href" => href = Some(string(value, &member_path(path, "href"))?),
            "title" => title = optional_string(value, &member_path(path, "title"))?,
            "type" => type_ = optional_string(value, &member_path(path, "type"))?,
            "fields" => {
                let fields_path = member_path(path, "fields");
                for (index, element) in array(value, &fields_path)?.into_iter().enumerate() {
                    fields.push(read_field(element, &index_path(&fields_path, index))?);
                }
            }
            _ => debug!(path, key = %key, "ignoring unrecognized action member"),
        }
    }
    let name = name.ok_or_else(|| DeserializeError::missing_member(path, "name"))?;
    Ok(Action {
        class: class.unwrap_or_else(|| vec![name.clone()]),
        name,
        method: method.unwrap_or_default(),
        href: href.ok_or_else(|| DeserializeError::missing_member(path, "href"))?,
        title,
        type_: type_.unwrap_or_else(|| DEFAULT_ACTION_TYPE.to_string()),
        fields,
    })
}

fn read_field(value: Value, path: &str) -> Result<Field, DeserializeError> {
    let object = expect_object(value, path)?;
    let mut field = Field::default();
    let mut name = None;
    for (key, value) in object {
        match key.as_str() {
            "name" => name = Some(string(value, &member_path(path, "name"))?),
            "type" => {
                field.type_ = variant(value, &member_path(path, "type"))?.unwrap_or_default()
            }
            "value" => field.value = Some(value).filter(|value| !value.is_null()),
            "title" => field.title = optional_string(value, &member_path(path, "title"))?,
            _ => debug!(path, key = %key, "ignoring unrecognized field member"),
        }
    }
    field.name = name.ok_or_else(|| DeserializeError::missing_member(path, "name"))?;
    Ok(field)
}

fn read_link(value: Value, path: &str) -> Result<Link, DeserializeError> {
    let object = expect_object(value, path)?;
    let mut rel = None;
    let mut href = None;
    let mut title = None;
    let mut type_ = None;
    for (key, value) in object {
        match key.as_str() {
            "rel" => rel = Some(strings(value, &member_path(path, "rel"))?),
            "href" => href = Some(string(value, &member_path(path, "href"))?),
            "title" => title = optional_string(value, &member_path(path, "title"))?,
            "type" => type_ = optional_string(value, &member_path(path, "type"))?,
            _ => debug!(path, key = %key, "ignoring unrecognized link member"),
        }
    }
    Ok(Link {
        rel: rel.ok_or_else(|| DeserializeError::missing_member(path, "rel"))?,
        href: href.ok_or_else(|| DeserializeError::missing_member(path, "href"))?,
        title,
        type_,
    })
}

fn parsed(result: Result<Value, serde_json::Error>) -> Result<Value, DeserializeError> {
    result.map_err(|err| {
        debug!(error = %err, "input is not valid JSON");
        DeserializeError::Parse(err)
    })
}

fn member_path(path: &str, member: &str) -> String {
    format!("{path}.{member}")
}

fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

fn expect_object(value: Value, path: &str) -> Result<Map<String, Value>, DeserializeError> {
    match value {
        Value::Object(object) => Ok(object),
        _ => Err(DeserializeError::unexpected_shape(path, "a JSON object")),
    }
}

/// `null` reads as an empty array.
fn array(value: Value, path: &str) -> Result<Vec<Value>, DeserializeError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(values) => Ok(values),
        _ => Err(DeserializeError::unexpected_shape(path, "an array")),
    }
}

/// Accepts an array of scalars or a single string. Numbers and booleans keep their JSON text.
fn strings(value: Value, path: &str) -> Result<Vec<String>, DeserializeError> {
    let values = match value {
        Value::String(value) => return Ok(vec![value]),
        other => array(other, path)?,
    };
    values
        .into_iter()
        .map(|value| match value {
            Value::String(value) => Ok(value),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(value) => Ok(value.to_string()),
            _ => Err(DeserializeError::unexpected_shape(
                path,
                "an array of strings",
            )),
        })
        .collect()
}

fn string(value: Value, path: &str) -> Result<String, DeserializeError> {
    match value {
        Value::String(value) => Ok(value),
        _ => Err(DeserializeError::unexpected_shape(path, "a string")),
    }
}

fn optional_string(value: Value, path: &str) -> Result<Option<String>, DeserializeError> {
    match value {
        Value::Null => Ok(None),
        other => string(other, path).map(Some),
    }
}

fn variant<T: FromStr<Err = ParseVariantError>>(
    value: Value,
    path: &str,
) -> Result<Option<T>, DeserializeError> {
    match optional_string(value, path)? {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|source| DeserializeError::InvalidVariant {
                path: path.to_string(),
                source,
            }),
    }
}
