/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// A navigational link, distinct from entity relationships.
///
/// Entities should include a link with a `rel` of `self` pointing at their own URI. In JSON
/// Siren this is represented as `"links": [{ "rel": ["self"], "href": "http://api.x.io/orders/1234" }]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Relationship of the link to its entity. Required and non-empty.
    pub rel: Vec<String>,
    /// The target URI. Required.
    pub href: String,
    /// Text describing the nature of the link.
    pub title: Option<String>,
    /// Media type of the linked resource.
    pub type_: Option<String>,
}

impl Link {
    /// Creates a link with a single `rel` value.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::with_rels(vec![rel.into()], href)
    }

    /// Creates a link with an arbitrary list of `rel` values.
    pub fn with_rels(rel: Vec<String>, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
            title: None,
            type_: None,
        }
    }

    /// Creates a `self` link to `href`.
    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new("self", href)
    }

    /// Sets the link title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the media type of the linked resource.
    pub fn media_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Returns true if any of the link's `rel` values equals `rel`.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.iter().any(|r| r == rel)
    }
}
