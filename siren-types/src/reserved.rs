/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Member names that belong to the Siren envelope rather than to an entity's `properties`.

/// Reserved member names, matched exactly and case-sensitively.
pub const RESERVED_NAMES: &[&str] = &[
    "class",
    "title",
    "rel",
    "href",
    "type",
    "entities",
    "actions",
    "links",
    "properties",
    "name",
    "method",
    "value",
    "fields",
];

/// Returns true if `name` is a reserved envelope member.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}
