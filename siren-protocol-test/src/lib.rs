/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Helpers for validating rendered Siren JSON against expected documents in tests.

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

use assert_json_diff::{assert_json_matches_no_panic, CompareMode, Config};
use pretty_assertions::Comparison;
use serde_json::Value;
use std::fmt::{self, Debug};
use thiserror::Error;

/// Owned string whose `Debug` output is the raw text, so multiline diffs stay readable.
#[derive(Eq, PartialEq)]
pub struct PrettyString(String);

impl Debug for PrettyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProtocolTestFailure {
    #[error("body is not valid JSON: {message}")]
    InvalidBody { message: String },

    #[error("body did not match. {hint}\n{comparison:?}")]
    BodyDidNotMatch {
        comparison: PrettyString,
        hint: String,
    },

    #[error("key order mismatch at `{path}`: expected {expected:?}, found {found:?}")]
    KeyOrder {
        path: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("no JSON value at `{pointer}`")]
    MissingValue { pointer: String },

    #[error("forbidden member present at `{pointer}`: `{member}`")]
    ForbiddenMember { pointer: String, member: String },

    #[error("required member missing at `{pointer}`: `{member}`")]
    RequiredMember { pointer: String, member: String },
}

/// Check that the protocol test succeeded & print the pretty error
/// if it did not
#[track_caller]
pub fn assert_ok(inp: Result<(), ProtocolTestFailure>) {
    if let Err(e) = inp {
        panic!("Protocol test failed: {e}");
    }
}

fn parse(body: &str) -> Result<Value, ProtocolTestFailure> {
    serde_json::from_str(body).map_err(|e| ProtocolTestFailure::InvalidBody {
        message: format!("{e}: `{body}`"),
    })
}

fn pretty(value: &Value) -> PrettyString {
    PrettyString(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
}

/// Compares two JSON documents structurally. Object key order is ignored.
pub fn validate_json_body(actual: &str, expected: &str) -> Result<(), ProtocolTestFailure> {
    let actual = parse(actual)?;
    let expected = parse(expected)?;
    let config = Config::new(CompareMode::Strict);
    assert_json_matches_no_panic(&actual, &expected, config).map_err(|hint| {
        ProtocolTestFailure::BodyDidNotMatch {
            comparison: PrettyString(
                Comparison::new(&pretty(&expected), &pretty(&actual)).to_string(),
            ),
            hint,
        }
    })
}

/// Checks that every object in `actual` lists its keys in the same order as the object at the
/// same position in `expected`.
///
/// Values are not compared; pair this with [`validate_json_body`].
pub fn validate_key_order(actual: &str, expected: &str) -> Result<(), ProtocolTestFailure> {
    let actual = parse(actual)?;
    let expected = parse(expected)?;
    key_order(&actual, &expected, "$")
}

fn key_order(actual: &Value, expected: &Value, path: &str) -> Result<(), ProtocolTestFailure> {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => {
            let found: Vec<String> = actual.keys().cloned().collect();
            let wanted: Vec<String> = expected.keys().cloned().collect();
            if found != wanted {
                return Err(ProtocolTestFailure::KeyOrder {
                    path: path.to_string(),
                    expected: wanted,
                    found,
                });
            }
            for (key, value) in actual {
                key_order(value, &expected[key], &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        (Value::Array(actual), Value::Array(expected)) => {
            for (index, (actual, expected)) in actual.iter().zip(expected).enumerate() {
                key_order(actual, expected, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn object_at<'a>(
    body: &'a Value,
    pointer: &str,
) -> Result<&'a serde_json::Map<String, Value>, ProtocolTestFailure> {
    body.pointer(pointer)
        .and_then(Value::as_object)
        .ok_or_else(|| ProtocolTestFailure::MissingValue {
            pointer: pointer.to_string(),
        })
}

/// Fails if the object at the JSON pointer `pointer` has any of `forbid_members`.
pub fn forbid_members(
    body: &str,
    pointer: &str,
    forbid_members: &[&str],
) -> Result<(), ProtocolTestFailure> {
    let body = parse(body)?;
    let object = object_at(&body, pointer)?;
    for member in forbid_members {
        if object.contains_key(*member) {
            return Err(ProtocolTestFailure::ForbiddenMember {
                pointer: pointer.to_string(),
                member: member.to_string(),
            });
        }
    }
    Ok(())
}

/// Fails unless the object at the JSON pointer `pointer` has every one of `require_members`.
pub fn require_members(
    body: &str,
    pointer: &str,
    require_members: &[&str],
) -> Result<(), ProtocolTestFailure> {
    let body = parse(body)?;
    let object = object_at(&body, pointer)?;
    for member in require_members {
        if !object.contains_key(*member) {
            return Err(ProtocolTestFailure::RequiredMember {
                pointer: pointer.to_string(),
                member: member.to_string(),
            });
        }
    }
    Ok(())
}
