/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Encoding type used by an [`Action`] when none is given.
pub const DEFAULT_ACTION_TYPE: &str = "application/json";

/// Failed to parse a [`Method`] or [`InputType`] from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseVariantError {
    kind: &'static str,
    value: String,
}

impl ParseVariantError {
    /// The wire value that could not be parsed.
    pub fn value(&self) -> &str {
        &self.value
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseVariantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseVariantError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum!(
    /// Protocol method an [`Action`] maps to. When omitted, `GET` is assumed.
    Method, "method", default = Get {
        /// `GET`
        Get => "GET",
        /// `POST`
        Post => "POST",
        /// `PUT`
        Put => "PUT",
        /// `PATCH`
        Patch => "PATCH",
        /// `DELETE`
        Delete => "DELETE",
    }
);

wire_enum!(
    /// Input type of a [`Field`], one of the HTML5 `input` element types.
    InputType, "input type", default = Text {
        /// `hidden`
        Hidden => "hidden",
        /// `text`
        Text => "text",
        /// `search`
        Search => "search",
        /// `tel`
        Tel => "tel",
        /// `url`
        Url => "url",
        /// `email`
        Email => "email",
        /// `password`
        Password => "password",
        /// `datetime`
        Datetime => "datetime",
        /// `date`
        Date => "date",
        /// `month`
        Month => "month",
        /// `week`
        Week => "week",
        /// `time`
        Time => "time",
        /// `number`
        Number => "number",
        /// `range`
        Range => "range",
        /// `color`
        Color => "color",
        /// `checkbox`
        Checkbox => "checkbox",
        /// `radio`
        Radio => "radio",
        /// `file`
        File => "file",
        /// `image`
        Image => "image",
        /// `button`
        Button => "button",
    }
);

/// A behavior an entity exposes: a method, a target URI and optional input fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Identifies the action to be performed. Required.
    pub name: String,
    /// Describes the nature of the action. Seeded with `name` by [`Action::new`].
    pub class: Vec<String>,
    /// Protocol method used to invoke the action.
    pub method: Method,
    /// The URI of the action. Required.
    pub href: String,
    /// Descriptive text about the action.
    pub title: Option<String>,
    /// Encoding type for the request.
    pub type_: String,
    /// Input controls submitted with the action.
    pub fields: Vec<Field>,
}

impl Action {
    /// Creates an action whose `class` holds `name` and whose type is [`DEFAULT_ACTION_TYPE`].
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        method: Method,
        href: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            class: vec![name.clone()],
            name,
            method,
            href: href.into(),
            title: Some(title.into()),
            type_: DEFAULT_ACTION_TYPE.to_string(),
            fields: Vec::new(),
        }
    }

    /// Overrides the encoding type.
    pub fn media_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = type_.into();
        self
    }

    /// Appends an input field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// An input control inside an [`Action`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    /// A name describing the control. Required.
    pub name: String,
    /// Input type of the control. Defaults to `text`.
    pub type_: InputType,
    /// A value assigned to the control.
    pub value: Option<Value>,
    /// Textual annotation, usable as a label.
    pub title: Option<String>,
}

impl Field {
    /// Creates a `text` field with no value or title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the input type.
    pub fn input_type(mut self, type_: InputType) -> Self {
        self.type_ = type_;
        self
    }

    /// Sets the value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
