// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic XML element tree used to carry remote results unmodified.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One XML element from a SOAP response.
///
/// Names are local names (namespace prefixes stripped). `xmlns` declarations are
/// not kept as attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapValue {
    /// Element local name
    pub name: String,
    /// Attributes keyed by local name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Concatenated text content, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child elements in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SoapValue>,
}

impl SoapValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child element.
    #[must_use]
    pub fn with_child(mut self, child: SoapValue) -> Self {
        self.children.push(child);
        self
    }

    /// First direct child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&SoapValue> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given local name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    /// Attribute value by local name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Depth-first search for the first element (self included) with the given local name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SoapValue> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Consume the element, returning its children.
    #[must_use]
    pub fn into_children(self) -> Vec<SoapValue> {
        self.children
    }
}
