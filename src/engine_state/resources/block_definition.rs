//! # Block Definitions
//!
//! A block definition (a "blockstate" file) describes which property combinations a
//! block type accepts. Variant-style definitions enumerate them as keys such as
//! `facing=north,half=top`; multipart definitions compose models from conditions and
//! do not restrict values.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::ResourceError;

/// Result of checking one property against a block definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMatch {
    /// The property exists and the value is accepted
    Allowed,
    /// The block type has no property with this name
    UnknownProperty,
    /// The property exists but does not accept this value
    InvalidValue,
}

/// The accepted properties of a single block type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDefinition {
    /// Namespaced block identifier
    pub id: String,
    properties: BTreeMap<String, BTreeSet<String>>,
    unrestricted: bool,
}

impl BlockDefinition {
    /// Creates a definition that accepts any property and value.
    pub fn unrestricted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
            unrestricted: true,
        }
    }

    /// Creates a definition from an explicit property table.
    ///
    /// # Arguments
    /// * `id` - Namespaced block identifier
    /// * `properties` - Property names with their accepted values
    pub fn with_properties<I, V>(id: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (String, V)>,
        V: IntoIterator<Item = String>,
    {
        Self {
            id: id.into(),
            properties: properties
                .into_iter()
                .map(|(name, values)| (name, values.into_iter().collect()))
                .collect(),
            unrestricted: false,
        }
    }

    /// Parses a blockstate JSON document.
    ///
    /// # Arguments
    /// * `id` - Namespaced block identifier
    /// * `json` - The blockstate document, with either a `variants` or `multipart` key
    ///
    /// # Returns
    /// The parsed definition, or `ResourceError::MalformedBlockDefinition` if the
    /// document has neither key
    pub fn from_json(id: &str, json: &Value) -> Result<Self, ResourceError> {
        if json.get("multipart").is_some() {
            return Ok(Self::unrestricted(id));
        }

        let Some(variants) = json.get("variants").and_then(Value::as_object) else {
            return Err(ResourceError::MalformedBlockDefinition { id: id.to_string() });
        };

        let mut properties: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for key in variants.keys() {
            for pair in key.split(',').filter(|pair| !pair.is_empty()) {
                let Some((name, value)) = pair.split_once('=') else {
                    return Err(ResourceError::MalformedBlockDefinition { id: id.to_string() });
                };
                properties
                    .entry(name.trim().to_string())
                    .or_default()
                    .insert(value.trim().to_string());
            }
        }

        Ok(Self {
            id: id.to_string(),
            properties,
            unrestricted: false,
        })
    }

    /// Names of the properties this block type declares.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Checks a single `name=value` pair against the definition.
    pub fn check_property(&self, name: &str, value: &str) -> PropertyMatch {
        if self.unrestricted {
            return PropertyMatch::Allowed;
        }
        match self.properties.get(name) {
            None => PropertyMatch::UnknownProperty,
            Some(values) if values.contains(value) => PropertyMatch::Allowed,
            Some(_) => PropertyMatch::InvalidValue,
        }
    }
}
