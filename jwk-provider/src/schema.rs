//! Schema declarations for the provider, its resources and functions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value type of a schema attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Number,
    Bool,
    List(Box<AttributeType>),
}

/// A single attribute of a resource or provider schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub sensitive: bool,
    /// Changing the value forces new key material
    #[serde(default)]
    pub requires_replace: bool,
}

impl Attribute {
    fn of(attr_type: AttributeType) -> Self {
        Self {
            attr_type,
            description: String::new(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            requires_replace: false,
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeType::String)
    }

    pub fn number() -> Self {
        Self::of(AttributeType::Number)
    }

    pub fn bool() -> Self {
        Self::of(AttributeType::Bool)
    }

    pub fn list_of(element: AttributeType) -> Self {
        Self::of(AttributeType::List(Box::new(element)))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Schema of a resource type or of the provider block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of attributes the user must set
    pub fn required_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.required)
            .map(|(n, _)| n.as_str())
    }

    /// Names of attributes whose values are secret
    pub fn sensitive_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(n, _)| n.as_str())
    }
}

/// A positional function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: AttributeType,
}

impl Parameter {
    pub fn string(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type: AttributeType::String,
        }
    }
}

/// Signature and documentation of a provider function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "return")]
    pub return_type: AttributeType,
}
