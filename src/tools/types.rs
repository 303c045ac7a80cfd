//! Tool-related types: descriptors, model-facing schemas, results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A tool as advertised by the tool server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: ParameterSchema,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ParameterSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Build a descriptor from a raw MCP `inputSchema` object.
    ///
    /// Missing or mistyped `properties`/`required` are read as empty; the
    /// server stays responsible for the schema's correctness.
    pub fn from_input_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: &serde_json::Value,
    ) -> Self {
        let properties = input_schema
            .get("properties")
            .and_then(|v| v.as_object())
            .map(|props| {
                props
                    .iter()
                    .map(|(k, v)| (k.clone(), ParameterSpec::from(v.clone())))
                    .collect()
            })
            .unwrap_or_default();
        let required = input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .map(|names| {
                names
                    .iter()
                    .filter_map(|n| n.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self::new(name, description, ParameterSchema { properties, required })
    }
}

/// Named parameters of a tool and which of them are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, ParameterSpec>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl ParameterSchema {
    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            schema: ParameterSchema::default(),
        }
    }

    pub fn declares(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }
}

/// Builder for constructing parameter schemas by hand.
pub struct ParameterBuilder {
    schema: ParameterSchema,
}

impl ParameterBuilder {
    /// Add a string property.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.typed(name, ValueKind::String, description, required)
    }

    /// Add a number property.
    pub fn number(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.typed(name, ValueKind::Number, description, required)
    }

    /// Add a boolean property.
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.typed(name, ValueKind::Boolean, description, required)
    }

    /// Add an enum (string) property.
    pub fn string_enum(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let spec = ParameterSpec::from(serde_json::json!({
            "type": "string",
            "description": description.into(),
            "enum": values,
        }));
        self.insert(name.into(), spec, required);
        self
    }

    fn typed(
        mut self,
        name: impl Into<String>,
        kind: ValueKind,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let spec = ParameterSpec::from(serde_json::json!({
            "type": kind.to_string(),
            "description": description.into(),
        }));
        self.insert(name.into(), spec, required);
        self
    }

    fn insert(&mut self, name: String, spec: ParameterSpec, required: bool) {
        if required {
            self.schema.required.push(name.clone());
        }
        self.schema.properties.insert(name, spec);
    }

    pub fn build(self) -> ParameterSchema {
        self.schema
    }
}

/// JSON value type declared for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    Unknown,
}

impl ValueKind {
    fn of_schema(schema: &serde_json::Value) -> Self {
        schema
            .get("type")
            .and_then(|t| t.as_str())
            .and_then(|t| t.parse().ok())
            .unwrap_or(ValueKind::Unknown)
    }
}

/// One parameter's schema: the raw JSON as advertised plus its declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub struct ParameterSpec {
    pub kind: ValueKind,
    pub schema: serde_json::Value,
}

impl From<serde_json::Value> for ParameterSpec {
    fn from(schema: serde_json::Value) -> Self {
        Self {
            kind: ValueKind::of_schema(&schema),
            schema,
        }
    }
}

impl From<ParameterSpec> for serde_json::Value {
    fn from(spec: ParameterSpec) -> Self {
        spec.schema
    }
}

/// Function declaration in the chat model's tool-calling format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub function: FunctionSchema,
}

impl ToolSchema {
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: ObjectSchema,
}

/// Closed object schema: only declared properties are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub properties: BTreeMap<String, ParameterSpec>,
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Object,
}

/// Content returned by a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolContent {
    /// A single text value, used verbatim.
    Text(String),
    /// Ordered content items, each serialized to JSON text.
    Items(Vec<serde_json::Value>),
    /// Any other shape. Normalizes to empty text.
    Unsupported(serde_json::Value),
}

/// Separator placed between serialized content items.
pub const CONTENT_ITEM_SEPARATOR: &str = ", ";

impl ToolContent {
    /// Flatten the content into the text fed back to the model.
    pub fn to_text(&self) -> String {
        match self {
            ToolContent::Text(text) => text.clone(),
            ToolContent::Items(items) => items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(CONTENT_ITEM_SEPARATOR),
            ToolContent::Unsupported(value) => {
                tracing::debug!(shape = %json_type_name(value), "unsupported tool content shape");
                String::new()
            }
        }
    }
}

impl From<serde_json::Value> for ToolContent {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => ToolContent::Text(text),
            serde_json::Value::Array(items) => ToolContent::Items(items),
            other => ToolContent::Unsupported(other),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
