//! Declared output schemas in Gemini's `responseSchema` format, plus a
//! fail-closed validator for the parsed output.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::{LlmError, LlmResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ResponseSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ResponseSchema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
        }
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    pub fn array_of(items: ResponseSchema) -> Self {
        let mut schema = Self::of(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn require(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Check `value` against this schema. Required properties must be present
    /// and non-null; every declared property that is present must have the
    /// declared type. Undeclared properties are ignored.
    pub fn validate(&self, value: &Value) -> LlmResult<()> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> LlmResult<()> {
        let type_ok = match self.kind {
            SchemaType::Object => value.is_object(),
            SchemaType::Array => value.is_array(),
            SchemaType::String => value.is_string(),
            SchemaType::Boolean => value.is_boolean(),
        };
        if !type_ok {
            return Err(LlmError::SchemaViolation(format!(
                "{} should be {:?}, got {}",
                path,
                self.kind,
                json_type_name(value)
            )));
        }

        match value {
            Value::Object(map) => {
                for name in &self.required {
                    if map.get(name).map_or(true, Value::is_null) {
                        return Err(LlmError::SchemaViolation(format!(
                            "{}.{} is required",
                            path, name
                        )));
                    }
                }
                for (name, schema) in &self.properties {
                    match map.get(name) {
                        Some(Value::Null) | None => {}
                        Some(field) => schema.validate_at(&format!("{}.{}", path, name), field)?,
                    }
                }
            }
            Value::Array(items) => {
                if let Some(item_schema) = &self.items {
                    for (i, item) in items.iter().enumerate() {
                        item_schema.validate_at(&format!("{}[{}]", path, i), item)?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
