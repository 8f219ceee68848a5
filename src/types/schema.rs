use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use super::FieldType;
use crate::core::{UnknownFieldPolicy, ValidationConfig};

pub const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default = "default_required")]
    pub required: bool,

    pub description: Option<String>,
}

fn default_required() -> bool {
    true
}

impl FieldDefinition {
    /// Required field without a description
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            description: None,
        }
    }

    /// Mark the field as not required
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a human-readable description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Title-cased label, e.g. `is_vaccinated` -> `Is Vaccinated`
    pub fn title(&self) -> String {
        self.name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Declarative description of a record: its name and ordered field list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSchema {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl ModelSchema {
    /// Empty schema for the model `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field definition
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Schema of the [`Pet`](crate::Pet) record
    pub fn pet() -> Self {
        Self::new("Pet")
            .with_field(
                FieldDefinition::new("name", FieldType::Text).with_description("Name of the pet"),
            )
            .with_field(
                FieldDefinition::new("age", FieldType::Integer).with_description("Age in years"),
            )
            .with_field(
                FieldDefinition::new("weight", FieldType::Float).with_description("Body weight"),
            )
            .with_field(
                FieldDefinition::new("is_vaccinated", FieldType::Boolean)
                    .with_description("Whether the pet's vaccinations are current"),
            )
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Check that the model and every field are named, with no duplicates
    pub fn validate_structure(&self) -> crate::Result<()> {
        if self.name.is_empty() {
            return Err(crate::PetSchemaError::Config {
                message: "Schema name cannot be empty".to_string(),
            });
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(crate::PetSchemaError::Config {
                    message: format!("Field #{i} of schema '{}' has an empty name", self.name),
                });
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(crate::PetSchemaError::Config {
                    message: format!(
                        "Field '{}' is declared more than once in schema '{}'",
                        field.name, self.name
                    ),
                });
            }
        }

        Ok(())
    }

    /// Export as a JSON Schema document
    pub fn to_json_schema(&self, config: &ValidationConfig) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut property = Map::new();
            property.insert("title".to_string(), Value::String(field.title()));
            property.insert(
                "type".to_string(),
                Value::String(field.field_type.json_type().to_string()),
            );
            if let Some(description) = &field.description {
                property.insert(
                    "description".to_string(),
                    Value::String(description.clone()),
                );
            }
            properties.insert(field.name.clone(), Value::Object(property));
        }

        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name.as_str())
            .collect();

        let mut schema = json!({
            "$schema": JSON_SCHEMA_DIALECT,
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        });

        if config.unknown_fields == UnknownFieldPolicy::Reject {
            schema["additionalProperties"] = Value::Bool(false);
        }

        schema
    }
}

impl fmt::Display for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelSchema({})", self.name)?;
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.field_type))
            .collect();
        write!(f, " {{{}}}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_titles() {
        let field = FieldDefinition::new("is_vaccinated", FieldType::Boolean);
        assert_eq!(field.title(), "Is Vaccinated");
        assert_eq!(FieldDefinition::new("name", FieldType::Text).title(), "Name");
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let schema = ModelSchema::new("Pet")
            .with_field(FieldDefinition::new("name", FieldType::Text))
            .with_field(FieldDefinition::new("name", FieldType::Integer));
        assert!(schema.validate_structure().is_err());
        assert!(ModelSchema::pet().validate_structure().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ModelSchema::pet().to_string(),
            "ModelSchema(Pet) {name: text, age: integer, weight: float, is_vaccinated: boolean}"
        );
    }
}
