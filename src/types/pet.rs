use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use super::{FieldInput, FieldType, FieldValue, ModelSchema};
use crate::core::ValidationConfig;
use crate::error::ValidationError;
use crate::validation::{
    FieldValues, IssueCode, ModelValidationEngine, ValidationEngine, ValidationIssue,
    ValidationResult,
};

static PET_SCHEMA: LazyLock<ModelSchema> = LazyLock::new(ModelSchema::pet);

/// A pet record whose fields have passed schema validation.
///
/// Fields are private: a `Pet` is either built from statically typed values
/// with [`Pet::new`], which still rejects a non-finite weight, or from dynamic
/// input through [`Pet::try_new`], [`Pet::from_value`] or serde
/// deserialization, all of which validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Pet {
    name: String,
    age: i64,
    weight: f64,
    is_vaccinated: bool,
}

impl Pet {
    /// Build a pet from statically typed values; `weight` must be finite
    pub fn new(
        name: impl Into<String>,
        age: i64,
        weight: f64,
        is_vaccinated: bool,
    ) -> Result<Self, ValidationError> {
        if !weight.is_finite() {
            return Err(ValidationError::new(
                Self::schema().name.clone(),
                vec![
                    ValidationIssue::type_mismatch("weight", FieldType::Float)
                        .with_non_finite_input(weight),
                ],
            ));
        }

        Ok(Self {
            name: name.into(),
            age,
            weight,
            is_vaccinated,
        })
    }

    /// Build a pet from four dynamic values, validating each against its declared type
    pub fn try_new(
        name: impl Into<FieldInput>,
        age: impl Into<FieldInput>,
        weight: impl Into<FieldInput>,
        is_vaccinated: impl Into<FieldInput>,
    ) -> Result<Self, ValidationError> {
        let schema = Self::schema();
        let mut input = serde_json::Map::new();
        let mut non_finite = Vec::new();
        let arguments = [
            ("name", name.into()),
            ("age", age.into()),
            ("weight", weight.into()),
            ("is_vaccinated", is_vaccinated.into()),
        ];
        for (field, argument) in arguments {
            match argument {
                FieldInput::Json(value) => {
                    input.insert(field.to_string(), value);
                }
                FieldInput::NonFinite(value) => non_finite.push((field, value)),
            }
        }

        let result = ModelValidationEngine::new().validate_record(&Value::Object(input), schema);
        if non_finite.is_empty() {
            return Self::from_validated(result);
        }

        // Non-finite floats never reached the engine, which reported them missing.
        let mut issues: Vec<ValidationIssue> = result
            .issues
            .into_iter()
            .filter(|issue| {
                issue.is_error() && !non_finite.iter().any(|(field, _)| *field == issue.field)
            })
            .collect();
        for (field, value) in non_finite {
            if let Some(definition) = schema.field(field) {
                issues.push(
                    ValidationIssue::type_mismatch(field, definition.field_type)
                        .with_non_finite_input(value),
                );
            }
        }
        issues.sort_by_key(|issue| schema.field_names().position(|name| name == issue.field));
        Err(ValidationError::new(schema.name.clone(), issues))
    }

    /// Validate a JSON object using the default configuration
    pub fn from_value(input: &Value) -> Result<Self, ValidationError> {
        Self::from_value_with(input, &ValidationConfig::default())
    }

    /// Validate a JSON object using an explicit configuration
    pub fn from_value_with(
        input: &Value,
        config: &ValidationConfig,
    ) -> Result<Self, ValidationError> {
        let engine = ModelValidationEngine::with_config(config.clone());
        Self::from_validated(engine.validate_record(input, Self::schema()))
    }

    /// Build a pet from the outcome of validating input against [`Pet::schema`]
    pub fn from_validated(result: ValidationResult) -> Result<Self, ValidationError> {
        Self::from_field_values(result.into_values()?)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(raw: &str) -> crate::Result<Self> {
        let input: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&input)?)
    }

    /// The schema every pet is validated against
    pub fn schema() -> &'static ModelSchema {
        &PET_SCHEMA
    }

    fn from_field_values(mut values: FieldValues) -> Result<Self, ValidationError> {
        let schema = Self::schema();
        let (mut name, mut age, mut weight, mut is_vaccinated) = (None, None, None, None);
        let mut issues = Vec::new();

        for definition in &schema.fields {
            let field = definition.name.as_str();
            match (field, values.remove(field)) {
                (_, None) => issues.push(
                    ValidationIssue::error(IssueCode::Missing, field)
                        .with_expected(definition.field_type),
                ),
                ("name", Some(FieldValue::Text(value))) => name = Some(value),
                ("age", Some(FieldValue::Integer(value))) => age = Some(value),
                ("weight", Some(FieldValue::Float(value))) => weight = Some(value),
                ("is_vaccinated", Some(FieldValue::Boolean(value))) => is_vaccinated = Some(value),
                (_, Some(other)) => issues.push(
                    ValidationIssue::type_mismatch(field, definition.field_type)
                        .with_input(&Value::from(other)),
                ),
            }
        }

        match (name, age, weight, is_vaccinated) {
            (Some(name), Some(age), Some(weight), Some(is_vaccinated)) if issues.is_empty() => {
                let pet = Self::new(name, age, weight, is_vaccinated)?;
                tracing::debug!(name = %pet.name, "constructed Pet");
                Ok(pet)
            }
            _ => Err(ValidationError::new(schema.name.clone(), issues)),
        }
    }

    /// Name of the pet
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in whole years
    pub fn age(&self) -> i64 {
        self.age
    }

    /// Weight; always finite
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether vaccinations are current
    pub fn is_vaccinated(&self) -> bool {
        self.is_vaccinated
    }

    /// Copy of this pet with a different age
    pub fn with_age(&self, age: i64) -> Self {
        Self {
            age,
            ..self.clone()
        }
    }

    /// Dump as a JSON object with every field
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "age": self.age,
            "weight": self.weight,
            "is_vaccinated": self.is_vaccinated,
        })
    }

    /// Dump as a JSON object without the named fields. Unknown names are ignored.
    pub fn to_value_excluding(&self, exclude: &[&str]) -> Value {
        let mut value = self.to_value();
        if let Value::Object(map) = &mut value {
            for field in exclude {
                map.remove(*field);
            }
        }
        value
    }

    /// Serialize as a compact JSON string
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl TryFrom<Value> for Pet {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl TryFrom<&Value> for Pet {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pet(name={:?}, age={}, weight={:?}, is_vaccinated={})",
            self.name, self.age, self.weight, self.is_vaccinated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_matches_validated_construction() {
        let typed = Pet::new("Rex", 3, 12.0, true).unwrap();
        let dynamic = Pet::try_new("Rex", 3, 12, true).unwrap();
        assert_eq!(typed, dynamic);
    }

    #[test]
    fn test_display() {
        let pet = Pet::new("Rex", 3, 12.0, true).unwrap();
        assert_eq!(
            pet.to_string(),
            "Pet(name=\"Rex\", age=3, weight=12.0, is_vaccinated=true)"
        );
    }

    #[test]
    fn test_with_age_leaves_original_untouched() {
        let pet = Pet::new("Garfield", 21, 8.5, false).unwrap();
        let older = pet.with_age(42);
        assert_eq!(pet.age(), 21);
        assert_eq!(older.age(), 42);
        assert_eq!(older.name(), "Garfield");
    }

    #[test]
    fn test_excluding_unknown_name_is_noop() {
        let pet = Pet::new("Rex", 3, 12.0, true).unwrap();
        assert_eq!(pet.to_value_excluding(&["color"]), pet.to_value());
        assert_eq!(
            pet.to_value_excluding(&["name", "weight"]),
            json!({"age": 3, "is_vaccinated": true})
        );
    }

    #[test]
    fn test_new_rejects_non_finite_weight() {
        let err = Pet::new("Rex", 3, f64::NAN, true).unwrap_err();
        let issue = err.issue_for("weight").unwrap();
        assert_eq!(issue.code, IssueCode::FloatType);
        assert_eq!(issue.non_finite_input.as_deref(), Some("NaN"));
        assert!(err.to_string().contains("input_value=NaN, input_type=float"));

        let err = Pet::new("Rex", 3, f64::INFINITY, true).unwrap_err();
        assert_eq!(err.fields(), vec!["weight"]);
        assert!(err.to_string().contains("input_value=inf"));
    }

    #[test]
    fn test_wrong_variant_in_validated_values_is_a_type_mismatch() {
        let values = FieldValues::from([
            ("name".to_string(), FieldValue::Text("Rex".to_string())),
            ("age".to_string(), FieldValue::Float(3.0)),
            ("weight".to_string(), FieldValue::Float(12.0)),
            ("is_vaccinated".to_string(), FieldValue::Boolean(true)),
        ]);
        let result = ValidationResult::new("Pet", Vec::new(), values);
        assert!(result.is_valid);

        let err = Pet::from_validated(result).unwrap_err();
        assert_eq!(err.fields(), vec!["age"]);
        let issue = err.issue_for("age").unwrap();
        assert_eq!(issue.code, IssueCode::IntType);
        assert_eq!(issue.expected, Some(FieldType::Integer));
        assert_eq!(issue.input, Some(json!(3.0)));
    }

    #[test]
    fn test_validated_values_with_absent_field_report_missing() {
        let values = FieldValues::from([
            ("name".to_string(), FieldValue::Text("Rex".to_string())),
            ("age".to_string(), FieldValue::Integer(3)),
            ("is_vaccinated".to_string(), FieldValue::Boolean(true)),
        ]);
        let err = Pet::from_validated(ValidationResult::new("Pet", Vec::new(), values)).unwrap_err();
        assert_eq!(err.issue_for("weight").unwrap().code, IssueCode::Missing);
    }
}
