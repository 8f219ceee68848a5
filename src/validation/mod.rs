pub mod coercion;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::core::{UnknownFieldPolicy, ValidationConfig};
use crate::error::ValidationError;
use crate::types::{FieldType, FieldValue, ModelSchema, ValueKind};

pub use coercion::coerce;

/// Validated values of a record, keyed by field name
pub type FieldValues = HashMap<String, FieldValue>;

/// Core validation engine trait for checking dynamic input against a model schema
pub trait ValidationEngine {
    /// Validate one input object against a schema
    fn validate_record(&self, input: &Value, schema: &ModelSchema) -> ValidationResult;

    /// Validate several input objects independently
    fn validate_batch(&self, inputs: &[Value], schema: &ModelSchema) -> Vec<ValidationResult> {
        inputs
            .iter()
            .map(|input| self.validate_record(input, schema))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Missing,
    ModelType,
    StringType,
    IntType,
    IntOutOfRange,
    FloatType,
    BoolType,
    ExtraForbidden,
    ExtraIgnored,
}

impl IssueCode {
    /// Code reported when a value does not have the declared `field_type`
    pub fn type_mismatch(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => IssueCode::StringType,
            FieldType::Integer => IssueCode::IntType,
            FieldType::Float => IssueCode::FloatType,
            FieldType::Boolean => IssueCode::BoolType,
        }
    }

    /// Stable snake_case identifier, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::Missing => "missing",
            IssueCode::ModelType => "model_type",
            IssueCode::StringType => "string_type",
            IssueCode::IntType => "int_type",
            IssueCode::IntOutOfRange => "int_out_of_range",
            IssueCode::FloatType => "float_type",
            IssueCode::BoolType => "bool_type",
            IssueCode::ExtraForbidden => "extra_forbidden",
            IssueCode::ExtraIgnored => "extra_ignored",
        }
    }

    /// Message attached to new issues with this code
    pub fn default_message(&self) -> &'static str {
        match self {
            IssueCode::Missing => "Field required",
            IssueCode::ModelType => "Input should be a valid dictionary",
            IssueCode::StringType => "Input should be a valid string",
            IssueCode::IntType => "Input should be a valid integer",
            IssueCode::IntOutOfRange => {
                "Input should be a valid integer, got a number that does not fit in 64 bits"
            }
            IssueCode::FloatType => "Input should be a valid number",
            IssueCode::BoolType => "Input should be a valid boolean",
            IssueCode::ExtraForbidden => "Extra inputs are not permitted",
            IssueCode::ExtraIgnored => "Extra input ignored",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// One finding produced while validating a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub code: IssueCode,
    /// Field the issue is about; empty for issues about the whole input
    pub field: String,
    pub message: String,
    pub expected: Option<FieldType>,
    /// The offending input value; `None` when the field was absent
    pub input: Option<Value>,

    /// Textual form of a received float JSON cannot represent (NaN, inf)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_finite_input: Option<String>,
}

impl ValidationIssue {
    /// Create an error-severity issue with the code's default message
    pub fn error(code: IssueCode, field: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Error,
            code,
            field: field.into(),
            message: code.default_message().to_string(),
            expected: None,
            input: None,
            non_finite_input: None,
        }
    }

    /// Error for a field whose value is not of its declared type
    pub fn type_mismatch(field: impl Into<String>, expected: FieldType) -> Self {
        Self::error(IssueCode::type_mismatch(expected), field).with_expected(expected)
    }

    /// Create a warning-severity issue with the code's default message
    pub fn warning(code: IssueCode, field: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Warning,
            ..Self::error(code, field)
        }
    }

    /// Record the type the field declares
    pub fn with_expected(mut self, expected: FieldType) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Record the value that was received
    pub fn with_input(mut self, input: &Value) -> Self {
        self.input = Some(input.clone());
        self
    }

    /// Record a received float that has no JSON form
    pub fn with_non_finite_input(mut self, value: f64) -> Self {
        self.input = None;
        self.non_finite_input = Some(value.to_string());
        self
    }

    /// Whether this issue invalidates the record
    pub fn is_error(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }

    /// Kind of the received value, if one was received
    pub fn received(&self) -> Option<ValueKind> {
        match (&self.input, &self.non_finite_input) {
            (Some(input), _) => Some(ValueKind::of(input)),
            (None, Some(_)) => Some(ValueKind::Float),
            (None, None) => None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [type={}", self.message, self.code)?;
        if let Some(expected) = self.expected {
            write!(f, ", expected={expected}")?;
        }
        if let Some(input) = &self.input {
            write!(f, ", input_value={input}, input_type={}", ValueKind::of(input))?;
        } else if let Some(raw) = &self.non_finite_input {
            write!(f, ", input_value={raw}, input_type={}", ValueKind::Float)?;
        }
        write!(f, "]")
    }
}

/// Validation context that maintains state while a record is checked
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Field currently being validated
    pub current_field: Option<String>,

    /// Collection of validation issues found
    pub issues: Vec<ValidationIssue>,

    /// Values that passed coercion so far
    pub values: FieldValues,

    pub fail_fast: bool,
}

impl ValidationContext {
    /// Create an empty context for one record
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            current_field: None,
            issues: Vec::new(),
            values: HashMap::new(),
            fail_fast: config.fail_fast,
        }
    }

    /// Mark `field` as the one being validated
    pub fn enter_field(&mut self, field: &str) {
        self.current_field = Some(field.to_string());
    }

    /// Clear the current field
    pub fn leave_field(&mut self) {
        self.current_field = None;
    }

    /// Add an issue, attributing it to the current field when it names none
    pub fn add_issue(&mut self, mut issue: ValidationIssue) {
        if issue.field.is_empty() {
            if let Some(field) = &self.current_field {
                issue.field = field.clone();
            }
        }
        self.issues.push(issue);
    }

    /// Store the coerced value of a field
    pub fn set_value(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_string(), value);
    }

    /// Whether any error-severity issue has been recorded
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }

    /// Whether the engine should stop collecting further issues
    pub fn should_stop(&self) -> bool {
        self.fail_fast && self.has_errors()
    }

    /// Convert the context into a validation result
    pub fn into_result(self, model: impl Into<String>) -> ValidationResult {
        ValidationResult::new(model, self.issues, self.values)
    }
}

/// Outcome of validating one record
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub model: String,

    /// All validation issues found
    pub issues: Vec<ValidationIssue>,

    /// Whether validation passed (no errors)
    pub is_valid: bool,

    pub error_count: usize,
    pub warning_count: usize,

    /// Coerced values; complete only when `is_valid`
    pub values: FieldValues,
}

impl ValidationResult {
    /// Build a result, deriving validity and counts from `issues`
    pub fn new(model: impl Into<String>, issues: Vec<ValidationIssue>, values: FieldValues) -> Self {
        let error_count = issues.iter().filter(|i| i.is_error()).count();
        let warning_count = issues.len() - error_count;

        Self {
            model: model.into(),
            is_valid: error_count == 0,
            issues,
            error_count,
            warning_count,
            values,
        }
    }

    /// Error-severity issues
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    /// Warning-severity issues
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    /// Validated values, or a [`ValidationError`] listing every error issue
    pub fn into_values(self) -> Result<FieldValues, ValidationError> {
        if self.is_valid {
            Ok(self.values)
        } else {
            let errors = self.errors().cloned().collect();
            Err(ValidationError::new(self.model, errors))
        }
    }
}

/// Schema-driven implementation of [`ValidationEngine`]
#[derive(Debug, Clone, Default)]
pub struct ModelValidationEngine {
    config: ValidationConfig,
}

impl ModelValidationEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Configuration this engine validates with
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn validate_fields(
        &self,
        input: &serde_json::Map<String, Value>,
        schema: &ModelSchema,
        context: &mut ValidationContext,
    ) {
        for field in &schema.fields {
            if context.should_stop() {
                return;
            }
            context.enter_field(&field.name);

            match input.get(&field.name) {
                None if field.required => {
                    context.add_issue(
                        ValidationIssue::error(IssueCode::Missing, "")
                            .with_expected(field.field_type),
                    );
                }
                None => {}
                Some(value) => match coerce(value, field.field_type) {
                    Ok(coerced) => {
                        tracing::trace!(field = %field.name, "field accepted");
                        context.set_value(&field.name, coerced);
                    }
                    Err(code) => {
                        tracing::trace!(field = %field.name, code = %code, "field rejected");
                        context.add_issue(
                            ValidationIssue::error(code, "")
                                .with_expected(field.field_type)
                                .with_input(value),
                        );
                    }
                },
            }

            context.leave_field();
        }
    }

    fn validate_unknown_fields(
        &self,
        input: &serde_json::Map<String, Value>,
        schema: &ModelSchema,
        context: &mut ValidationContext,
    ) {
        for (key, value) in input {
            if context.should_stop() {
                return;
            }
            if schema.field(key).is_some() {
                continue;
            }

            let issue = match self.config.unknown_fields {
                UnknownFieldPolicy::Reject => ValidationIssue::error(IssueCode::ExtraForbidden, key),
                UnknownFieldPolicy::Ignore => ValidationIssue::warning(IssueCode::ExtraIgnored, key),
            };
            context.add_issue(issue.with_input(value));
        }
    }
}

impl ValidationEngine for ModelValidationEngine {
    fn validate_record(&self, input: &Value, schema: &ModelSchema) -> ValidationResult {
        let mut context = ValidationContext::new(&self.config);

        match input {
            Value::Object(map) => {
                self.validate_fields(map, schema, &mut context);
                self.validate_unknown_fields(map, schema, &mut context);
            }
            other => {
                context
                    .add_issue(ValidationIssue::error(IssueCode::ModelType, "").with_input(other));
            }
        }

        let result = context.into_result(&schema.name);
        tracing::debug!(
            model = %result.model,
            valid = result.is_valid,
            errors = result.error_count,
            warnings = result.warning_count,
            "validated record"
        );
        result
    }
}
