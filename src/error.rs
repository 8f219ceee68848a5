use thiserror::Error;

use crate::validation::ValidationIssue;

#[derive(Error, Debug)]
pub enum PetSchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised when input values do not satisfy a model schema.
///
/// Holds every error-severity issue found, each naming the offending field,
/// the expected type and what was actually received.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", render(.model, .issues))]
pub struct ValidationError {
    pub model: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Create an error for `model` from its error-severity issues
    pub fn new(model: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            model: model.into(),
            issues,
        }
    }

    /// All issues, in report order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Names of the failing fields, in report order and without duplicates
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for issue in &self.issues {
            if !fields.contains(&issue.field.as_str()) {
                fields.push(&issue.field);
            }
        }
        fields
    }

    /// Whether any issue concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// First issue reported for `field`
    pub fn issue_for(&self, field: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }
}

fn render(model: &str, issues: &[ValidationIssue]) -> String {
    let plural = if issues.len() == 1 { "" } else { "s" };
    let mut out = format!("{} validation error{} for {}", issues.len(), plural, model);
    for issue in issues {
        let field = if issue.field.is_empty() {
            model
        } else {
            issue.field.as_str()
        };
        out.push('\n');
        out.push_str(field);
        out.push_str("\n  ");
        out.push_str(&issue.to_string());
    }
    out
}

pub type Result<T> = std::result::Result<T, PetSchemaError>;
