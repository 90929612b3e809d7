//! Field-level validation built on `validator`.
//!
//! Every violation is kept, not just the first one, so callers can report the
//! full list back to the client.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::DomainError;

/// A single violated rule on a single field, e.g. `("title", "length")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

/// Run the input's declared rules and collect every failure.
pub fn validate<T: Validate>(input: &T) -> Result<(), DomainError> {
    input
        .validate()
        .map_err(|errors| DomainError::Validation(field_errors(&errors)))
}

/// Flatten `validator`'s error map into `(field, rule)` pairs sorted by field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(move |e| FieldError::new(field.clone(), e.code.to_string()))
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(required, length(min = 3, max = 100))]
        title: Option<String>,
        #[validate(required, length(min = 10))]
        body: Option<String>,
    }

    #[test]
    fn test_collects_every_violation() {
        let input = Sample {
            title: Some("ab".to_string()),
            body: None,
        };

        let Err(DomainError::Validation(errors)) = validate(&input) else {
            panic!("expected validation failure");
        };

        assert_eq!(
            errors,
            vec![
                FieldError::new("body", "required"),
                FieldError::new("title", "length"),
            ]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // four bytes, two characters
        let input = Sample {
            title: Some("éé".to_string()),
            body: Some("ééééééééééé".to_string()),
        };

        let Err(DomainError::Validation(errors)) = validate(&input) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors, vec![FieldError::new("title", "length")]);
    }
}
