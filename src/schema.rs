// 📐 Shape Layer - Validation failures and whole-holder checks
// A single failure kind, returned instead of printed

use crate::attributes::AttributeRegistry;
use thiserror::Error;

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// An input that fails the predicate of the field it targets
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field}: amount must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("{field}: must not be blank")]
    Blank { field: &'static str },

    #[error("{field}: must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field}: needs at least {min} characters, got {len}")]
    TooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },
}

impl ValidationFailure {
    /// Name of the field the rejected input targeted
    pub fn field(&self) -> &'static str {
        match self {
            ValidationFailure::OutOfRange { field, .. }
            | ValidationFailure::NotPositive { field, .. }
            | ValidationFailure::Negative { field, .. }
            | ValidationFailure::Blank { field }
            | ValidationFailure::NotFinite { field }
            | ValidationFailure::TooShort { field, .. } => field,
            ValidationFailure::InsufficientBalance { .. } => "balance",
        }
    }
}

/// Outcome of checking every field of a holder at once
pub type ValidationResult = Result<(), Vec<ValidationFailure>>;

// ============================================================================
// SCHEMA VALIDATION
// ============================================================================

/// Re-check every field of a holder against the registry
///
/// Holders already enforce their rules on construction and mutation, so for a
/// holder built through its own API this always returns `Ok(())`.
pub trait Validate {
    fn validate(&self, registry: &AttributeRegistry) -> ValidationResult;
}

/// Fold individual field checks into one result, keeping every failure
pub fn collect_failures<I>(checks: I) -> ValidationResult
where
    I: IntoIterator<Item = Result<(), ValidationFailure>>,
{
    let errors: Vec<ValidationFailure> = checks.into_iter().filter_map(Result::err).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// TESTS
// ============================================================================
