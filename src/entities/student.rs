// 🎓 Student Entity - Immutable record
//
// No setters: a changed student is a new value. The caller's score buffer is
// copied on the way in, so later edits to it never reach the record.

use crate::attributes::{Attr, AttributeRegistry, FieldValue};
use crate::entities::report;
use crate::schema::{collect_failures, Validate, ValidationFailure, ValidationResult};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_NAME: &str = "DefaultName";
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct Student {
    name: String,

    /// None when only the name was given
    age: Option<i64>,

    scores: Vec<i64>,

    #[serde(skip)]
    rules: Arc<AttributeRegistry>,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        age: i64,
        scores: &[i64],
    ) -> Result<Self, ValidationFailure> {
        Self::with_rules(name, Some(age), scores, Arc::new(AttributeRegistry::new()))
    }

    /// Student whose age is not known
    pub fn named(name: impl Into<String>) -> Result<Self, ValidationFailure> {
        Self::with_rules(name, None, &[], Arc::new(AttributeRegistry::new()))
    }

    /// Student known only by age
    pub fn aged(age: i64) -> Result<Self, ValidationFailure> {
        Self::with_rules(DEFAULT_NAME, Some(age), &[], Arc::new(AttributeRegistry::new()))
    }

    pub fn with_rules(
        name: impl Into<String>,
        age: Option<i64>,
        scores: &[i64],
        rules: Arc<AttributeRegistry>,
    ) -> Result<Self, ValidationFailure> {
        let name = name.into();
        report("student", "new", Self::check(&rules, &name, age, scores))?;

        Ok(Student {
            name,
            age,
            scores: scores.to_vec(),
            rules,
        })
    }

    fn check(
        rules: &AttributeRegistry,
        name: &str,
        age: Option<i64>,
        scores: &[i64],
    ) -> Result<(), ValidationFailure> {
        rules.validate(Attr::StudentName, FieldValue::Text(name))?;
        if let Some(age) = age {
            rules.validate(Attr::StudentAge, FieldValue::Integer(age))?;
        }
        scores
            .iter()
            .try_for_each(|&score| rules.validate(Attr::StudentScore, FieldValue::Integer(score)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<i64> {
        self.age
    }

    /// Read-only view; the record cannot be changed through it
    pub fn scores(&self) -> &[i64] {
        &self.scores
    }

    pub fn average(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let total: i64 = self.scores.iter().sum();
        Some(total as f64 / self.scores.len() as f64)
    }

    /// New record with one more score; this one is left as it was
    pub fn with_score(&self, score: i64) -> Result<Student, ValidationFailure> {
        report(
            "student",
            "with_score",
            self.rules.validate(Attr::StudentScore, FieldValue::Integer(score)),
        )?;

        let mut next = self.clone();
        next.scores.push(score);
        Ok(next)
    }

    /// New record under a different name
    pub fn with_name(&self, name: impl Into<String>) -> Result<Student, ValidationFailure> {
        let name = name.into();
        report(
            "student",
            "with_name",
            self.rules.validate(Attr::StudentName, FieldValue::Text(&name)),
        )?;

        Ok(Student {
            name,
            ..self.clone()
        })
    }
}

impl Default for Student {
    fn default() -> Self {
        Student {
            name: UNKNOWN_NAME.to_string(),
            age: Some(0),
            scores: Vec::new(),
            rules: Arc::new(AttributeRegistry::new()),
        }
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.age == other.age && self.scores == other.scores
    }
}

impl Validate for Student {
    fn validate(&self, registry: &AttributeRegistry) -> ValidationResult {
        let age_check = match self.age {
            Some(age) => registry.validate(Attr::StudentAge, FieldValue::Integer(age)),
            None => Ok(()),
        };

        let checks = [
            registry.validate(Attr::StudentName, FieldValue::Text(&self.name)),
            age_check,
        ];
        let score_checks = self
            .scores
            .iter()
            .map(|&score| registry.validate(Attr::StudentScore, FieldValue::Integer(score)));

        collect_failures(checks.into_iter().chain(score_checks))
    }
}

// ============================================================================
// TESTS
// ============================================================================
