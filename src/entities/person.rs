// 👤 Person Entity - Name and age behind validating setters
//
// Problem solved:
// - Age can never be set to -5
// - A blank name can never replace a real one
// - A rejected update tells the caller why instead of printing and returning

use crate::attributes::{Attr, AttributeRegistry, FieldValue};
use crate::entities::report;
use crate::schema::{collect_failures, Validate, ValidationFailure, ValidationResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// PERSON ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Person {
    name: String,
    age: i64,

    #[serde(skip)]
    rules: Arc<AttributeRegistry>,
}

impl Person {
    /// Create a person checked against the default bounds
    pub fn new(name: impl Into<String>, age: i64) -> Result<Self, ValidationFailure> {
        Self::with_rules(name, age, Arc::new(AttributeRegistry::new()))
    }

    /// Create a person checked against a shared registry
    pub fn with_rules(
        name: impl Into<String>,
        age: i64,
        rules: Arc<AttributeRegistry>,
    ) -> Result<Self, ValidationFailure> {
        let name = name.into();

        let checked = rules
            .validate(Attr::PersonName, FieldValue::Text(&name))
            .and_then(|_| rules.validate(Attr::PersonAge, FieldValue::Integer(age)));
        report("person", "new", checked)?;

        Ok(Person { name, age, rules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    /// Replace the name; blank names are rejected
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationFailure> {
        let name = name.into();
        report(
            "person",
            "set_name",
            self.rules.validate(Attr::PersonName, FieldValue::Text(&name)),
        )?;

        debug!(from = %self.name, to = %name, "person name updated");
        self.name = name;
        Ok(())
    }

    /// Replace the age; values outside the configured range are rejected
    pub fn set_age(&mut self, age: i64) -> Result<(), ValidationFailure> {
        report(
            "person",
            "set_age",
            self.rules.validate(Attr::PersonAge, FieldValue::Integer(age)),
        )?;

        debug!(from = self.age, to = age, "person age updated");
        self.age = age;
        Ok(())
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.age == other.age
    }
}

impl Validate for Person {
    fn validate(&self, registry: &AttributeRegistry) -> ValidationResult {
        collect_failures([
            registry.validate(Attr::PersonName, FieldValue::Text(&self.name)),
            registry.validate(Attr::PersonAge, FieldValue::Integer(self.age)),
        ])
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_person_creation() {
        let person = Person::new("Umar", 23).unwrap();
        assert_eq!(person.name(), "Umar");
        assert_eq!(person.age(), 23);
        assert!(person.validate(&AttributeRegistry::new()).is_ok());
    }

    #[test]
    fn test_invalid_construction_rejected() {
        assert_matches!(
            Person::new("", 23),
            Err(ValidationFailure::Blank { field: "name" })
        );
        assert_matches!(
            Person::new("Umar", 200),
            Err(ValidationFailure::OutOfRange { field: "age", .. })
        );
    }

    #[test]
    fn test_set_age_scenario() {
        let mut person = Person::new("Umar", 23).unwrap();

        assert_matches!(
            person.set_age(-5),
            Err(ValidationFailure::OutOfRange { value: -5, .. })
        );
        assert_eq!(person.age(), 23);

        person.set_age(40).unwrap();
        assert_eq!(person.age(), 40);
        assert_eq!(person.name(), "Umar");
    }

    #[test]
    fn test_set_name() {
        let mut person = Person::new("Umar", 23).unwrap();

        assert!(person.set_name("  ").is_err());
        assert_eq!(person.name(), "Umar");

        person.set_name("Alice").unwrap();
        assert_eq!(person.name(), "Alice");
        assert_eq!(person.age(), 23);
    }

    #[test]
    fn test_shared_rules() {
        let rules = Arc::new(AttributeRegistry::from_config(RuleConfig {
            min_age: 18,
            ..RuleConfig::default()
        }).unwrap());

        assert!(Person::with_rules("Kid", 12, rules.clone()).is_err());

        let mut adult = Person::with_rules("Adult", 30, rules).unwrap();
        assert!(adult.set_age(17).is_err());
        assert_eq!(adult.age(), 30);
    }

    #[test]
    fn test_serialize_skips_rules() {
        let person = Person::new("Umar", 23).unwrap();
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Umar", "age": 23 }));
    }

    proptest! {
        #[test]
        fn test_rejected_age_leaves_person_unchanged(age in prop_oneof![i64::MIN..0i64, 131..i64::MAX]) {
            let mut person = Person::new("Umar", 23).unwrap();
            let before = person.clone();

            prop_assert!(person.set_age(age).is_err());
            prop_assert_eq!(person, before);
        }

        #[test]
        fn test_accepted_age_touches_only_age(age in 0i64..=130) {
            let mut person = Person::new("Umar", 23).unwrap();

            prop_assert!(person.set_age(age).is_ok());
            prop_assert_eq!(person.age(), age);
            prop_assert_eq!(person.name(), "Umar");
        }

        #[test]
        fn test_repeated_reads_agree(age in 0i64..=130, reads in 1usize..20) {
            let person = Person::new("Umar", age).unwrap();
            for _ in 0..reads {
                prop_assert_eq!(person.age(), age);
                prop_assert_eq!(person.name(), "Umar");
            }
        }
    }
}
