// 🏛️ Semantic Layer - Attribute Registry
// Every guarded field is declared once, with the predicates it must satisfy

use crate::config::RuleConfig;
use crate::schema::ValidationFailure;
use anyhow::Result;
use serde::Serialize;

// ============================================================================
// ATTRIBUTE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeType {
    Text,
    Integer,
    Money,
}

/// A borrowed value on its way into a holder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Money(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationRule {
    NonBlank,
    Finite,
    Positive,
    NonNegative,
    Range { min: i64, max: i64 },
    /// Minimum length in characters, ignoring surrounding whitespace
    MinLength(usize),
}

impl ValidationRule {
    /// Check a single value against this rule
    ///
    /// A rule that does not apply to the value's kind passes; a `Range` says
    /// nothing about text, for example.
    pub fn check(&self, field: &'static str, value: FieldValue<'_>) -> Result<(), ValidationFailure> {
        match (self, value) {
            (ValidationRule::NonBlank, FieldValue::Text(text)) if text.trim().is_empty() => {
                Err(ValidationFailure::Blank { field })
            }
            (ValidationRule::Finite, FieldValue::Money(v)) if !v.is_finite() => {
                Err(ValidationFailure::NotFinite { field })
            }
            // NaN compares false, so it only gets here when Finite is absent
            (ValidationRule::Positive, FieldValue::Money(v)) if !(v > 0.0) => {
                Err(ValidationFailure::NotPositive { field, value: v })
            }
            (ValidationRule::Positive, FieldValue::Integer(v)) if v <= 0 => {
                Err(ValidationFailure::NotPositive { field, value: v as f64 })
            }
            (ValidationRule::NonNegative, FieldValue::Money(v)) if v < 0.0 => {
                Err(ValidationFailure::Negative { field, value: v })
            }
            (ValidationRule::NonNegative, FieldValue::Integer(v)) if v < 0 => {
                Err(ValidationFailure::Negative { field, value: v as f64 })
            }
            (ValidationRule::Range { min, max }, FieldValue::Integer(v)) if v < *min || v > *max => {
                Err(ValidationFailure::OutOfRange {
                    field,
                    value: v,
                    min: *min,
                    max: *max,
                })
            }
            (ValidationRule::MinLength(min), FieldValue::Text(text))
                if text.trim().chars().count() < *min =>
            {
                Err(ValidationFailure::TooShort {
                    field,
                    len: text.trim().chars().count(),
                    min: *min,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Shortest card number accepted; anything shorter would be fully shown
/// by the last-4 mask on receipts
pub const MIN_CARD_DIGITS: usize = 12;

// ============================================================================
// ATTRIBUTE IDS
// ============================================================================

/// Every guarded field known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Attr {
    PersonName,
    PersonAge,
    AccountHolderName,
    AccountOpeningBalance,
    AccountAmount,
    StudentName,
    StudentAge,
    StudentScore,
    PaymentAmount,
    PaymentDetail,
    PaymentCardNumber,
    ShapeColor,
    ShapeDimension,
}

impl Attr {
    pub const COUNT: usize = 13;

    /// Must list every variant in declaration order; the registry indexes
    /// its definitions by `attr as usize`.
    pub const ALL: [Attr; Attr::COUNT] = [
        Attr::PersonName,
        Attr::PersonAge,
        Attr::AccountHolderName,
        Attr::AccountOpeningBalance,
        Attr::AccountAmount,
        Attr::StudentName,
        Attr::StudentAge,
        Attr::StudentScore,
        Attr::PaymentAmount,
        Attr::PaymentDetail,
        Attr::PaymentCardNumber,
        Attr::ShapeColor,
        Attr::ShapeDimension,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Attr::PersonName => "person.name",
            Attr::PersonAge => "person.age",
            Attr::AccountHolderName => "account.holder_name",
            Attr::AccountOpeningBalance => "account.opening_balance",
            Attr::AccountAmount => "account.amount",
            Attr::StudentName => "student.name",
            Attr::StudentAge => "student.age",
            Attr::StudentScore => "student.score",
            Attr::PaymentAmount => "payment.amount",
            Attr::PaymentDetail => "payment.detail",
            Attr::PaymentCardNumber => "payment.card_number",
            Attr::ShapeColor => "shape.color",
            Attr::ShapeDimension => "shape.dimension",
        }
    }
}

// ============================================================================
// ATTRIBUTE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AttributeDefinition {
    /// Registry key
    pub attr: Attr,

    /// Field name reported in failures (e.g., "age")
    pub name: &'static str,

    /// Kind of value this attribute holds
    pub type_: AttributeType,

    pub description: &'static str,

    /// Checked in order; the first failing rule wins
    pub validation_rules: Vec<ValidationRule>,
}

impl AttributeDefinition {
    pub fn new(attr: Attr, name: &'static str, type_: AttributeType) -> Self {
        AttributeDefinition {
            attr,
            name,
            type_,
            description: "",
            validation_rules: Vec::new(),
        }
    }

    /// Builder: add description
    pub fn with_description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    /// Builder: add validation rule
    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    /// Run every rule against the value, stopping at the first failure
    pub fn check(&self, value: FieldValue<'_>) -> Result<(), ValidationFailure> {
        self.validation_rules
            .iter()
            .try_for_each(|rule| rule.check(self.name, value))
    }
}

// ============================================================================
// ATTRIBUTE REGISTRY
// ============================================================================

/// Catalog of every guarded field, built from one `RuleConfig`
///
/// Holds exactly one definition per `Attr`, so lookups cannot miss.
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    config: RuleConfig,
    definitions: [AttributeDefinition; Attr::COUNT],
}

impl AttributeRegistry {
    /// Registry with the default bounds
    pub fn new() -> Self {
        Self::build(RuleConfig::default())
    }

    /// Registry from caller-supplied bounds; impossible bounds are refused
    pub fn from_config(config: RuleConfig) -> Result<Self> {
        config.check()?;
        Ok(Self::build(config))
    }

    fn build(config: RuleConfig) -> Self {
        let definitions = Attr::ALL.map(|attr| Self::define(attr, &config));
        AttributeRegistry { config, definitions }
    }

    fn define(attr: Attr, config: &RuleConfig) -> AttributeDefinition {
        let age_range = ValidationRule::Range {
            min: config.min_age,
            max: config.max_age,
        };

        match attr {
            Attr::PersonName => AttributeDefinition::new(attr, "name", AttributeType::Text)
                .with_description("Display name of a person")
                .with_validation(ValidationRule::NonBlank),
            Attr::PersonAge => AttributeDefinition::new(attr, "age", AttributeType::Integer)
                .with_description("Age in whole years")
                .with_validation(age_range),
            Attr::AccountHolderName => {
                AttributeDefinition::new(attr, "holder_name", AttributeType::Text)
                    .with_description("Name of the account holder")
                    .with_validation(ValidationRule::NonBlank)
            }
            Attr::AccountOpeningBalance => {
                let floor = if config.allow_zero_opening_balance {
                    ValidationRule::NonNegative
                } else {
                    ValidationRule::Positive
                };
                AttributeDefinition::new(attr, "opening_balance", AttributeType::Money)
                    .with_description("Balance the account is opened with")
                    .with_validation(ValidationRule::Finite)
                    .with_validation(floor)
            }
            Attr::AccountAmount => AttributeDefinition::new(attr, "amount", AttributeType::Money)
                .with_description("Deposit or withdrawal amount")
                .with_validation(ValidationRule::Finite)
                .with_validation(ValidationRule::Positive),
            Attr::StudentName => AttributeDefinition::new(attr, "name", AttributeType::Text)
                .with_description("Student name")
                .with_validation(ValidationRule::NonBlank),
            Attr::StudentAge => AttributeDefinition::new(attr, "age", AttributeType::Integer)
                .with_description("Student age, when known")
                .with_validation(age_range),
            Attr::StudentScore => AttributeDefinition::new(attr, "score", AttributeType::Integer)
                .with_description("Single exam score")
                .with_validation(ValidationRule::Range {
                    min: 0,
                    max: config.max_score,
                }),
            Attr::PaymentAmount => AttributeDefinition::new(attr, "amount", AttributeType::Money)
                .with_description("Amount charged by a payment")
                .with_validation(ValidationRule::Finite)
                .with_validation(ValidationRule::Positive),
            Attr::PaymentDetail => AttributeDefinition::new(attr, "detail", AttributeType::Text)
                .with_description("UPI id or PayPal email")
                .with_validation(ValidationRule::NonBlank),
            Attr::PaymentCardNumber => {
                AttributeDefinition::new(attr, "card_number", AttributeType::Text)
                    .with_description("Card number, masked on receipts")
                    .with_validation(ValidationRule::NonBlank)
                    .with_validation(ValidationRule::MinLength(MIN_CARD_DIGITS))
            }
            Attr::ShapeColor => AttributeDefinition::new(attr, "color", AttributeType::Text)
                .with_description("Shape color")
                .with_validation(ValidationRule::NonBlank),
            Attr::ShapeDimension => {
                AttributeDefinition::new(attr, "dimension", AttributeType::Money)
                    .with_description("Radius, width or height")
                    .with_validation(ValidationRule::Finite)
                    .with_validation(ValidationRule::Positive)
            }
        }
    }

    pub fn get(&self, attr: Attr) -> &AttributeDefinition {
        debug_assert_eq!(self.definitions[attr as usize].attr, attr);
        &self.definitions[attr as usize]
    }

    /// Check a value against every rule of an attribute
    pub fn validate(&self, attr: Attr, value: FieldValue<'_>) -> Result<(), ValidationFailure> {
        self.get(attr).check(value)
    }

    /// Bounds the registry was built from
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Look up a definition by its dotted id (e.g., "person.age")
    pub fn find(&self, id: &str) -> Option<&AttributeDefinition> {
        self.definitions.iter().find(|def| def.attr.id() == id)
    }

    pub fn all(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.iter()
    }

    pub fn count(&self) -> usize {
        self.definitions.len()
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_registry_is_complete() {
        let registry = AttributeRegistry::new();
        assert_eq!(registry.count(), Attr::ALL.len());

        for attr in Attr::ALL {
            assert_eq!(registry.get(attr).attr, attr);
        }
    }

    #[test]
    fn test_all_in_declaration_order() {
        for (index, attr) in Attr::ALL.iter().enumerate() {
            assert_eq!(*attr as usize, index);
        }
    }

    #[test]
    fn test_find_by_id() {
        let registry = AttributeRegistry::new();

        for attr in Attr::ALL {
            assert_eq!(registry.find(attr.id()).unwrap().attr, attr);
        }
        assert_eq!(registry.find("person.age").unwrap().name, "age");
        assert!(registry.find("person.height").is_none());
    }

    #[test]
    fn test_impossible_bounds_refused() {
        let inverted = AttributeRegistry::from_config(RuleConfig {
            min_age: 50,
            max_age: 10,
            ..RuleConfig::default()
        });
        assert!(inverted.unwrap_err().to_string().contains("min_age"));

        let negative_score = AttributeRegistry::from_config(RuleConfig {
            max_score: -1,
            ..RuleConfig::default()
        });
        assert!(negative_score.is_err());
    }

    #[test]
    fn test_card_number_length() {
        let registry = AttributeRegistry::new();

        assert!(registry
            .validate(Attr::PaymentCardNumber, FieldValue::Text("123456789012"))
            .is_ok());
        assert_matches!(
            registry.validate(Attr::PaymentCardNumber, FieldValue::Text("1234")),
            Err(ValidationFailure::TooShort { field: "card_number", len: 4, min: MIN_CARD_DIGITS })
        );
        assert_matches!(
            registry.validate(Attr::PaymentCardNumber, FieldValue::Text("  ")),
            Err(ValidationFailure::Blank { .. })
        );
    }

    #[test]
    fn test_attr_ids_unique() {
        let mut ids: Vec<&str> = Attr::ALL.iter().map(|a| a.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Attr::ALL.len());
    }

    #[test]
    fn test_age_range() {
        let registry = AttributeRegistry::new();

        assert!(registry.validate(Attr::PersonAge, FieldValue::Integer(0)).is_ok());
        assert!(registry.validate(Attr::PersonAge, FieldValue::Integer(130)).is_ok());
        assert_matches!(
            registry.validate(Attr::PersonAge, FieldValue::Integer(-5)),
            Err(ValidationFailure::OutOfRange { field: "age", value: -5, min: 0, max: 130 })
        );
        assert_matches!(
            registry.validate(Attr::PersonAge, FieldValue::Integer(131)),
            Err(ValidationFailure::OutOfRange { .. })
        );
    }

    #[test]
    fn test_blank_name() {
        let registry = AttributeRegistry::new();

        assert!(registry.validate(Attr::PersonName, FieldValue::Text("Umar")).is_ok());
        assert_matches!(
            registry.validate(Attr::PersonName, FieldValue::Text("")),
            Err(ValidationFailure::Blank { field: "name" })
        );
        assert_matches!(
            registry.validate(Attr::PersonName, FieldValue::Text("   \t")),
            Err(ValidationFailure::Blank { .. })
        );
    }

    #[test]
    fn test_amount_rules() {
        let registry = AttributeRegistry::new();

        assert!(registry.validate(Attr::AccountAmount, FieldValue::Money(0.01)).is_ok());
        assert_matches!(
            registry.validate(Attr::AccountAmount, FieldValue::Money(0.0)),
            Err(ValidationFailure::NotPositive { .. })
        );
        assert_matches!(
            registry.validate(Attr::AccountAmount, FieldValue::Money(-10.0)),
            Err(ValidationFailure::NotPositive { .. })
        );
        assert_matches!(
            registry.validate(Attr::AccountAmount, FieldValue::Money(f64::NAN)),
            Err(ValidationFailure::NotFinite { field: "amount" })
        );
        assert_matches!(
            registry.validate(Attr::AccountAmount, FieldValue::Money(f64::INFINITY)),
            Err(ValidationFailure::NotFinite { .. })
        );
    }

    #[test]
    fn test_opening_balance_follows_config() {
        let registry = AttributeRegistry::new();
        assert!(registry
            .validate(Attr::AccountOpeningBalance, FieldValue::Money(0.0))
            .is_ok());
        assert_matches!(
            registry.validate(Attr::AccountOpeningBalance, FieldValue::Money(-1.0)),
            Err(ValidationFailure::Negative { .. })
        );

        let strict = AttributeRegistry::from_config(RuleConfig {
            allow_zero_opening_balance: false,
            ..RuleConfig::default()
        })
        .unwrap();
        assert_matches!(
            strict.validate(Attr::AccountOpeningBalance, FieldValue::Money(0.0)),
            Err(ValidationFailure::NotPositive { .. })
        );
    }

    #[test]
    fn test_custom_age_bounds() {
        let registry = AttributeRegistry::from_config(RuleConfig {
            min_age: 18,
            max_age: 65,
            ..RuleConfig::default()
        })
        .unwrap();

        assert!(registry.validate(Attr::PersonAge, FieldValue::Integer(18)).is_ok());
        assert!(registry.validate(Attr::PersonAge, FieldValue::Integer(17)).is_err());
        assert!(registry.validate(Attr::StudentAge, FieldValue::Integer(66)).is_err());
        assert_eq!(registry.config().max_age, 65);
    }

    #[test]
    fn test_rule_ignores_other_kinds() {
        let range = ValidationRule::Range { min: 0, max: 1 };
        assert!(range.check("x", FieldValue::Text("anything")).is_ok());

        let blank = ValidationRule::NonBlank;
        assert!(blank.check("x", FieldValue::Integer(0)).is_ok());
    }
}
