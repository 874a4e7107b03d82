// Guarded Records - Core Library
// Validating holders whose rejected updates come back as typed errors

pub mod config;
pub mod attributes;    // Predicate catalog
pub mod schema;        // ValidationFailure + whole-holder checks
pub mod entities;      // Person, BankAccount, Student
pub mod factory;       // Explicit instance counting
pub mod capabilities;  // Payable / Measurable / Describe
pub mod logging;

// Re-export commonly used types
pub use config::RuleConfig;
pub use attributes::{
    Attr, AttributeDefinition, AttributeRegistry, AttributeType, FieldValue, ValidationRule,
};
pub use schema::{collect_failures, Validate, ValidationFailure, ValidationResult};
pub use entities::{BankAccount, EntryKind, LedgerEntry, Person, Student};
pub use factory::{CreationCounts, HolderFactory, HolderKind};
pub use capabilities::{
    Describe, Measurable, Payable, Payment, PaymentMethod, PaymentProcessor, Receipt, Shape,
    ShapeKind,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
