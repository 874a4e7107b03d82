// 🏭 Holder Factory - Owns the rules and counts what it builds
//
// Instance counts live here rather than in a global, so two factories never
// share a tally and a reset is explicit.

use crate::attributes::AttributeRegistry;
use crate::config::RuleConfig;
use crate::entities::{BankAccount, Person, Student};
use crate::schema::ValidationFailure;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HolderKind {
    Person,
    Account,
    Student,
}

impl HolderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolderKind::Person => "person",
            HolderKind::Account => "account",
            HolderKind::Student => "student",
        }
    }
}

/// Successful constructions per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CreationCounts {
    pub persons: usize,
    pub accounts: usize,
    pub students: usize,
}

impl CreationCounts {
    pub fn total(&self) -> usize {
        self.persons + self.accounts + self.students
    }
}

pub struct HolderFactory {
    rules: Arc<AttributeRegistry>,
    counts: CreationCounts,
}

impl HolderFactory {
    /// Factory with the default bounds and zeroed counts
    pub fn new() -> Self {
        HolderFactory {
            rules: Arc::new(AttributeRegistry::new()),
            counts: CreationCounts::default(),
        }
    }

    /// Factory with caller-supplied bounds; impossible bounds are refused
    pub fn from_config(config: RuleConfig) -> Result<Self> {
        Ok(HolderFactory {
            rules: Arc::new(AttributeRegistry::from_config(config)?),
            counts: CreationCounts::default(),
        })
    }

    /// Registry shared by every holder this factory builds
    pub fn rules(&self) -> &Arc<AttributeRegistry> {
        &self.rules
    }

    pub fn person(&mut self, name: impl Into<String>, age: i64) -> Result<Person, ValidationFailure> {
        let person = Person::with_rules(name, age, self.rules.clone())?;
        self.counts.persons += 1;
        self.created_one(HolderKind::Person);
        Ok(person)
    }

    pub fn account(
        &mut self,
        holder_name: impl Into<String>,
        opening_balance: f64,
    ) -> Result<BankAccount, ValidationFailure> {
        let account = BankAccount::open_with_rules(holder_name, opening_balance, self.rules.clone())?;
        self.counts.accounts += 1;
        self.created_one(HolderKind::Account);
        Ok(account)
    }

    pub fn student(
        &mut self,
        name: impl Into<String>,
        age: Option<i64>,
        scores: &[i64],
    ) -> Result<Student, ValidationFailure> {
        let student = Student::with_rules(name, age, scores, self.rules.clone())?;
        self.counts.students += 1;
        self.created_one(HolderKind::Student);
        Ok(student)
    }

    pub fn created(&self, kind: HolderKind) -> usize {
        match kind {
            HolderKind::Person => self.counts.persons,
            HolderKind::Account => self.counts.accounts,
            HolderKind::Student => self.counts.students,
        }
    }

    pub fn total_created(&self) -> usize {
        self.counts.total()
    }

    pub fn counts(&self) -> CreationCounts {
        self.counts
    }

    /// Zero every count; the rules are kept
    pub fn reset(&mut self) {
        self.counts = CreationCounts::default();
    }

    fn created_one(&self, kind: HolderKind) {
        debug!(kind = kind.as_str(), count = self.created(kind), "holder created");
    }
}

impl Default for HolderFactory {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
