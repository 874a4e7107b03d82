// 💳 Bank Account Entity - Balance that can only move through guarded operations
//
// "Account id is IDENTITY (never changes), balance is a VALUE (moves only
// through deposit and withdraw)"
//
// Problem solved:
// - Balance can never go negative
// - Non-positive or non-finite amounts are refused
// - Every accepted movement is kept in an append-only ledger

use crate::attributes::{Attr, AttributeRegistry, FieldValue};
use crate::entities::report;
use crate::schema::{collect_failures, Validate, ValidationFailure, ValidationResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Opening,
    Deposit,
    Withdrawal,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Opening => "Opening",
            EntryKind::Deposit => "Deposit",
            EntryKind::Withdrawal => "Withdrawal",
        }
    }
}

/// One accepted balance movement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub amount: f64,
    pub balance_after: f64,
    pub at: DateTime<Utc>,
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BankAccount {
    /// Stable identity - NEVER changes
    id: Uuid,

    holder_name: String,

    opening_balance: f64,

    /// Always >= 0
    balance: f64,

    /// Accepted movements only, oldest first
    ledger: Vec<LedgerEntry>,

    #[serde(skip)]
    rules: Arc<AttributeRegistry>,
}

impl BankAccount {
    /// Open an account checked against the default bounds
    pub fn open(
        holder_name: impl Into<String>,
        opening_balance: f64,
    ) -> Result<Self, ValidationFailure> {
        Self::open_with_rules(holder_name, opening_balance, Arc::new(AttributeRegistry::new()))
    }

    /// Open an account checked against a shared registry
    pub fn open_with_rules(
        holder_name: impl Into<String>,
        opening_balance: f64,
        rules: Arc<AttributeRegistry>,
    ) -> Result<Self, ValidationFailure> {
        let holder_name = holder_name.into();

        let checked = rules
            .validate(Attr::AccountHolderName, FieldValue::Text(&holder_name))
            .and_then(|_| {
                rules.validate(Attr::AccountOpeningBalance, FieldValue::Money(opening_balance))
            });
        report("account", "open", checked)?;

        Ok(BankAccount {
            id: Uuid::new_v4(),
            holder_name,
            opening_balance,
            balance: opening_balance,
            ledger: vec![LedgerEntry {
                kind: EntryKind::Opening,
                amount: opening_balance,
                balance_after: opening_balance,
                at: Utc::now(),
            }],
            rules,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn opening_balance(&self) -> f64 {
        self.opening_balance
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Net movement since the account was opened
    pub fn balance_change(&self) -> f64 {
        self.balance - self.opening_balance
    }

    pub fn is_positive(&self) -> bool {
        self.balance > 0.0
    }

    /// Rename the holder; blank names are rejected
    pub fn set_holder_name(&mut self, name: impl Into<String>) -> Result<(), ValidationFailure> {
        let name = name.into();
        report(
            "account",
            "set_holder_name",
            self.rules.validate(Attr::AccountHolderName, FieldValue::Text(&name)),
        )?;

        self.holder_name = name;
        Ok(())
    }

    /// Add a positive amount, returning the new balance
    pub fn deposit(&mut self, amount: f64) -> Result<f64, ValidationFailure> {
        report("account", "deposit", self.check_amount(amount))?;

        let balance = self.balance + amount;
        // Finite + finite can still overflow to infinity
        if !balance.is_finite() {
            return report(
                "account",
                "deposit",
                Err(ValidationFailure::NotFinite { field: "balance" }),
            );
        }

        self.apply(EntryKind::Deposit, amount, balance);
        Ok(balance)
    }

    /// Take a positive amount no larger than the balance, returning the new balance
    pub fn withdraw(&mut self, amount: f64) -> Result<f64, ValidationFailure> {
        report("account", "withdraw", self.check_amount(amount))?;

        if amount > self.balance {
            return report(
                "account",
                "withdraw",
                Err(ValidationFailure::InsufficientBalance {
                    requested: amount,
                    available: self.balance,
                }),
            );
        }

        let balance = self.balance - amount;
        self.apply(EntryKind::Withdrawal, amount, balance);
        Ok(balance)
    }

    /// Mask an account number down to its last 4 characters
    ///
    /// Example: "1234567890" → "*7890"
    pub fn mask_account_number(full_number: &str) -> String {
        let chars: Vec<char> = full_number.chars().collect();
        if chars.len() <= 4 {
            return full_number.to_string();
        }
        let last4: String = chars[chars.len() - 4..].iter().collect();
        format!("*{}", last4)
    }

    /// Masked form of this account's id
    pub fn masked_id(&self) -> String {
        Self::mask_account_number(&self.id.simple().to_string())
    }

    fn check_amount(&self, amount: f64) -> Result<(), ValidationFailure> {
        self.rules.validate(Attr::AccountAmount, FieldValue::Money(amount))
    }

    fn apply(&mut self, kind: EntryKind, amount: f64, balance_after: f64) {
        debug!(
            account = %self.id,
            kind = kind.as_str(),
            amount,
            balance_after,
            "balance updated"
        );
        self.balance = balance_after;
        self.ledger.push(LedgerEntry {
            kind,
            amount,
            balance_after,
            at: Utc::now(),
        });
    }
}

impl PartialEq for BankAccount {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.holder_name == other.holder_name
            && self.opening_balance == other.opening_balance
            && self.balance == other.balance
            && self.ledger == other.ledger
    }
}

impl Validate for BankAccount {
    fn validate(&self, registry: &AttributeRegistry) -> ValidationResult {
        let balance_floor = if self.balance < 0.0 {
            Err(ValidationFailure::Negative {
                field: "balance",
                value: self.balance,
            })
        } else {
            Ok(())
        };

        collect_failures([
            registry.validate(Attr::AccountHolderName, FieldValue::Text(&self.holder_name)),
            registry.validate(
                Attr::AccountOpeningBalance,
                FieldValue::Money(self.opening_balance),
            ),
            balance_floor,
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
    fn test_account_creation() {
        let account = BankAccount::open("Alice", 5000.0).unwrap();

        assert_eq!(account.holder_name(), "Alice");
        assert_eq!(account.balance(), 5000.0);
        assert_eq!(account.opening_balance(), 5000.0);
        assert_eq!(account.ledger().len(), 1);
        assert_eq!(account.ledger()[0].kind, EntryKind::Opening);
        assert!(account.validate(&AttributeRegistry::new()).is_ok());
    }

    #[test]
    fn test_invalid_opening_rejected() {
        assert_matches!(
            BankAccount::open("", 100.0),
            Err(ValidationFailure::Blank { field: "holder_name" })
        );
        assert_matches!(
            BankAccount::open("Alice", -1.0),
            Err(ValidationFailure::Negative { .. })
        );
        assert_matches!(
            BankAccount::open("Alice", f64::NAN),
            Err(ValidationFailure::NotFinite { .. })
        );
    }

    #[test]
    fn test_zero_opening_follows_config() {
        assert!(BankAccount::open("Alice", 0.0).is_ok());

        let strict = Arc::new(AttributeRegistry::from_config(RuleConfig {
            allow_zero_opening_balance: false,
            ..RuleConfig::default()
        }).unwrap());
        assert_matches!(
            BankAccount::open_with_rules("Alice", 0.0, strict),
            Err(ValidationFailure::NotPositive { .. })
        );
    }

    #[test]
    fn test_deposit_withdraw_scenario() {
        let mut account = BankAccount::open("Alice", 5000.0).unwrap();

        assert_eq!(account.deposit(2000.0).unwrap(), 7000.0);
        assert_eq!(account.withdraw(1000.0).unwrap(), 6000.0);

        assert_matches!(
            account.withdraw(10000.0),
            Err(ValidationFailure::InsufficientBalance { requested, available })
                if requested == 10000.0 && available == 6000.0
        );
        assert_eq!(account.balance(), 6000.0);
        assert_eq!(account.balance_change(), 1000.0);
    }

    #[test]
    fn test_ledger_records_accepted_only() {
        let mut account = BankAccount::open("Alice", 5000.0).unwrap();
        account.deposit(2000.0).unwrap();
        account.deposit(-5.0).unwrap_err();
        account.withdraw(1000.0).unwrap();
        account.withdraw(10000.0).unwrap_err();

        let kinds: Vec<EntryKind> = account.ledger().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Opening, EntryKind::Deposit, EntryKind::Withdrawal]
        );
        assert_eq!(account.ledger().last().unwrap().balance_after, 6000.0);
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = BankAccount::open("Alice", 100.0).unwrap();
        assert_eq!(account.withdraw(100.0).unwrap(), 0.0);
        assert!(!account.is_positive());
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut account = BankAccount::open("Alice", f64::MAX).unwrap();
        assert_matches!(
            account.deposit(f64::MAX),
            Err(ValidationFailure::NotFinite { field: "balance" })
        );
        assert_eq!(account.balance(), f64::MAX);
    }

    #[test]
    fn test_set_holder_name() {
        let mut account = BankAccount::open("Alice", 10.0).unwrap();
        assert!(account.set_holder_name("").is_err());
        assert_eq!(account.holder_name(), "Alice");

        account.set_holder_name("Alice Smith").unwrap();
        assert_eq!(account.holder_name(), "Alice Smith");
        assert_eq!(account.balance(), 10.0);
    }

    #[test]
    fn test_mask_account_number() {
        assert_eq!(BankAccount::mask_account_number("1234567890"), "*7890");
        assert_eq!(BankAccount::mask_account_number("1234"), "1234");
        assert_eq!(BankAccount::mask_account_number(""), "");

        let account = BankAccount::open("Alice", 10.0).unwrap();
        assert_eq!(account.masked_id().len(), 5);
    }

    #[test]
    fn test_identity_stable_across_mutations() {
        let mut account = BankAccount::open("Alice", 10.0).unwrap();
        let id = account.id();
        account.deposit(5.0).unwrap();
        account.set_holder_name("Bob").unwrap();
        assert_eq!(account.id(), id);
    }

    #[test]
    fn test_snapshot_json() {
        let mut account = BankAccount::open("Alice", 5000.0).unwrap();
        account.deposit(2000.0).unwrap();

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["holder_name"], "Alice");
        assert_eq!(json["balance"], 7000.0);
        assert_eq!(json["ledger"][1]["kind"], "Deposit");
        assert!(json.get("rules").is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(f64),
        Withdraw(f64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-1000.0f64..10000.0).prop_map(Op::Deposit),
            (-1000.0f64..20000.0).prop_map(Op::Withdraw),
        ]
    }

    proptest! {
        #[test]
        fn test_balance_never_negative(opening in 0.0f64..10000.0, ops in prop::collection::vec(op(), 0..50)) {
            let mut account = BankAccount::open("Alice", opening).unwrap();

            for op in ops {
                let before = account.clone();
                let result = match op {
                    Op::Deposit(amount) => account.deposit(amount),
                    Op::Withdraw(amount) => account.withdraw(amount),
                };

                if result.is_err() {
                    prop_assert_eq!(&account, &before);
                }
                prop_assert!(account.balance() >= 0.0);
            }
        }

        #[test]
        fn test_repeated_reads_agree(
            opening in 0.0f64..10000.0,
            ops in prop::collection::vec(op(), 0..20),
            reads in 1usize..20,
        ) {
            let mut account = BankAccount::open("Alice", opening).unwrap();
            for op in ops {
                let _ = match op {
                    Op::Deposit(amount) => account.deposit(amount),
                    Op::Withdraw(amount) => account.withdraw(amount),
                };
            }

            let balance = account.balance();
            let ledger = account.ledger().to_vec();
            for _ in 0..reads {
                prop_assert_eq!(account.balance(), balance);
                prop_assert_eq!(account.ledger(), ledger.as_slice());
                prop_assert_eq!(account.holder_name(), "Alice");
            }
            prop_assert_eq!(ledger.last().map(|e| e.balance_after), Some(balance));
        }
    }
}
