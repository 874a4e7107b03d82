// Entity Models - Validating holders
//
// Each holder has:
// - Private fields, readable through getters that never fail
// - Constructors that refuse values breaking a field rule
// - Mutations that return Err and leave state untouched on rejection

pub mod person;
pub mod account;
pub mod student;

pub use person::Person;
pub use account::{BankAccount, EntryKind, LedgerEntry};
pub use student::Student;

use crate::schema::ValidationFailure;
use tracing::warn;

/// Log a rejected construction or mutation, then hand the result back
pub(crate) fn report<T>(
    holder: &'static str,
    operation: &'static str,
    result: Result<T, ValidationFailure>,
) -> Result<T, ValidationFailure> {
    if let Err(err) = &result {
        warn!(holder, operation, field = err.field(), reason = %err, "rejected");
    }
    result
}

// ============================================================================
// TESTS
// ============================================================================
