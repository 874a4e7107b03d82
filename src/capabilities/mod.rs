// Capabilities - Narrow traits over tagged variants
//
// Shared behavior comes from a trait per capability; which concrete behavior
// runs is picked by an enum variant, not by a class hierarchy.

pub mod payment;
pub mod shape;

pub use payment::{Payable, Payment, PaymentMethod, PaymentProcessor, Receipt};
pub use shape::{Measurable, Shape, ShapeKind};

/// Anything that can name itself for display
pub trait Describe {
    fn label(&self) -> String;

    /// Longer form; the label alone unless overridden
    fn describe(&self) -> String {
        self.label()
    }
}
