// 📏 Shapes - Area as a capability
//
// Color is common to every shape; the variant decides how area is computed.

use crate::attributes::{Attr, AttributeRegistry, FieldValue};
use crate::capabilities::Describe;
use crate::entities::report;
use crate::schema::ValidationFailure;
use serde::Serialize;
use std::f64::consts::PI;

pub trait Measurable {
    fn area(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ShapeKind {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Rectangle { .. } => "rectangle",
        }
    }

    fn dimensions(&self) -> Vec<f64> {
        match *self {
            ShapeKind::Circle { radius } => vec![radius],
            ShapeKind::Rectangle { width, height } => vec![width, height],
        }
    }
}

impl Measurable for ShapeKind {
    fn area(&self) -> f64 {
        match *self {
            ShapeKind::Circle { radius } => PI * radius * radius,
            ShapeKind::Rectangle { width, height } => width * height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    color: String,
    kind: ShapeKind,
}

impl Shape {
    pub fn new(color: impl Into<String>, kind: ShapeKind) -> Result<Self, ValidationFailure> {
        Self::with_rules(color, kind, &AttributeRegistry::new())
    }

    pub fn with_rules(
        color: impl Into<String>,
        kind: ShapeKind,
        rules: &AttributeRegistry,
    ) -> Result<Self, ValidationFailure> {
        let color = color.into();

        let checked = rules
            .validate(Attr::ShapeColor, FieldValue::Text(&color))
            .and_then(|_| {
                kind.dimensions()
                    .into_iter()
                    .try_for_each(|d| rules.validate(Attr::ShapeDimension, FieldValue::Money(d)))
            });
        report("shape", "new", checked)?;

        Ok(Shape { color, kind })
    }

    pub fn circle(color: impl Into<String>, radius: f64) -> Result<Self, ValidationFailure> {
        Self::new(color, ShapeKind::Circle { radius })
    }

    pub fn rectangle(
        color: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Result<Self, ValidationFailure> {
        Self::new(color, ShapeKind::Rectangle { width, height })
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }
}

impl Measurable for Shape {
    fn area(&self) -> f64 {
        self.kind.area()
    }
}

impl Describe for Shape {
    fn label(&self) -> String {
        format!("{} {}", self.color, self.kind.as_str())
    }

    fn describe(&self) -> String {
        format!("{}, area {:.2}", self.label(), self.area())
    }
}
