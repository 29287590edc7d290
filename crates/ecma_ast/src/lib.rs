//! Syntax tree for ECMAScript scripts.
//!
//! Statements and expressions are closed sum types with one variant per
//! construct. Every node records the byte range it was parsed from.

pub use node::AnyNodeRef;
pub use nodes::*;
pub use text_size::{TextLen, TextRange, TextSize};

mod node;
mod nodes;
pub mod visitor;

/// A node that knows the source range it covers.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> TextSize {
        self.range().start()
    }

    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T: Ranged> Ranged for &T {
    fn range(&self) -> TextRange {
        T::range(self)
    }
}

impl<T: Ranged> Ranged for Box<T> {
    fn range(&self) -> TextRange {
        T::range(self)
    }
}
