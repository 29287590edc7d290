use text_size::TextRange;

use crate::{Expr, Ranged, Stmt};

/// A borrowed reference to either a statement or an expression.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnyNodeRef<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> AnyNodeRef<'a> {
    /// Compares two node references by identity rather than by value.
    pub fn ptr_eq(self, other: AnyNodeRef<'_>) -> bool {
        match (self, other) {
            (AnyNodeRef::Stmt(left), AnyNodeRef::Stmt(right)) => std::ptr::eq(left, right),
            (AnyNodeRef::Expr(left), AnyNodeRef::Expr(right)) => std::ptr::eq(left, right),
            _ => false,
        }
    }

    pub const fn as_stmt(self) -> Option<&'a Stmt> {
        match self {
            AnyNodeRef::Stmt(stmt) => Some(stmt),
            AnyNodeRef::Expr(_) => None,
        }
    }

    pub const fn as_expr(self) -> Option<&'a Expr> {
        match self {
            AnyNodeRef::Expr(expr) => Some(expr),
            AnyNodeRef::Stmt(_) => None,
        }
    }
}

impl Ranged for AnyNodeRef<'_> {
    fn range(&self) -> TextRange {
        match self {
            AnyNodeRef::Stmt(stmt) => stmt.range(),
            AnyNodeRef::Expr(expr) => expr.range(),
        }
    }
}

impl<'a> From<&'a Stmt> for AnyNodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        AnyNodeRef::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr> for AnyNodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        AnyNodeRef::Expr(expr)
    }
}

#[cfg(test)]
mod tests {
    use text_size::{TextRange, TextSize};

    use crate::{AnyNodeRef, Expr, ExprName, Ranged};

    fn name(id: &str, start: u32) -> Expr {
        let start = TextSize::new(start);
        Expr::Name(ExprName {
            range: TextRange::at(start, TextSize::new(1)),
            id: id.to_string(),
        })
    }

    #[test]
    fn ptr_eq_distinguishes_equal_values() {
        let a = name("a", 0);
        let b = name("a", 0);

        assert_eq!(AnyNodeRef::from(&a), AnyNodeRef::from(&b));
        assert!(AnyNodeRef::from(&a).ptr_eq(AnyNodeRef::from(&a)));
        assert!(!AnyNodeRef::from(&a).ptr_eq(AnyNodeRef::from(&b)));
    }

    #[test]
    fn range_delegates_to_node() {
        let a = name("a", 4);
        assert_eq!(AnyNodeRef::from(&a).start(), TextSize::new(4));
    }
}
