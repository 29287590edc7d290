//! Semantic analyses over the ECMAScript syntax tree.

pub mod cfg;
