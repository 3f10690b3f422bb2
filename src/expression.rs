//! Filter evaluation against features.
//!
//! This module provides:
//! - Evaluation of a parsed filter expression against one feature
//! - Type-aware comparison semantics for attribute values
//!
//! Evaluation is two-valued at the top: NULL or missing attributes, type
//! mismatches and unorderable comparisons all evaluate to `false` rather than
//! raising errors, so heterogeneous data never aborts a query.

pub mod compare;
pub mod eval;

pub use compare::{compare, Scalar};
pub use eval::{evaluate, ExpressionEvaluator};
