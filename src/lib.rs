//! ## Background
//!
//! A query optimizer accepts an unoptimized query plan and outputs an equivalent plan that is
//! cheaper to execute. Rule based optimization applies a collection of rewrite rules to a plan
//! repeatedly until some condition is met, for example, a fix point (plan no longer changes)
//! or number of times. Each rule substitutes the plan it generates for the original one.
//! This crate implements such a heuristic optimizer over relational algebra trees built from
//! scans, selections (σ), joins (⨝), projections (π) and distincts (δ).
//!
//! ## Design
//!
//! ### Plan
//!
//! A [`plan::Plan`] is a strictly owned tree of [`plan::PlanNode`]s. Each node carries an
//! [`operator::Operator`] and exactly as many inputs as the operator's arity, which is checked
//! when the node is built. Predicates and column lists are opaque text.
//!
//! ### Heuristic Optimizer
//!
//! [`heuristic::HepOptimizer`] runs a batch of [`rules::Rule`]s until reaching a fix point or
//! the maximum number of iterations. [`heuristic::optimize`] runs the baseline selection
//! pushdown, which walks the tree and rebuilds it without moving any node.
//! [`rules::SelectionPushdown`] is the opt-in rule that actually moves filters below joins.
//!
//! ### Code Generation
//!
//! [`codegen::to_text`] renders a plan back into query text.

#[macro_use]
extern crate prettytable;

pub mod codegen;
pub mod error;
pub mod heuristic;
pub mod operator;
pub mod plan;
pub mod rules;
pub mod sample;

pub use codegen::to_text;
pub use error::{OptError, OptResult};
pub use heuristic::{optimize, optimize_with, HepOptimizer};
pub use plan::{LogicalPlanBuilder, Plan, PlanNode};
