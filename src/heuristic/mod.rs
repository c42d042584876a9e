//! Rule driven rewriting of plan trees.
//!
//! [`HepOptimizer`] hands the whole owned tree to each rule of its batch in turn and takes
//! back the rewritten tree. Batches repeat until one leaves the tree as it was or the
//! iteration limit runs out. The batch loop follows the shape of calcite's HepPlanner, without
//! its graph of shared nodes.

mod optimizer;
pub use optimizer::*;
mod trace;
pub use trace::*;
