//! Rewrite rules.
//!
//! A rule receives a whole plan tree and returns a logically equivalent one. Rules are
//! dispatched statically through [`RuleImpl`], so the set of available rules is closed.

use enum_dispatch::enum_dispatch;

use crate::error::OptResult;
use crate::plan::PlanNode;

mod selection_pass_through;
pub use selection_pass_through::*;
mod selection_pushdown;
pub use selection_pushdown::*;

#[enum_dispatch]
pub trait Rule {
    fn name(&self) -> &'static str;

    /// Rewrites the tree rooted at `node`.
    ///
    /// A rule that finds nothing to rewrite returns the tree unchanged with
    /// [`Transformed::no`].
    fn apply(&self, node: PlanNode) -> OptResult<Transformed>;
}

#[enum_dispatch(Rule)]
#[derive(Clone, Debug)]
pub enum RuleImpl {
    SelectionPassThrough,
    SelectionPushdown,
}

/// Output of a rule application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformed {
    pub node: PlanNode,
    /// Whether the rule changed the tree.
    pub changed: bool,
}

impl Transformed {
    pub fn yes(node: PlanNode) -> Self {
        Self {
            node,
            changed: true,
        }
    }

    pub fn no(node: PlanNode) -> Self {
        Self {
            node,
            changed: false,
        }
    }
}
