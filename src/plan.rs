use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::error::{OptError, OptResult};
use crate::operator::{Distinct, Join, Operator, Projection, Selection, TableScan};

/// One node in a plan.
///
/// A node exclusively owns its inputs, so a plan is always a tree: no node is shared between
/// two parents and there are no back edges.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PlanNode {
    operator: Operator,
    inputs: Vec<PlanNode>,
}

/// A query plan.
///
/// Optimizer passes take a plan and return a new one; the input plan is never modified.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Plan {
    root: PlanNode,
}

/// Pre-order, depth-first walk producing one indented line per node.
struct DebugLines<'a> {
    stack: Vec<(&'a PlanNode, usize)>,
}

impl<'a> Iterator for DebugLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reversed so that the first input is visited first.
        for input in node.inputs.iter().rev() {
            self.stack.push((input, depth + 1));
        }

        Some(format!("{}{}", "\t".repeat(depth), node.operator))
    }
}

impl PlanNode {
    /// Creates a node, checking that `inputs` matches the operator's arity.
    pub fn try_new(operator: Operator, inputs: Vec<PlanNode>) -> OptResult<Self> {
        let kind = operator.kind();
        if inputs.len() != kind.arity() {
            return Err(OptError::Arity {
                operator: kind,
                expected: kind.arity(),
                actual: inputs.len(),
            }
            .into());
        }

        Ok(Self { operator, inputs })
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn inputs(&self) -> &[PlanNode] {
        &self.inputs
    }

    pub fn into_parts(self) -> (Operator, Vec<PlanNode>) {
        (self.operator, self.inputs)
    }

    /// Renders the subtree rooted at this node, one line per node, each line indented by one
    /// tab per level below this node.
    pub fn render_debug(&self) -> impl Iterator<Item = String> + '_ {
        DebugLines {
            stack: vec![(self, 0)],
        }
    }

    /// The table-like name this node stands for when a parent references it without
    /// expanding it.
    ///
    /// Unary operators see through to their input, a join has no single relation and is
    /// referred to by its operator name.
    pub fn relation_label(&self) -> String {
        match &self.operator {
            Operator::Scan(scan) => scan.to_string(),
            Operator::Join(_) => self.operator.kind().to_string(),
            Operator::Selection(_) | Operator::Projection(_) | Operator::Distinct(_) => {
                self.inputs[0].relation_label()
            }
        }
    }

    /// Scans reachable from this node, left to right.
    pub fn table_scans(&self) -> Vec<&TableScan> {
        let mut scans = vec![];
        self.collect_scans(&mut scans);
        scans
    }

    fn collect_scans<'a>(&'a self, scans: &mut Vec<&'a TableScan>) {
        scans.extend(self.operator.as_scan());
        for input in &self.inputs {
            input.collect_scans(scans);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.inputs.iter().map(PlanNode::node_count).sum::<usize>()
    }

    /// Number of levels in this subtree, a single scan has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.inputs.iter().map(PlanNode::depth).max().unwrap_or(0)
    }
}

impl Plan {
    pub fn new(root: PlanNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PlanNode {
        &self.root
    }

    pub fn into_root(self) -> PlanNode {
        self.root
    }

    pub fn render_debug(&self) -> impl Iterator<Item = String> + '_ {
        self.root.render_debug()
    }
}

impl From<PlanNode> for Plan {
    fn from(root: PlanNode) -> Self {
        Self::new(root)
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_debug().join("\n"))
    }
}

/// Builds a logical plan bottom up, starting from a table scan.
///
/// Every step supplies exactly the inputs its operator needs, so building never fails.
pub struct LogicalPlanBuilder {
    root: PlanNode,
}

impl LogicalPlanBuilder {
    fn reset_root(mut self, operator: Operator, right: Option<PlanNode>) -> Self {
        let mut inputs = vec![self.root];
        inputs.extend(right);
        self.root = PlanNode { operator, inputs };
        self
    }

    pub fn scan<S: Into<String>>(table_name: S) -> Self {
        Self::from_table_scan(TableScan::new(table_name))
    }

    pub fn scan_as<S: Into<String>, A: Into<String>>(table_name: S, alias: A) -> Self {
        Self::from_table_scan(TableScan::with_alias(table_name, alias))
    }

    fn from_table_scan(table_scan: TableScan) -> Self {
        Self {
            root: PlanNode {
                operator: Operator::Scan(table_scan),
                inputs: vec![],
            },
        }
    }

    pub fn selection<S: Into<String>>(self, predicate: S) -> Self {
        self.reset_root(Operator::Selection(Selection::new(predicate)), None)
    }

    pub fn projection<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reset_root(Operator::Projection(Projection::new(columns)), None)
    }

    pub fn distinct(self) -> Self {
        self.reset_root(Operator::Distinct(Distinct), None)
    }

    /// Joins the current plan (left input) with `right`.
    pub fn join<S: Into<String>>(self, predicate: S, right: Plan) -> Self {
        self.reset_root(Operator::Join(Join::new(predicate)), Some(right.root))
    }

    pub fn build(self) -> Plan {
        Plan { root: self.root }
    }
}
