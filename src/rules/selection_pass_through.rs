use crate::error::OptResult;
use crate::operator::OperatorKind;
use crate::plan::PlanNode;
use crate::rules::{Rule, Transformed};

/// Baseline selection pushdown.
///
/// Walks through joins, projections and distincts, rebuilding each of them from its
/// rewritten inputs. Selections and scans end the walk and are kept as they are. No node is
/// ever moved, so the output always equals the input and the rule never reports a change.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionPassThrough;

impl Rule for SelectionPassThrough {
    fn name(&self) -> &'static str {
        "SelectionPassThrough"
    }

    fn apply(&self, node: PlanNode) -> OptResult<Transformed> {
        Ok(Transformed::no(pass_through(node)?))
    }
}

fn pass_through(node: PlanNode) -> OptResult<PlanNode> {
    match node.operator().kind() {
        OperatorKind::Selection | OperatorKind::Scan => Ok(node),
        OperatorKind::Join | OperatorKind::Projection | OperatorKind::Distinct => {
            let (operator, inputs) = node.into_parts();
            let inputs = inputs
                .into_iter()
                .map(pass_through)
                .collect::<OptResult<Vec<_>>>()?;
            PlanNode::try_new(operator, inputs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::LogicalPlanBuilder;
    use crate::sample::{purchase_query, unfiltered_purchase_query};

    #[test]
    fn test_preserves_structure() {
        for plan in [purchase_query(), unfiltered_purchase_query()] {
            let result = SelectionPassThrough.apply(plan.root().clone()).unwrap();
            assert!(!result.changed);
            assert_eq!(plan.root(), &result.node);
        }
    }

    #[test]
    fn test_selection_above_join_stays() {
        let plan = LogicalPlanBuilder::scan_as("Product", "x")
            .join("x.pid = y.pid", LogicalPlanBuilder::scan_as("Purchase", "y").build())
            .selection("x.price > 100")
            .build();

        let result = SelectionPassThrough.apply(plan.root().clone()).unwrap();
        assert_eq!(plan.root(), &result.node);
    }

    #[test]
    fn test_scan() {
        let plan = LogicalPlanBuilder::scan("Product").build();
        let result = SelectionPassThrough.apply(plan.root().clone()).unwrap();
        assert_eq!(plan.root(), &result.node);
    }
}
