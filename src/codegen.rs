//! Renders a plan back into query text.
//!
//! Projection and distinct expand their input into a nested subquery. Selection and join
//! only reference their inputs by [`PlanNode::relation_label`], so a filtered or joined input
//! shows up as its underlying table name, or as `Join` for a join.

use crate::operator::Operator;
use crate::plan::{Plan, PlanNode};

pub fn to_text(plan: &Plan) -> String {
    node_to_text(plan.root())
}

pub fn node_to_text(node: &PlanNode) -> String {
    let inputs = node.inputs();
    match node.operator() {
        Operator::Scan(scan) => scan.to_string(),
        Operator::Selection(selection) => format!(
            "SELECT * FROM {} WHERE {}",
            inputs[0].relation_label(),
            selection.predicate()
        ),
        Operator::Projection(projection) => format!(
            "SELECT {} FROM ({})",
            projection.column_list(),
            node_to_text(&inputs[0])
        ),
        Operator::Join(join) => format!(
            "SELECT * FROM {} JOIN {} ON {}",
            inputs[0].relation_label(),
            inputs[1].relation_label(),
            join.predicate()
        ),
        Operator::Distinct(_) => format!(
            "SELECT DISTINCT {} FROM ({})",
            inputs[0].relation_label(),
            node_to_text(&inputs[0])
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::LogicalPlanBuilder;

    #[test]
    fn test_scan() {
        assert_eq!("Product", to_text(&LogicalPlanBuilder::scan("Product").build()));
        assert_eq!(
            "Product x",
            to_text(&LogicalPlanBuilder::scan_as("Product", "x").build())
        );
    }

    #[test]
    fn test_selection() {
        let plan = LogicalPlanBuilder::scan("Customer")
            .selection("z.city = 'Seattle'")
            .build();
        assert_eq!(
            "SELECT * FROM Customer WHERE z.city = 'Seattle'",
            to_text(&plan)
        );
    }

    #[test]
    fn test_projection_expands_input() {
        let plan = LogicalPlanBuilder::scan("Customer")
            .selection("z.city = 'Seattle'")
            .projection(["z.name", "z.cid"])
            .build();
        assert_eq!(
            "SELECT z.name, z.cid FROM (SELECT * FROM Customer WHERE z.city = 'Seattle')",
            to_text(&plan)
        );
    }

    #[test]
    fn test_join_splices_labels() {
        let plan = LogicalPlanBuilder::scan("Product")
            .selection("x.price > 100")
            .join(
                "x.pid = y.pid",
                LogicalPlanBuilder::scan("Purchase")
                    .join("y.cid = z.cid", LogicalPlanBuilder::scan("Customer").build())
                    .build(),
            )
            .build();
        assert_eq!(
            "SELECT * FROM Product JOIN Join ON x.pid = y.pid",
            to_text(&plan)
        );
    }

    #[test]
    fn test_distinct() {
        let plan = LogicalPlanBuilder::scan("Product")
            .projection(["x.name"])
            .distinct()
            .build();
        assert_eq!(
            "SELECT DISTINCT Product FROM (SELECT x.name FROM (Product))",
            to_text(&plan)
        );
    }
}
