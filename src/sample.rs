//! Ready-made plans for demos and tests.

use crate::plan::{LogicalPlanBuilder, Plan};

/// Canonical plan of
///
/// ```sql
/// SELECT DISTINCT x.name, y.name
/// FROM Product x, Purchase y, Customer z
/// WHERE x.pid = y.pid AND y.cid = z.cid AND x.price > 100 AND z.city = 'Seattle'
/// ```
///
/// with each single-table filter placed directly above its scan.
pub fn purchase_query() -> Plan {
    let customers = LogicalPlanBuilder::scan("Customer")
        .selection("z.city = 'Seattle'")
        .build();
    let purchases = LogicalPlanBuilder::scan("Purchase")
        .join("y.cid = z.cid", customers)
        .build();

    LogicalPlanBuilder::scan("Product")
        .selection("x.price > 100")
        .join("x.pid = y.pid", purchases)
        .projection(["x.name", "y.name"])
        .distinct()
        .build()
}

/// The same query before any filter has been pushed: a single selection holding the whole
/// where clause sits on top of the joins of aliased scans.
pub fn unfiltered_purchase_query() -> Plan {
    let purchases = LogicalPlanBuilder::scan_as("Purchase", "y")
        .join("y.cid = z.cid", LogicalPlanBuilder::scan_as("Customer", "z").build())
        .build();

    LogicalPlanBuilder::scan_as("Product", "x")
        .join("x.pid = y.pid", purchases)
        .selection("x.price > 100 AND z.city = 'Seattle'")
        .projection(["x.name", "y.name"])
        .distinct()
        .build()
}
