use prettytable::Table;

use crate::plan::Plan;

/// Record of one rule application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTrace {
    pub rule_name: String,
    /// Debug rendering of the plan before the rule ran.
    pub before: String,
    pub after: String,
    pub changed: bool,
}

/// Result of running the heuristic optimizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizedPlan {
    pub plan: Plan,
    /// Number of rule batches run.
    pub iterations: usize,
    /// Number of rule applications that changed the plan.
    pub rules_applied: usize,
    pub trace: Vec<RuleTrace>,
}

impl OptimizedPlan {
    /// Tabulates the rule applications, in the order they ran.
    pub fn trace_table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(row!["#", "Rule", "Changed", "Before", "After"]);
        for (idx, entry) in self.trace.iter().enumerate() {
            table.add_row(row![
                idx + 1,
                entry.rule_name,
                entry.changed,
                entry.before,
                entry.after
            ]);
        }
        table
    }
}
