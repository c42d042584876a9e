use itertools::Itertools;
use log::{debug, trace};

use crate::error::OptResult;
use crate::heuristic::{OptimizedPlan, RuleTrace};
use crate::plan::{Plan, PlanNode};
use crate::rules::{Rule, RuleImpl, SelectionPassThrough};

pub const DEFAULT_MAX_ITER_TIMES: usize = 1000;

#[derive(Clone, Debug)]
pub struct HepOptimizer {
    /// Max number of iteration
    max_iter_times: usize,
    rules: Vec<RuleImpl>,
}

impl Default for HepOptimizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ITER_TIMES,
            vec![RuleImpl::from(SelectionPassThrough)],
        )
    }
}

impl HepOptimizer {
    pub fn new(max_iter_times: usize, rules: Vec<RuleImpl>) -> Self {
        Self {
            max_iter_times,
            rules,
        }
    }

    pub fn rules(&self) -> &[RuleImpl] {
        &self.rules
    }

    /// Runs all rules in order over the plan, batch after batch, until a whole batch leaves
    /// the plan unchanged or `max_iter_times` batches have run.
    pub fn find_best_plan(&self, plan: Plan) -> OptResult<OptimizedPlan> {
        let mut root = plan.into_root();
        let mut iterations = 0;
        let mut rules_applied = 0;
        let mut rule_traces = vec![];

        for _times in 0..self.max_iter_times {
            iterations += 1;
            // The plan no longer changes after iteration
            let mut fixed_point = true;

            for rule in &self.rules {
                trace!("Trying to apply rule {:?} to plan {:?}", rule, root.operator());
                let before = render(&root);
                let transformed = rule.apply(root)?;
                root = transformed.node;

                if transformed.changed {
                    rules_applied += 1;
                    fixed_point = false;
                    debug!(
                        "Plan after applying rule {} is\n{}",
                        rule.name(),
                        render(&root)
                    );
                } else {
                    trace!("Rule {} left plan unchanged", rule.name());
                }

                rule_traces.push(RuleTrace {
                    rule_name: rule.name().to_string(),
                    before,
                    after: render(&root),
                    changed: transformed.changed,
                });
            }

            if fixed_point {
                break;
            }
        }

        debug!(
            "Heuristic optimization finished after {} iterations, {} rules applied",
            iterations, rules_applied
        );

        Ok(OptimizedPlan {
            plan: Plan::new(root),
            iterations,
            rules_applied,
            trace: rule_traces,
        })
    }
}

fn render(node: &PlanNode) -> String {
    node.render_debug().join("\n")
}

/// Optimizes `plan` with the baseline selection pushdown, leaving `plan` untouched.
pub fn optimize(plan: &Plan) -> OptResult<Plan> {
    optimize_with(plan, HepOptimizer::default().rules().to_vec())
}

/// Optimizes `plan` with the given rules, leaving `plan` untouched.
pub fn optimize_with(plan: &Plan, rules: Vec<RuleImpl>) -> OptResult<Plan> {
    HepOptimizer::new(DEFAULT_MAX_ITER_TIMES, rules)
        .find_best_plan(plan.clone())
        .map(|optimized| optimized.plan)
}
