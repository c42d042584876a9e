use env_logger::Env;
use log::info;

use relalg_rewriter::heuristic::{HepOptimizer, DEFAULT_MAX_ITER_TIMES};
use relalg_rewriter::rules::{RuleImpl, SelectionPassThrough, SelectionPushdown};
use relalg_rewriter::sample::{purchase_query, unfiltered_purchase_query};
use relalg_rewriter::{optimize, to_text, OptResult};

fn main() -> OptResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let canonical = purchase_query();
    let optimized = optimize(&canonical)?;

    println!("Initial Canonical Query Tree:");
    println!("{canonical}");
    println!("\nOptimized Query Tree:");
    println!("{optimized}");
    println!("\nRefined SQL Query:");
    println!("{}", to_text(&optimized));

    info!("Running selection pushdown over the unfiltered query");
    let rules = vec![
        RuleImpl::from(SelectionPassThrough),
        RuleImpl::from(SelectionPushdown),
    ];
    let result = HepOptimizer::new(DEFAULT_MAX_ITER_TIMES, rules)
        .find_best_plan(unfiltered_purchase_query())?;
    info!(
        "Pushdown finished after {} iterations, {} rules applied",
        result.iterations, result.rules_applied
    );

    println!("\nPushed Down Query Tree:");
    println!("{}", result.plan);
    println!();
    result.trace_table().printstd();

    Ok(())
}
