use std::collections::BTreeSet;
use std::iter;

use anyhow::anyhow;
use itertools::Itertools;
use log::debug;

use crate::error::OptResult;
use crate::operator::{Operator, Selection};
use crate::plan::PlanNode;
use crate::rules::{Rule, Transformed};

/// Moves filters below joins.
///
/// A selection directly above a join is split into its `AND` conjuncts. A conjunct whose
/// qualified column references (`x.price`) all belong to tables of one join input is moved
/// into a new selection directly above that input. Conjuncts referencing both inputs, or no
/// table at all, stay above the join. Predicates with a top-level `OR` are kept whole.
///
/// Tables are identified by their scan alias, or by their name when they have no alias.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionPushdown;

impl Rule for SelectionPushdown {
    fn name(&self) -> &'static str {
        "SelectionPushdown"
    }

    fn apply(&self, node: PlanNode) -> OptResult<Transformed> {
        let mut changed = false;
        let node = push_down(node, &mut changed)?;
        Ok(Transformed { node, changed })
    }
}

fn push_down(node: PlanNode, changed: &mut bool) -> OptResult<PlanNode> {
    let node = match node.into_parts() {
        (Operator::Selection(selection), mut inputs)
            if inputs
                .first()
                .map_or(false, |input| input.operator().as_join().is_some()) =>
        {
            let join = inputs.remove(0);
            push_below_join(selection, join, changed)?
        }
        (operator, inputs) => PlanNode::try_new(operator, inputs)?,
    };

    let (operator, inputs) = node.into_parts();
    let inputs = inputs
        .into_iter()
        .map(|input| push_down(input, changed))
        .collect::<OptResult<Vec<_>>>()?;
    PlanNode::try_new(operator, inputs)
}

fn push_below_join(selection: Selection, join: PlanNode, changed: &mut bool) -> OptResult<PlanNode> {
    let (join_operator, inputs) = join.into_parts();
    let [left, right]: [PlanNode; 2] = inputs
        .try_into()
        .map_err(|inputs: Vec<PlanNode>| anyhow!("join has {} inputs", inputs.len()))?;

    let left_qualifiers = table_qualifiers(&left);
    let right_qualifiers = table_qualifiers(&right);

    let mut left_conjuncts = vec![];
    let mut right_conjuncts = vec![];
    let mut kept = vec![];
    for conjunct in split_conjuncts(selection.predicate()) {
        let referenced = referenced_qualifiers(conjunct);
        let on_left = !referenced.is_empty() && referenced.is_subset(&left_qualifiers);
        let on_right = !referenced.is_empty() && referenced.is_subset(&right_qualifiers);
        match (on_left, on_right) {
            (true, false) => left_conjuncts.push(conjunct),
            (false, true) => right_conjuncts.push(conjunct),
            _ => kept.push(conjunct),
        }
    }

    if left_conjuncts.is_empty() && right_conjuncts.is_empty() {
        let join = PlanNode::try_new(join_operator, vec![left, right])?;
        return PlanNode::try_new(Operator::Selection(selection), vec![join]);
    }

    debug!(
        "Pushing {:?} to left and {:?} to right of {}",
        left_conjuncts, right_conjuncts, join_operator
    );
    *changed = true;

    let join = PlanNode::try_new(
        join_operator,
        vec![
            filter(left, &left_conjuncts)?,
            filter(right, &right_conjuncts)?,
        ],
    )?;
    filter(join, &kept)
}

/// Wraps `input` in a selection of the given conjuncts, if there are any.
fn filter(input: PlanNode, conjuncts: &[&str]) -> OptResult<PlanNode> {
    if conjuncts.is_empty() {
        return Ok(input);
    }
    PlanNode::try_new(
        Operator::Selection(Selection::new(conjuncts.iter().join(" AND "))),
        vec![input],
    )
}

fn table_qualifiers(node: &PlanNode) -> BTreeSet<&str> {
    node.table_scans()
        .into_iter()
        .map(|scan| scan.qualifier())
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

/// Splits a predicate on its top-level `AND` keywords.
///
/// Quoted literals and parenthesized groups are never split, and the `AND` of a
/// `BETWEEN .. AND ..` is not a separator. A predicate containing a top-level `OR` is
/// returned whole.
fn split_conjuncts(predicate: &str) -> Vec<&str> {
    let mut conjuncts = vec![];
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut in_between = false;
    let mut word_start = None;

    // The trailing separator flushes the last word.
    for (idx, ch) in predicate
        .char_indices()
        .chain(iter::once((predicate.len(), ' ')))
    {
        if in_quote {
            if ch == '\'' {
                in_quote = false;
            }
            continue;
        }
        if is_word_char(ch) {
            word_start.get_or_insert(idx);
            continue;
        }

        if let Some(word_start) = word_start.take() {
            let word = &predicate[word_start..idx];
            if depth == 0 {
                if word.eq_ignore_ascii_case("or") {
                    return vec![predicate.trim()];
                } else if word.eq_ignore_ascii_case("between") {
                    in_between = true;
                } else if word.eq_ignore_ascii_case("and") {
                    if in_between {
                        in_between = false;
                    } else {
                        conjuncts.push(predicate[start..word_start].trim());
                        start = idx;
                    }
                }
            }
        }

        match ch {
            '\'' => in_quote = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    conjuncts.push(predicate[start..].trim());
    conjuncts.retain(|conjunct| !conjunct.is_empty());
    conjuncts
}

/// Qualifiers of the `qualifier.column` references in `conjunct`, outside quoted literals.
fn referenced_qualifiers(conjunct: &str) -> BTreeSet<&str> {
    let mut qualifiers = BTreeSet::new();
    let mut in_quote = false;
    let mut word_start = None;

    for (idx, ch) in conjunct
        .char_indices()
        .chain(iter::once((conjunct.len(), ' ')))
    {
        if in_quote {
            if ch == '\'' {
                in_quote = false;
            }
            continue;
        }
        if is_word_char(ch) {
            word_start.get_or_insert(idx);
            continue;
        }

        if let Some(word_start) = word_start.take() {
            if let Some((qualifier, column)) = conjunct[word_start..idx].split_once('.') {
                let is_name = qualifier
                    .chars()
                    .next()
                    .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
                if is_name && !column.is_empty() {
                    qualifiers.insert(qualifier);
                }
            }
        }
        if ch == '\'' {
            in_quote = true;
        }
    }

    qualifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::LogicalPlanBuilder;
    use crate::sample::unfiltered_purchase_query;

    #[test]
    fn test_split_conjuncts() {
        assert_eq!(vec!["x.price > 100"], split_conjuncts("x.price > 100"));
        assert_eq!(
            vec!["x.price > 100", "z.city = 'Seattle'"],
            split_conjuncts("x.price > 100 and z.city = 'Seattle'")
        );
        assert_eq!(
            vec!["z.city = 'Salt AND Pepper'", "x.pid = 1"],
            split_conjuncts("z.city = 'Salt AND Pepper' AND x.pid = 1")
        );
        assert_eq!(
            vec!["(x.a = 1 AND y.b = 2)", "z.c = 3"],
            split_conjuncts("(x.a = 1 AND y.b = 2) AND z.c = 3")
        );
        assert_eq!(
            vec!["x.price BETWEEN 10 AND 20", "y.qty > 2"],
            split_conjuncts("x.price BETWEEN 10 AND 20 AND y.qty > 2")
        );
        assert_eq!(
            vec!["x.a = 1 AND y.b = 2 OR z.c = 3"],
            split_conjuncts("x.a = 1 AND y.b = 2 OR z.c = 3")
        );
    }

    #[test]
    fn test_referenced_qualifiers() {
        let qualifiers: Vec<&str> =
            referenced_qualifiers("z.city = 'a.b' AND x.price > 1.5 AND x.pid = Purchase.pid")
                .into_iter()
                .collect();
        assert_eq!(vec!["Purchase", "x", "z"], qualifiers);
        assert!(referenced_qualifiers("1 = 1").is_empty());
    }

    #[test]
    fn test_push_into_nested_joins() {
        let result = SelectionPushdown
            .apply(unfiltered_purchase_query().into_root())
            .unwrap();
        assert!(result.changed);

        let customers = LogicalPlanBuilder::scan_as("Customer", "z")
            .selection("z.city = 'Seattle'")
            .build();
        let purchases = LogicalPlanBuilder::scan_as("Purchase", "y")
            .join("y.cid = z.cid", customers)
            .build();
        let expected = LogicalPlanBuilder::scan_as("Product", "x")
            .selection("x.price > 100")
            .join("x.pid = y.pid", purchases)
            .projection(["x.name", "y.name"])
            .distinct()
            .build();
        assert_eq!(expected.root(), &result.node);

        let again = SelectionPushdown.apply(result.node.clone()).unwrap();
        assert!(!again.changed);
        assert_eq!(result.node, again.node);
    }

    #[test]
    fn test_mixed_conjunct_stays_above_join() {
        let plan = LogicalPlanBuilder::scan_as("Product", "x")
            .join("true", LogicalPlanBuilder::scan_as("Purchase", "y").build())
            .selection("x.price > 100 AND y.qty > 2 AND x.pid = y.pid AND 1 = 1")
            .build();

        let expected = LogicalPlanBuilder::scan_as("Product", "x")
            .selection("x.price > 100")
            .join(
                "true",
                LogicalPlanBuilder::scan_as("Purchase", "y")
                    .selection("y.qty > 2")
                    .build(),
            )
            .selection("x.pid = y.pid AND 1 = 1")
            .build();

        let result = SelectionPushdown.apply(plan.into_root()).unwrap();
        assert!(result.changed);
        assert_eq!(expected.root(), &result.node);
    }

    #[test]
    fn test_self_join_is_ambiguous() {
        let plan = LogicalPlanBuilder::scan("Product")
            .join("true", LogicalPlanBuilder::scan("Product").build())
            .selection("Product.price > 100")
            .build();

        let result = SelectionPushdown.apply(plan.root().clone()).unwrap();
        assert!(!result.changed);
        assert_eq!(plan.root(), &result.node);
    }

    #[test]
    fn test_selection_over_scan_untouched() {
        let plan = LogicalPlanBuilder::scan_as("Product", "x")
            .selection("x.price > 100")
            .projection(["x.name"])
            .build();

        let result = SelectionPushdown.apply(plan.root().clone()).unwrap();
        assert!(!result.changed);
        assert_eq!(plan.root(), &result.node);
    }
}
