//! Relational operators.
//!
//! The operator set is closed: every pass over a plan matches on [`Operator`] exhaustively, so
//! adding a variant fails to compile until each pass handles it.

use std::str::FromStr;

use derive_more::Display;
use enum_as_inner::EnumAsInner;

use crate::error::{OptError, OptResult};

mod distinct;
pub use distinct::*;
mod join;
pub use join::*;
mod projection;
pub use projection::*;
mod selection;
pub use selection::*;
mod table_scan;
pub use table_scan::*;

/// Payload-free tag of an [`Operator`].
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum OperatorKind {
    Scan,
    Selection,
    Join,
    Projection,
    Distinct,
}

impl OperatorKind {
    /// Number of inputs a node of this kind must have.
    pub fn arity(self) -> usize {
        match self {
            OperatorKind::Scan => 0,
            OperatorKind::Selection | OperatorKind::Projection | OperatorKind::Distinct => 1,
            OperatorKind::Join => 2,
        }
    }
}

/// Logical relational operator.
///
/// The display form is the one used in debug renderings, e.g. `σ(x.price > 100)`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner, Display)]
pub enum Operator {
    Scan(TableScan),
    Selection(Selection),
    Join(Join),
    Projection(Projection),
    Distinct(Distinct),
}

impl Operator {
    pub fn kind(&self) -> OperatorKind {
        match self {
            Operator::Scan(_) => OperatorKind::Scan,
            Operator::Selection(_) => OperatorKind::Selection,
            Operator::Join(_) => OperatorKind::Join,
            Operator::Projection(_) => OperatorKind::Projection,
            Operator::Distinct(_) => OperatorKind::Distinct,
        }
    }
}

/// Parses the display form of an operator back, e.g. `⨝(x.pid = y.pid)` or `Product x`.
impl FromStr for Operator {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> OptResult<Self> {
        let label = label.trim();
        let unhandled = || OptError::UnhandledVariant {
            label: label.to_string(),
        };

        let mut chars = label.chars();
        let symbol = chars.next().ok_or_else(unhandled)?;
        let payload = chars
            .as_str()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .map(str::trim);

        let operator = match (symbol, payload) {
            ('σ', Some(predicate)) => Operator::Selection(Selection::new(predicate)),
            ('⨝', Some(predicate)) => Operator::Join(Join::new(predicate)),
            ('π', Some(columns)) => {
                Operator::Projection(Projection::new(Projection::split_column_list(columns)))
            }
            ('δ', Some(_)) => Operator::Distinct(Distinct),
            _ => {
                let words: Vec<&str> = label.split_whitespace().collect();
                if !words.iter().all(|word| is_table_word(word)) {
                    return Err(unhandled().into());
                }
                match words.as_slice() {
                    [table_name] => Operator::Scan(TableScan::new(*table_name)),
                    [table_name, alias] => Operator::Scan(TableScan::with_alias(*table_name, *alias)),
                    _ => return Err(unhandled().into()),
                }
            }
        };

        Ok(operator)
    }
}

const OPERATOR_SYMBOLS: [char; 4] = ['σ', '⨝', 'π', 'δ'];

/// A table name or alias: any text without whitespace, brackets or quotes that does not start
/// with an operator symbol.
fn is_table_word(word: &str) -> bool {
    word.chars()
        .next()
        .map_or(false, |first| !OPERATOR_SYMBOLS.contains(&first))
        && !word.contains(|c: char| matches!(c, '(' | ')' | '\'' | '"'))
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_arity() {
        let arities: Vec<(OperatorKind, usize)> =
            OperatorKind::iter().map(|kind| (kind, kind.arity())).collect();
        assert_eq!(
            vec![
                (OperatorKind::Scan, 0),
                (OperatorKind::Selection, 1),
                (OperatorKind::Join, 2),
                (OperatorKind::Projection, 1),
                (OperatorKind::Distinct, 1),
            ],
            arities
        );
    }

    #[test]
    fn test_display() {
        assert_eq!("Product", Operator::Scan(TableScan::new("Product")).to_string());
        assert_eq!(
            "Product x",
            Operator::Scan(TableScan::with_alias("Product", "x")).to_string()
        );
        assert_eq!(
            "σ(x.price > 100)",
            Operator::Selection(Selection::new("x.price > 100")).to_string()
        );
        assert_eq!(
            "⨝(x.pid = y.pid)",
            Operator::Join(Join::new("x.pid = y.pid")).to_string()
        );
        assert_eq!(
            "π(x.name, y.name)",
            Operator::Projection(Projection::new(["x.name", "y.name"])).to_string()
        );
        assert_eq!("δ(DISTINCT)", Operator::Distinct(Distinct).to_string());
        assert_eq!("Join", OperatorKind::Join.to_string());
    }

    #[test]
    fn test_parse_display_form() {
        let operators = vec![
            Operator::Scan(TableScan::new("Product")),
            Operator::Scan(TableScan::with_alias("Purchase", "y")),
            Operator::Selection(Selection::new("z.city = 'Seattle'")),
            Operator::Join(Join::new("y.cid = z.cid")),
            Operator::Projection(Projection::new(["x.name", "y.name"])),
            Operator::Distinct(Distinct),
        ];

        for operator in operators {
            let parsed: Operator = operator.to_string().parse().unwrap();
            assert_eq!(operator, parsed);
        }
    }

    #[test]
    fn test_parse_opaque_payloads() {
        let operators = vec![
            Operator::Projection(Projection::new(["coalesce(x.a, 0)"])),
            Operator::Projection(Projection::new(["concat(x.first, ', ', x.last)", "y.name"])),
            Operator::Projection(Projection::new(Vec::<String>::new())),
            Operator::Scan(TableScan::new("order-items")),
            Operator::Scan(TableScan::with_alias("dbo.Bestellungen_2024", "ö")),
            Operator::Selection(Selection::new("x.tags IN ('a', 'b')")),
        ];

        for operator in operators {
            let parsed: Operator = operator.to_string().parse().unwrap();
            assert_eq!(operator, parsed);
        }
    }

    #[test]
    fn test_parse_unknown_operator() {
        for label in ["γ(count(*))", "", "Product x y", "⨝ x.pid = y.pid"] {
            let err = label.parse::<Operator>().unwrap_err();
            assert_eq!(
                Some(&OptError::UnhandledVariant {
                    label: label.to_string()
                }),
                err.downcast_ref::<OptError>(),
                "label: {label:?}"
            );
        }
    }
}
