use std::fmt::{Display, Formatter};

use itertools::Itertools;

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Projection {
    columns: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column list as it appears in a select clause.
    pub fn column_list(&self) -> String {
        self.columns.iter().join(", ")
    }

    /// Splits a rendered column list back into columns.
    ///
    /// Only commas outside brackets and quoted literals separate columns, so
    /// `coalesce(x.a, 0), y.name` yields two columns.
    pub fn split_column_list(list: &str) -> Vec<&str> {
        let mut columns = vec![];
        let mut start = 0;
        let mut depth = 0usize;
        let mut quote = None;

        for (idx, ch) in list.char_indices() {
            match (quote, ch) {
                (Some(open), _) if ch == open => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(ch),
                (None, '(') => depth += 1,
                (None, ')') => depth = depth.saturating_sub(1),
                (None, ',') if depth == 0 => {
                    columns.push(list[start..idx].trim());
                    start = idx + ch.len_utf8();
                }
                (None, _) => {}
            }
        }

        columns.push(list[start..].trim());
        columns.retain(|column| !column.is_empty());
        columns
    }
}

impl Display for Projection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "π({})", self.column_list())
    }
}
