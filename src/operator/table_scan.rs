use std::fmt::{Display, Formatter};

/// Leaf operator reading a base table.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct TableScan {
    table_name: String,
    alias: Option<String>,
}

impl TableScan {
    pub fn new<S: Into<String>>(table_name: S) -> Self {
        Self {
            table_name: table_name.into(),
            alias: None,
        }
    }

    pub fn with_alias<S: Into<String>, A: Into<String>>(table_name: S, alias: A) -> Self {
        Self {
            table_name: table_name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Name other operators use to qualify columns of this table, e.g. `x` in `x.price`.
    pub fn qualifier(&self) -> &str {
        self.alias().unwrap_or(&self.table_name)
    }
}

impl Display for TableScan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} {}", self.table_name, alias),
            None => write!(f, "{}", self.table_name),
        }
    }
}
