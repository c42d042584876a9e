use derive_more::Display;

/// Logical join operator.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Display)]
#[display(fmt = "⨝({})", predicate)]
pub struct Join {
    predicate: String,
}

impl Join {
    pub fn new<S: Into<String>>(predicate: S) -> Self {
        Self {
            predicate: predicate.into(),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }
}
