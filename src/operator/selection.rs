use derive_more::Display;

/// Logical selection operator, keeps rows of its input matching `predicate`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Display)]
#[display(fmt = "σ({})", predicate)]
pub struct Selection {
    predicate: String,
}

impl Selection {
    pub fn new<S: Into<String>>(predicate: S) -> Self {
        Self {
            predicate: predicate.into(),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }
}
