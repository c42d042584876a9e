use derive_more::Display;

/// Removes duplicate rows of its input.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Display)]
#[display(fmt = "δ(DISTINCT)")]
pub struct Distinct;
