use thiserror::Error;

/// Errors surfaced by the tree walks. Every operation either produces a
/// complete result or one of these; there is no partial output.
#[derive(Debug, Error)]
pub enum AstError {
    /// The node kind has no standalone rendering or graph rule in the
    /// position it was found in.
    #[error("unsupported construct: no rule for standalone {construct} node")]
    UnsupportedConstruct { construct: &'static str },

    /// A field holds a value whose shape violates the kind's contract,
    /// which indicates a bug in whatever produced the tree.
    #[error("malformed tree: {detail}")]
    MalformedTree { detail: String },

    /// The graph visitor reached a non-root node without parent links.
    #[error("{construct} node carries no parent link; run annotate_parents over the tree first")]
    NotAnnotated { construct: &'static str },
}

impl AstError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        AstError::MalformedTree {
            detail: detail.into(),
        }
    }
}
