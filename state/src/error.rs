/// Errors raised by the linear-algebra helpers the propagation kernel relies on.
#[derive(thiserror::Error, Debug)]
pub enum MathError {
    /// Misalignment conjugation requires inverting `misalign`; this is raised
    /// when the matrix is numerically singular (no pivot survives elimination).
    #[error("failed to invert misalignment matrix: {0}")]
    SingularMisalign(Box<str>),
}

/// Errors raised while constructing or propagating a `MomentState`.
#[derive(thiserror::Error, Debug)]
pub enum StateError {
    #[error(transparent)]
    Math(#[from] MathError),

    /// An element's `recompute_matrix` failed.
    #[error("element '{element}' failed to recompute its transfer matrix: {detail}")]
    Recompute { element: Box<str>, detail: Box<str> },

    /// A configured vector/matrix did not have the expected shape.
    #[error("'{what}' has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        what: Box<str>,
        got: Vec<usize>,
        expected: Vec<usize>,
    },
}
