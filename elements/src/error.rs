/// Errors raised while configuring or synthesizing an element's transfer matrix.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("element '{element}': missing configuration key '{key}'")]
    MissingKey { element: Box<str>, key: Box<str> },

    #[error("element '{element}': key '{key}' has the wrong type, expected {expected}")]
    WrongType {
        element: Box<str>,
        key: Box<str>,
        expected: &'static str,
    },

    #[error("element '{element}': '{key}' has {got} entries, expected {expected}")]
    SizeMismatch {
        element: Box<str>,
        key: Box<str>,
        got: usize,
        expected: usize,
    },

    #[error("element '{element}': unknown cavity type '{cavtype}'")]
    UnknownCavityType { element: Box<str>, cavtype: Box<str> },

    #[error("element '{element}': index {index} into '{key}' is out of range (len {len})")]
    IndexOutOfRange {
        element: Box<str>,
        key: Box<str>,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    CavData(#[from] cavdata::CavDataError),

    #[error(transparent)]
    State(#[from] state::StateError),

    #[error(transparent)]
    Math(#[from] state::MathError),
}
