/// Errors raised while loading or querying cavity engineering-data files.
#[derive(thiserror::Error, Debug)]
pub enum CavDataError {
    /// The file could not be opened or read.
    #[error("error reading '{path}': {source}")]
    Io {
        path: Box<str>,
        #[source]
        source: std::io::Error,
    },

    /// A data line had fewer whitespace-separated fields than expected.
    #[error("malformed line {line} in '{path}': {detail}")]
    MalformedLine {
        path: Box<str>,
        line: usize,
        detail: Box<str>,
    },

    /// The axis-field position column was not strictly increasing.
    #[error("axis field positions in '{path}' are not strictly increasing at line {line}")]
    NonIncreasingAxis { path: Box<str>, line: usize },

    /// The table had no data rows at all.
    #[error("'{path}' contains no data rows")]
    EmptyTable { path: Box<str> },

    /// A thin-lens line named an element kind this core does not recognize.
    #[error("undefined multipole element kind '{kind}' in '{path}' at line {line}")]
    UnknownSliceKind {
        path: Box<str>,
        line: usize,
        kind: Box<str>,
    },
}
