use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("missing report file: {0}")]
    MissingReport(PathBuf),

    #[error("descriptor {path}: thread count line {line:?} is not an integer")]
    MalformedDescriptor { path: PathBuf, line: String },

    #[error("report {path}: {reason}")]
    InvalidReport { path: PathBuf, reason: String },

    #[error("expected column {0:?} is absent from the report")]
    SchemaMismatch(String),

    #[error("group ({variant}, {settings:?}) holds no rows")]
    EmptyGroup { variant: i64, settings: String },

    #[error("unknown benchmark variant {0}")]
    UnknownVariant(i64),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataframe operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}
