use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required header is absent from a table; the table is abandoned.
    #[error("required column '{column}' not found in table")]
    MissingColumn { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
