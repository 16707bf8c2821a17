use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The document lacks the export root or its patient list.
    #[error("export has no <{root}> element containing <{patient}> records")]
    MissingRoot { root: String, patient: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
