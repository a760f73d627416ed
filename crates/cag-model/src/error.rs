use thiserror::Error;

#[derive(Debug, Error)]
pub enum CagError {
    #[error("line {line}: missing required field '{field}'")]
    MissingRequiredField { line: usize, field: &'static str },
}

pub type Result<T> = std::result::Result<T, CagError>;
