pub mod dto;
pub mod extractor;
pub mod file_names;
pub mod upload;

pub use dto::ProcessResponse;
pub use extractor::{extract_text, ExtractionError};
pub use upload::TempUpload;

use crate::error::AppError;

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Validation(err.to_string())
    }
}
