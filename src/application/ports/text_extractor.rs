#[derive(Debug)]
pub enum ExtractionError {
    CorruptedFile(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Converts a binary document into plain text, page texts joined by
/// newlines in page order. Pages with no extractable text contribute an
/// empty string, so the result may be empty for image-only documents.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError>;
}
