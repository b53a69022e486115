use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::text_extractor::{ExtractionError, TextExtractor};

/// PDF text extraction backed by lopdf. Pages are extracted in parallel and
/// reassembled in page order.
pub struct PdfTextExtractor {
    password: String,
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let mut doc =
            Document::load_mem(data).map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            // An empty password handles owner-locked PDFs that are still
            // readable; anything else is treated as unreadable.
            doc.decrypt(&self.password)
                .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let mut extracted: Vec<(u32, String)> = page_numbers
            .into_par_iter()
            .map(|page_num| {
                let text = doc.extract_text(&[page_num]).unwrap_or_default();
                (page_num, text)
            })
            .collect();

        extracted.sort_by_key(|(page_num, _)| *page_num);

        let pages: Vec<String> = extracted.into_iter().map(|(_, text)| text).collect();

        Ok(pages.join("\n"))
    }
}
