/// Splits extracted text into overlapping token windows sized for embedding.
///
/// Tokens are whitespace-separated words. Window `i` starts at
/// `i * (chunk_size - overlap)` and covers up to `chunk_size` tokens;
/// windows are emitted left to right until the start index passes the end of
/// the token sequence, so the last window may be short.
#[derive(Debug, Clone)]
pub struct TokenChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for TokenChunker {
    fn default() -> Self {
        Self::new(300, 50)
    }
}

impl TokenChunker {
    /// `overlap` must be strictly less than `chunk_size`; the chunker does
    /// not validate this at runtime.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        debug_assert!(overlap < chunk_size);
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let stride = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let end = (start + self.chunk_size).min(tokens.len());
            chunks.push(tokens[start..end].join(" "));
            start += stride;
        }

        chunks
    }
}
