pub mod file_fetcher;
pub mod model_provider;
pub mod text_extractor;
pub mod vector_index;

pub use file_fetcher::{FetchError, FileFetcher};
pub use model_provider::{
    CompletionError, CompletionProvider, EmbeddingError, EmbeddingProvider, PromptMessage,
};
pub use text_extractor::{ExtractionError, TextExtractor};
pub use vector_index::{VectorIndex, VectorIndexError};
