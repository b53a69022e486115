pub mod http_file_fetcher;
pub mod openai_client;
pub mod pdf_extractor;

pub use http_file_fetcher::HttpFileFetcher;
pub use openai_client::{OpenAiClient, OpenAiConfig};
pub use pdf_extractor::PdfTextExtractor;
