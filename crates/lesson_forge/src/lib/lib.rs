pub mod api;
mod error;
pub mod extract;
mod llm;
pub mod parser;
mod processor;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::Error;
pub use extract::{
    pdf::{DocumentError, DocumentParser, PdfParser},
    ExtractedText, ExtractionError, Extractor, Input,
};
pub use llm::gemini;
pub use llm::generator::{
    ContentGenerator, ContentKind, GenerationError, GenerationRequest, GenerationResult,
};
pub use processor::{builder::ContentProcessorBuilder, ContentProcessor, ResponseBundle};
