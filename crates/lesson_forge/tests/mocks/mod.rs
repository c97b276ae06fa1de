pub mod document_parser;
pub mod generator;
pub mod transcript_fetcher;
