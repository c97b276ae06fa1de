//! # Text extraction
//!
//! Turns whatever the client sent (raw text, a video URL or an uploaded PDF)
//! into a single plain-text string capped at a fixed number of characters.

pub mod pdf;

use std::ops::Deref;

use bytes::Bytes;

use crate::{
    extract::pdf::{DocumentError, DocumentParser},
    yt::{TranscriptError, TranscriptFetcher},
};

pub const DEFAULT_MAX_CHARS: usize = 15_000;

/// One request's source material. Variants are listed in the order they are
/// preferred when a payload carries more than one.
#[derive(Debug, Clone)]
pub enum Input {
    Text(String),
    Url(String),
    File(Bytes),
}

impl Input {
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Text(_) => "text",
            Input::Url(_) => "url",
            Input::File(_) => "file",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Plain text ready to be embedded in prompts, at most `max_chars` characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(mut text: String, max_chars: usize) -> Self {
        if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
            text.truncate(byte_idx);
        }
        ExtractedText(text)
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for ExtractedText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub struct Extractor<T, D> {
    transcripts: T,
    documents: D,
    max_chars: usize,
}

impl<T, D> Extractor<T, D>
where
    T: TranscriptFetcher,
    D: DocumentParser,
{
    pub fn new(transcripts: T, documents: D, max_chars: usize) -> Self {
        Self {
            transcripts,
            documents,
            max_chars,
        }
    }

    /// Runs the strategy matching the input variant and caps the result.
    ///
    /// Raw text is capped like the other two sources.
    #[tracing::instrument(skip_all, fields(input = input.kind()))]
    pub async fn extract(&self, input: Input) -> Result<ExtractedText, ExtractionError> {
        let text = match input {
            Input::Text(text) => text,
            Input::Url(url) => self.transcripts.fetch_transcript(&url).await?.text(),
            Input::File(document) => self.documents.parse_text(document).await?,
        };

        Ok(ExtractedText::new(text, self.max_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_exact_char_count() {
        let text = ExtractedText::new("a".repeat(DEFAULT_MAX_CHARS + 500), DEFAULT_MAX_CHARS);
        assert_eq!(text.len(), DEFAULT_MAX_CHARS);
        assert_eq!(text.char_count(), DEFAULT_MAX_CHARS);
    }

    #[test]
    fn test_short_text_is_untouched() {
        let text = ExtractedText::new("short".into(), DEFAULT_MAX_CHARS);
        assert_eq!(&*text, "short");

        let exact = ExtractedText::new("b".repeat(DEFAULT_MAX_CHARS), DEFAULT_MAX_CHARS);
        assert_eq!(exact.char_count(), DEFAULT_MAX_CHARS);
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        let text = ExtractedText::new("héllo wörld".into(), 7);
        assert_eq!(&*text, "héllo w");
        assert_eq!(text.char_count(), 7);

        let emoji = ExtractedText::new("🦀".repeat(10), 3);
        assert_eq!(emoji.into_inner(), "🦀🦀🦀");
    }

    #[test]
    fn test_empty_text_passes_through() {
        let text = ExtractedText::new(String::new(), DEFAULT_MAX_CHARS);
        assert_eq!(text, ExtractedText::default());
    }

    #[test]
    fn test_input_kind() {
        assert_eq!(Input::Text("t".into()).kind(), "text");
        assert_eq!(Input::Url("u".into()).kind(), "url");
        assert_eq!(Input::File(Bytes::from_static(b"%PDF")).kind(), "file");
    }
}
