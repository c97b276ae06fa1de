use std::{fmt::Display, future::Future};

use serde::Serialize;
use serde_json::Value;

/// Upstream message fragment that identifies a rejected API key
const INVALID_CREDENTIAL_MARKER: &str = "API key not valid";

pub trait ContentGenerator: Send + Sync {
    type Error: Display + Send;

    /// Sends `prompt` to the model and returns the raw completion text
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Runs a single generation call and shapes the output as requested.
    ///
    /// Every failure, including unparseable JSON, is logged here and reduced
    /// to a [`GenerationError`] that is safe to show to clients.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResult, GenerationError>> + Send {
        async move {
            let raw = self.complete(&request.prompt).await.map_err(|e| {
                tracing::error!(error = %e, kind = ?request.kind, "Generation call failed");
                GenerationError::from_upstream(&e)
            })?;

            if !request.expect_json {
                return Ok(GenerationResult::Text(raw));
            }

            parse_json_output(&raw)
                .map(GenerationResult::Json)
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        kind = ?request.kind,
                        output = %raw,
                        "Model returned malformed JSON"
                    );
                    GenerationError::Failed
                })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Your Google AI API key is not valid. Please check your .env file.")]
    InvalidCredential,
    #[error("Failed to generate content from AI model.")]
    Failed,
}

impl GenerationError {
    pub fn from_upstream(error: &impl Display) -> Self {
        if error.to_string().contains(INVALID_CREDENTIAL_MARKER) {
            GenerationError::InvalidCredential
        } else {
            GenerationError::Failed
        }
    }
}

/// Removes Markdown code fences (```json and ```) the model tends to wrap
/// JSON in, then parses what is left.
pub fn parse_json_output(raw: &str) -> serde_json::Result<Value> {
    let sanitized = raw.replace("```json", "").replace("```", "");
    serde_json::from_str(sanitized.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Lesson,
    Quiz,
    Assignment,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Lesson,
        ContentKind::Quiz,
        ContentKind::Assignment,
    ];

    const TEXT_PLACEHOLDER: &str = "{{text}}";

    fn template(self) -> &'static str {
        match self {
            ContentKind::Lesson => include_str!("./prompts/lesson.txt"),
            ContentKind::Quiz => include_str!("./prompts/quiz.txt"),
            ContentKind::Assignment => include_str!("./prompts/assignment.txt"),
        }
    }

    pub fn expects_json(self) -> bool {
        match self {
            ContentKind::Lesson | ContentKind::Quiz => true,
            ContentKind::Assignment => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub kind: ContentKind,
    pub prompt: String,
    pub expect_json: bool,
}

impl GenerationRequest {
    pub fn new(kind: ContentKind, text: &str) -> Self {
        Self {
            kind,
            prompt: kind.template().replace(ContentKind::TEXT_PLACEHOLDER, text),
            expect_json: kind.expects_json(),
        }
    }
}

/// Output of one generation call: parsed JSON or the model's text verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Json(Value),
    Text(String),
}
