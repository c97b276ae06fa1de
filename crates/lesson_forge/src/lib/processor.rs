pub mod builder;

use serde::Serialize;

use crate::{
    extract::{pdf::DocumentParser, Extractor, Input},
    yt::TranscriptFetcher,
    ContentGenerator, ContentKind, Error, GenerationRequest, GenerationResult,
};

/// Everything generated for one input. Only ever built with all three parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseBundle {
    pub lesson: GenerationResult,
    pub quiz: GenerationResult,
    pub assignment: GenerationResult,
}

// Extracts text from an input and fans it out to the three generation prompts
#[derive(Debug)]
pub struct ContentProcessor<G, T, D> {
    generator: G,
    extractor: Extractor<T, D>,
}

impl<G, T, D> ContentProcessor<G, T, D>
where
    G: ContentGenerator + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    D: DocumentParser + Send + Sync + 'static,
{
    pub fn new(generator: G, extractor: Extractor<T, D>) -> Self {
        ContentProcessor {
            generator,
            extractor,
        }
    }

    /// Extracts the input and runs the lesson, quiz and assignment prompts
    /// concurrently. The first failure fails the whole bundle and the calls
    /// still in flight are dropped.
    #[tracing::instrument(skip_all, fields(input = input.kind()))]
    pub async fn generate_all(&self, input: Input) -> Result<ResponseBundle, Error> {
        let text = self
            .extractor
            .extract(input)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to extract input text"))?;
        tracing::info!(chars = text.char_count(), "Extracted input text");

        let [lesson, quiz, assignment] =
            ContentKind::ALL.map(|kind| GenerationRequest::new(kind, &text));

        let (lesson, quiz, assignment) = futures::try_join!(
            self.generator.generate(&lesson),
            self.generator.generate(&quiz),
            self.generator.generate(&assignment),
        )?;
        tracing::info!("Generated lesson, quiz and assignment");

        Ok(ResponseBundle {
            lesson,
            quiz,
            assignment,
        })
    }
}
