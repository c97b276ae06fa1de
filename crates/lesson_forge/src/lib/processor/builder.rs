use crate::{
    extract::{pdf::DocumentParser, Extractor, DEFAULT_MAX_CHARS},
    yt::TranscriptFetcher,
    ContentGenerator, ContentProcessor,
};

pub struct ContentProcessorBuilder<G = (), T = (), D = ()> {
    generator: G,
    transcript_fetcher: T,
    document_parser: D,
    max_chars: usize,
}

impl Default for ContentProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentProcessorBuilder {
    pub fn new() -> Self {
        Self {
            generator: (),
            transcript_fetcher: (),
            document_parser: (),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl<G, T, D> ContentProcessorBuilder<G, T, D> {
    pub fn generator<G2: ContentGenerator + 'static>(
        self,
        generator: G2,
    ) -> ContentProcessorBuilder<G2, T, D> {
        ContentProcessorBuilder {
            generator,
            transcript_fetcher: self.transcript_fetcher,
            document_parser: self.document_parser,
            max_chars: self.max_chars,
        }
    }

    pub fn transcript_fetcher<T2: TranscriptFetcher + Send + Sync + 'static>(
        self,
        transcript_fetcher: T2,
    ) -> ContentProcessorBuilder<G, T2, D> {
        ContentProcessorBuilder {
            generator: self.generator,
            transcript_fetcher,
            document_parser: self.document_parser,
            max_chars: self.max_chars,
        }
    }

    pub fn document_parser<D2: DocumentParser + Send + Sync + 'static>(
        self,
        document_parser: D2,
    ) -> ContentProcessorBuilder<G, T, D2> {
        ContentProcessorBuilder {
            generator: self.generator,
            transcript_fetcher: self.transcript_fetcher,
            document_parser,
            max_chars: self.max_chars,
        }
    }

    /// Cap applied to the extracted text of every input kind
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl<G, T, D> ContentProcessorBuilder<G, T, D>
where
    G: ContentGenerator + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    D: DocumentParser + Send + Sync + 'static,
{
    pub fn build(self) -> ContentProcessor<G, T, D> {
        let extractor = Extractor::new(self.transcript_fetcher, self.document_parser, self.max_chars);
        ContentProcessor::new(self.generator, extractor)
    }
}
