use std::sync::{Arc, Mutex};

use lesson_forge::yt::{Transcript, TranscriptError, TranscriptFetcher, TranscriptSegment};

#[derive(Clone, Default)]
pub struct MockTranscriptFetcher {
    pub segments: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub disabled: bool,
}

impl MockTranscriptFetcher {
    pub fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Default::default()
        }
    }
}

impl TranscriptFetcher for MockTranscriptFetcher {
    async fn fetch_transcript(&self, video: &str) -> Result<Transcript, TranscriptError> {
        self.calls.lock().unwrap().push(video.to_string());
        if self.disabled {
            return Err(TranscriptError::Disabled(video.to_string()));
        }

        let segments = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptSegment {
                text: text.clone(),
                offset: i as f64 * 2.0,
                duration: 2.0,
            })
            .collect();

        Ok(Transcript {
            video_id: video.to_string(),
            language_code: "en".into(),
            segments,
        })
    }
}
