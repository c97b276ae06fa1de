pub mod scraper;

use std::future::Future;

pub trait TranscriptFetcher {
    /// Fetches the transcript of a video given either its URL or bare id
    fn fetch_transcript(
        &self,
        video: &str,
    ) -> impl Future<Output = Result<Transcript, TranscriptError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Impossible to retrieve Youtube video ID from `{0}`")]
    InvalidVideoId(String),
    #[error("YouTube is receiving too many requests from this IP and now requires solving a captcha to continue")]
    TooManyRequests,
    #[error("The video is no longer available ({video_id}): {reason}")]
    VideoUnavailable { video_id: String, reason: String },
    #[error("Transcript is disabled on this video ({0})")]
    Disabled(String),
    #[error("Failed to fetch transcript: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to parse YouTube response: {0}")]
    Parse(&'static str),
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub language_code: String,
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    /// Seconds from the start of the video
    pub offset: f64,
    pub duration: f64,
}

impl Transcript {
    /// Segment texts in playback order, separated by single spaces
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
