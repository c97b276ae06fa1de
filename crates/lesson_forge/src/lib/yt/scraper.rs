use crate::{
    parser::{extract_video_id, parse_timed_text, select_caption_track, WatchPage},
    yt::{Transcript, TranscriptError, TranscriptFetcher},
};

/// Fetches transcripts by scraping the caption tracks off the public watch page
#[derive(Debug, Clone)]
pub struct Scraper {
    client: reqwest::Client,
    watch_url: String,
    language: String,
}

impl Default for Scraper {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl Scraper {
    const WATCH_URL: &str = "https://www.youtube.com/watch";
    const DEFAULT_LANGUAGE: &str = "en";

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            watch_url: Self::WATCH_URL.into(),
            language: Self::DEFAULT_LANGUAGE.into(),
        }
    }

    pub fn with_watch_url(mut self, url: impl Into<String>) -> Self {
        self.watch_url = url.into();
        self
    }

    /// Preferred caption language, e.g. `en` or `pt-BR`
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &str) -> Result<WatchPage, TranscriptError> {
        let html = self
            .client
            .get(&self.watch_url)
            .query(&[("v", video_id)])
            .header("Accept-Language", format!("{},en-US;q=0.9", self.language))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(html.into())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_timed_text(&self, url: &str) -> Result<String, TranscriptError> {
        let xml = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(xml)
    }
}

impl TranscriptFetcher for Scraper {
    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, video: &str) -> Result<Transcript, TranscriptError> {
        let video_id = extract_video_id(video)?;

        let page = self.fetch_watch_page(&video_id).await.inspect_err(
            |e| tracing::error!(error = %e, %video_id, "Failed to fetch watch page"),
        )?;

        if page.requires_captcha() {
            return Err(TranscriptError::TooManyRequests);
        }

        let player = page
            .player_response()
            .map_err(|_| TranscriptError::VideoUnavailable {
                video_id: video_id.clone(),
                reason: "no player response on the watch page".into(),
            })?;

        let tracks = match player.captions {
            Some(captions) => captions.player_captions_tracklist_renderer.caption_tracks,
            None => {
                if let Some(status) = player.playability_status.filter(|s| !s.is_playable()) {
                    return Err(TranscriptError::VideoUnavailable {
                        video_id,
                        reason: status.reason.unwrap_or(status.status),
                    });
                }
                Vec::new()
            }
        };

        let track = select_caption_track(&tracks, &self.language)
            .ok_or_else(|| TranscriptError::Disabled(video_id.clone()))?;
        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let xml = self.fetch_timed_text(&track.base_url).await?;
        let segments = parse_timed_text(&xml)?;
        tracing::info!(%video_id, segments = segments.len(), "Fetched transcript");

        Ok(Transcript {
            video_id,
            language_code: track.language_code.clone(),
            segments,
        })
    }
}
