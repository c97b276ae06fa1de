//! # Yt Parser
//!
//! Pure parsing helpers for the YouTube transcript flow: resolving a video id
//! from whatever the user pasted, pulling `ytInitialPlayerResponse` out of a
//! watch page and turning timed-text XML into ordered transcript segments.

use std::{ops::Deref, sync::LazyLock};

use regex::{Captures, Regex};

use crate::{
    types::{CaptionTrack, PlayerResponse},
    yt::{TranscriptError, TranscriptSegment},
};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .unwrap()
});

static BARE_VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

static PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)ytInitialPlayerResponse\s*=\s*(\{.+?\})\s*;\s*(?:var\s+(?:meta|head)\b|</script>)",
    )
    .unwrap()
});

// srv1: <text start="1.2" dur="3.4">caption</text>
static SRV1_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text start="([^"]*)"(?: dur="([^"]*)")?[^>]*>(.*?)</text>"#).unwrap()
});

// format 3: <p t="1200" d="3400"><s>caption</s></p>, times in ms
static FORMAT3_P_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<p t="(\d+)"(?: d="(\d+)")?[^>]*>(.*?)</p>"#).unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap()
});

/// Resolves the 11-character video id from a bare id or any of the common
/// YouTube URL shapes (`watch?v=`, `youtu.be/`, `/embed/`, `/shorts/`, ...).
///
/// # Parameters
/// * `input`: A bare video id or a YouTube URL, as sent by the client.
///
/// # Returns
/// * `Ok(String)` containing the video id.
/// * `Err(TranscriptError::InvalidVideoId)` if no id can be found in `input`.
pub fn extract_video_id(input: &str) -> Result<String, TranscriptError> {
    let input = input.trim();

    if BARE_VIDEO_ID_RE.is_match(input) {
        return Ok(input.to_string());
    }

    VIDEO_ID_RE
        .captures(input)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TranscriptError::InvalidVideoId(input.to_string()))
}

/// Picks the caption track to download for `lang`.
///
/// Exact language matches win over regional variants (`en-GB` for `en`),
/// manual tracks win over auto-generated ones, and the first track is used
/// when nothing matches.
pub fn select_caption_track<'a>(
    tracks: &'a [CaptionTrack],
    lang: &str,
) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .filter(|t| t.language_code == lang || t.language_code.split('-').next() == Some(lang))
        .min_by_key(|t| (t.language_code != lang, t.is_generated()))
        .or_else(|| tracks.first())
}

/// Parses a timed-text document into segments in document order.
///
/// Both the legacy `<transcript><text ..>` layout and the `format="3"`
/// `<timedtext><body><p ..>` layout are understood.
///
/// # Parameters
/// * `xml`: The timed-text document downloaded from a caption track's `baseUrl`.
///
/// # Returns
/// * `Ok(Vec<TranscriptSegment>)` with offsets and durations in seconds.
/// * `Err(TranscriptError::Parse)` if the document is in neither layout or a
///   timestamp cannot be read.
#[tracing::instrument(skip(xml), fields(len = xml.len()))]
pub fn parse_timed_text(xml: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    if xml.contains("<transcript") {
        SRV1_TEXT_RE
            .captures_iter(xml)
            .map(|cap| {
                Ok(TranscriptSegment {
                    text: clean_caption(&cap[3]),
                    offset: parse_seconds(&cap[1])?,
                    duration: cap.get(2).map_or(Ok(0.0), |d| parse_seconds(d.as_str()))?,
                })
            })
            .collect()
    } else if xml.contains("<timedtext") {
        let segments = FORMAT3_P_RE
            .captures_iter(xml)
            .filter_map(|cap| {
                let text = clean_caption(&cap[3]);
                if text.trim().is_empty() {
                    return None;
                }
                let offset = parse_millis(&cap[1]);
                let duration = cap.get(2).map_or(0.0, |d| parse_millis(d.as_str()));
                Some(TranscriptSegment {
                    text,
                    offset,
                    duration,
                })
            })
            .collect();
        Ok(segments)
    } else {
        Err(TranscriptError::Parse(
            "Timed text response is not a transcript document",
        ))
    }
}

fn parse_seconds(value: &str) -> Result<f64, TranscriptError> {
    value
        .parse::<f64>()
        .map_err(|_| TranscriptError::Parse("Invalid timestamp in timed text"))
}

fn parse_millis(value: &str) -> f64 {
    // digits only, guaranteed by the regex
    value.parse::<u64>().unwrap_or_default() as f64 / 1000.0
}

fn clean_caption(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, "");
    // YouTube escapes captions twice (`&amp;#39;`)
    decode_entities(&decode_entities(&stripped))
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let decoded = match &caps[1] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                numeric => {
                    let code = match numeric
                        .strip_prefix("#x")
                        .or_else(|| numeric.strip_prefix("#X"))
                    {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => numeric[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

pub struct WatchPage(String);

impl Deref for WatchPage {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl WatchPage {
    pub fn new(doc: String) -> Self {
        WatchPage(doc)
    }

    /// YouTube serves a captcha interstitial instead of the page when rate limited
    pub fn requires_captcha(&self) -> bool {
        self.contains(r#"class="g-recaptcha""#)
    }

    pub fn player_response(&self) -> Result<PlayerResponse, TranscriptError> {
        PLAYER_RESPONSE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(TranscriptError::Parse(
                "Failed to extract ytInitialPlayerResponse from the watch page",
            ))
    }
}

impl From<String> for WatchPage {
    fn from(value: String) -> Self {
        WatchPage(value)
    }
}
