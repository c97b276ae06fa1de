use axum::{
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::{Error, Input};

/// Request body as received, before deciding which input wins.
///
/// Accepts `application/json` (`text`, `url`) and `multipart/form-data`
/// (`text`, `url`, and the uploaded file under `document`). Any other body is
/// treated as carrying no fields at all.
#[derive(Debug, Default, Deserialize)]
pub struct RawInput {
    pub text: Option<String>,
    pub url: Option<String>,
    #[serde(skip)]
    pub document: Option<Bytes>,
}

impl RawInput {
    const DOCUMENT_FIELD: &str = "document";

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut raw = RawInput::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "text" => raw.text = Some(field.text().await.map_err(multipart_error)?),
                "url" => raw.url = Some(field.text().await.map_err(multipart_error)?),
                Self::DOCUMENT_FIELD => {
                    tracing::debug!(file_name = ?field.file_name(), "Receiving document upload");
                    raw.document = Some(field.bytes().await.map_err(multipart_error)?);
                }
                other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
            }
        }

        Ok(raw)
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Error {
    rejection(e.status(), e.body_text())
}

/// Body limit hits become 413 whichever body type tripped them
fn rejection(status: StatusCode, body_text: String) -> Error {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge
    } else {
        Error::BadRequest(body_text)
    }
}

impl<S> FromRequest<S> for RawInput
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;

            // An empty JSON body carries no fields, same as `{}`
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(RawInput::default());
            }

            let Json(raw) = Json::<RawInput>::from_bytes(&body)
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            Ok(raw)
        } else {
            Ok(RawInput::default())
        }
    }
}

impl TryFrom<RawInput> for Input {
    type Error = Error;

    /// Picks the first usable field in `text`, `url`, `document` order.
    /// Empty strings count as absent; an uploaded document counts as present
    /// even when empty.
    fn try_from(raw: RawInput) -> Result<Self, Self::Error> {
        let RawInput {
            text,
            url,
            document,
        } = raw;
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        if let Some(text) = present(text) {
            Ok(Input::Text(text))
        } else if let Some(url) = present(url) {
            Ok(Input::Url(url))
        } else if let Some(document) = document {
            Ok(Input::File(document))
        } else {
            Err(Error::NoInput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: Option<&str>, url: Option<&str>, document: Option<&'static [u8]>) -> RawInput {
        RawInput {
            text: text.map(str::to_string),
            url: url.map(str::to_string),
            document: document.map(Bytes::from_static),
        }
    }

    #[test]
    fn test_text_wins_over_url_and_file() {
        let input = Input::try_from(raw(Some("notes"), Some("https://youtu.be/x"), Some(&b"%PDF"[..])));
        assert!(matches!(input, Ok(Input::Text(t)) if t == "notes"));
    }

    #[test]
    fn test_url_wins_over_file() {
        let input = Input::try_from(raw(None, Some("https://youtu.be/x"), Some(&b"%PDF"[..])));
        assert!(matches!(input, Ok(Input::Url(u)) if u == "https://youtu.be/x"));
    }

    #[test]
    fn test_empty_strings_fall_through() {
        let input = Input::try_from(raw(Some(""), Some(""), Some(&b"%PDF"[..])));
        assert!(matches!(input, Ok(Input::File(_))));

        let nothing = Input::try_from(raw(Some(""), None, None));
        assert!(matches!(nothing, Err(Error::NoInput)));
    }

    #[test]
    fn test_empty_upload_still_counts() {
        let input = Input::try_from(raw(None, None, Some(&b""[..])));
        assert!(matches!(input, Ok(Input::File(bytes)) if bytes.is_empty()));
    }

    #[test]
    fn test_body_limit_rejection_is_payload_too_large() {
        assert!(matches!(
            rejection(StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded".into()),
            Error::PayloadTooLarge
        ));
        assert!(matches!(
            rejection(StatusCode::BAD_REQUEST, "bad body".into()),
            Error::BadRequest(msg) if msg == "bad body"
        ));
    }

    #[test]
    fn test_no_fields_is_no_input() {
        assert!(matches!(
            Input::try_from(RawInput::default()),
            Err(Error::NoInput)
        ));
    }
}
