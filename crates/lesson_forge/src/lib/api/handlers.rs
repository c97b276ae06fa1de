use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    api::RawInput, extract::pdf::DocumentParser, yt::TranscriptFetcher, ContentGenerator,
    ContentProcessor, Error, Input, ResponseBundle,
};

pub async fn generate_all_content<G, T, D>(
    State(processor): State<Arc<ContentProcessor<G, T, D>>>,
    raw: RawInput,
) -> Result<Json<ResponseBundle>, Error>
where
    G: ContentGenerator + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    D: DocumentParser + Send + Sync + 'static,
{
    let input = Input::try_from(raw)?;
    let bundle = processor.generate_all(input).await?;
    Ok(Json(bundle))
}

pub async fn healthz() -> &'static str {
    "ok"
}
