use anyhow::Context;
use clap::Parser;

use lesson_forge::{
    api::{self, DEFAULT_MAX_UPLOAD_BYTES},
    extract::DEFAULT_MAX_CHARS,
    gemini::GeminiClient,
    tracing::init_tracing_subscriber,
    yt::scraper::Scraper,
    ContentProcessorBuilder, PdfParser,
};

#[derive(Parser)]
#[command(
    name = "lesson-forge",
    about = "Turns text, a YouTube video or a PDF into a lesson, quiz and assignment"
)]
struct Cli {
    /// Google AI (Gemini) API key
    #[arg(long, env = "API_KEY")]
    api_key: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Gemini model used for all three prompts
    #[arg(long, env = "GEMINI_MODEL", default_value = GeminiClient::DEFAULT_MODEL)]
    model: String,

    /// Override for the Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    gemini_base_url: Option<String>,

    /// Maximum characters of extracted text embedded in prompts
    #[arg(long, env = "MAX_INPUT_CHARS", default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Maximum request body size, uploads included
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Preferred YouTube caption language
    #[arg(long, env = "TRANSCRIPT_LANG", default_value = "en")]
    transcript_lang: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let mut gemini = GeminiClient::new(cli.api_key).with_model(cli.model);
    if let Some(base_url) = cli.gemini_base_url {
        gemini = gemini.with_base_url(base_url);
    }
    tracing::info!(model = gemini.model(), "Configured Gemini client");

    let processor = ContentProcessorBuilder::new()
        .generator(gemini)
        .transcript_fetcher(Scraper::default().with_language(cli.transcript_lang))
        .document_parser(PdfParser)
        .max_chars(cli.max_chars)
        .build();

    let app = api::router(processor, cli.max_upload_bytes);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server is running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
