use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tube_notes::{
    gemini::GeminiClient,
    tracing::init_tracing_subscriber,
    translate::google::GoogleTranslateClient,
    web::run_server,
    yt::transcript::YtTranscriptClient,
    CacheStore, NotesProcessor, NotesProcessorBuilder, Summarizer, TranscriptSource,
    Translator,
};

#[derive(Parser)]
#[command(
    name = "tube-notes",
    about = "Detailed notes from the transcript of a YouTube video"
)]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: String,

    /// Google Cloud Translation API key
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    translate_api_key: String,

    /// Gemini model used for the summary
    #[arg(long, env = "GEMINI_MODEL", default_value = GeminiClient::DEFAULT_MODEL)]
    model: String,

    /// Transcript languages to try first, in order
    #[arg(
        long,
        env = "TRANSCRIPT_LANGUAGES",
        value_delimiter = ',',
        default_value = "en"
    )]
    languages: Vec<String>,

    /// Fail instead of using a transcript in another language
    #[arg(long)]
    no_language_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web interface
    Serve {
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,
    },
    /// Generate notes for a single video and print them
    Notes {
        /// Video link, e.g. https://www.youtube.com/watch?v=dQw4w9WgXcQ
        url: String,

        /// Print the whole result as JSON
        #[arg(long)]
        json: bool,
    },
}

async fn print_notes<T, L, S, C>(
    processor: &NotesProcessor<T, L, S, C>,
    url: &str,
    json: bool,
) -> anyhow::Result<()>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = processor
        .run_with(url, |state| {
            if !state.is_terminal() {
                spinner.set_message(state.to_string());
            }
        })
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(notes) if json => println!("{}", serde_json::to_string_pretty(&notes)?),
        Ok(notes) => println!("## Detailed Notes:\n\n{}", notes.summary),
        Err(e) => {
            tracing::error!(stage = %e.stage(), error = %e, "Notes run failed");
            anyhow::bail!("{}", e.user_message());
        }
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let transcript_source = YtTranscriptClient::new(reqwest::Client::new())
        .with_languages(cli.languages)
        .with_fallback(!cli.no_language_fallback);
    let translator = GoogleTranslateClient::new(cli.translate_api_key);
    let summarizer = GeminiClient::new(cli.google_api_key).with_model(cli.model);

    let processor = NotesProcessorBuilder::new()
        .transcript_source(transcript_source)
        .translator(translator)
        .summarizer(summarizer)
        .build();

    match cli.command {
        Command::Serve { host, port } => {
            run_server(&host, port, processor)
                .await
                .with_context(|| format!("Failed to serve on {host}:{port}"))?;
        }
        Command::Notes { url, json } => print_notes(&processor, &url, json).await?,
    }

    Ok(())
}
