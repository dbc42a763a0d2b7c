use actix_cors::Cors;
use actix_web::{
    get,
    http::{header::ContentType, StatusCode},
    middleware::Logger,
    web, App, HttpResponse, HttpServer, Responder,
};
use notes_cache::CacheStore;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    error::PipelineError,
    parser::parse_video_reference,
    render::{render_page, PageBody},
    translate::Translator,
    yt::TranscriptSource,
    NotesProcessor, Summarizer,
};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a valid YouTube link.";

/// Shared by all workers. The mutex lets only one run proceed at a time.
pub struct AppState<T, L, S, C>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    processor: Mutex<NotesProcessor<T, L, S, C>>,
}

impl<T, L, S, C> AppState<T, L, S, C>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    pub fn new(processor: NotesProcessor<T, L, S, C>) -> Self {
        Self {
            processor: Mutex::new(processor),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub url: Option<String>,
}

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

#[get("/api/v1/health")]
pub async fn health_check() -> impl Responder {
    tracing::debug!("Health check endpoint called");
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Input form, with a thumbnail preview when `?url=` holds a valid link
pub async fn index(query: web::Query<PreviewQuery>) -> HttpResponse {
    let url = query.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return html(render_page("", PageBody::Empty));
    }

    match parse_video_reference(url) {
        Ok(video) => {
            let thumbnail_url = video.thumbnail_url();
            html(render_page(url, PageBody::Preview { thumbnail_url: &thumbnail_url }))
        }
        Err(e) => {
            let message = PipelineError::from(e).user_message();
            html(render_page(url, PageBody::Error(&message)))
        }
    }
}

pub async fn notes_page<T, L, S, C>(
    state: web::Data<AppState<T, L, S, C>>,
    form: web::Form<NotesRequest>,
) -> HttpResponse
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let url = form.url.trim();
    if url.is_empty() {
        return html(render_page("", PageBody::Error(EMPTY_INPUT_MESSAGE)));
    }

    let processor = state.processor.lock().await;
    match processor.run(url).await {
        Ok(notes) => html(render_page(url, PageBody::Notes(&notes))),
        Err(e) => {
            tracing::warn!(stage = %e.stage(), error = %e, "Notes run failed");
            html(render_page(url, PageBody::Error(&e.user_message())))
        }
    }
}

pub async fn notes_api<T, L, S, C>(
    state: web::Data<AppState<T, L, S, C>>,
    body: web::Json<NotesRequest>,
) -> HttpResponse
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let processor = state.processor.lock().await;
    match processor.run(&body.url).await {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => {
            tracing::warn!(stage = %e.stage(), error = %e, "Notes run failed");
            let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(serde_json::json!({
                "stage": e.stage(),
                "error": e.user_message(),
            }))
        }
    }
}

/// Registers every route of the notes service on an `App`
pub fn configure<T, L, S, C>(cfg: &mut web::ServiceConfig)
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    cfg.service(health_check)
        .route("/", web::get().to(index))
        .route("/notes", web::post().to(notes_page::<T, L, S, C>))
        .route("/api/v1/notes", web::post().to(notes_api::<T, L, S, C>));
}

pub async fn run_server<T, L, S, C>(
    host: &str,
    port: u16,
    processor: NotesProcessor<T, L, S, C>,
) -> std::io::Result<()>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let state = web::Data::new(AppState::new(processor));

    tracing::info!(%host, port, "Starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(configure::<T, L, S, C>)
    })
    .bind((host, port))?
    .run()
    .await
}
