use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use log::info;
use serde_json::json;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::UploadError;
use crate::loader::{self, UploadFormat};
use crate::normalizer::{Normalized, normalize};
use crate::saving::{persist_upload, sanitize_filename};
use crate::store::RecordStore;
use crate::summary::Summary;

/// Multipart field carrying the spreadsheet
pub const FILE_FIELD: &str = "file";

pub struct AppState {
    pub store: RecordStore,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            store: RecordStore::new(),
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Save, parse and publish one uploaded file
    ///
    /// The store is only replaced once every step has succeeded, so a
    /// rejected upload leaves the previous records in place.
    ///
    /// # Returns
    /// * `Result<u64, UploadError>` - The store version holding the new records
    pub fn ingest_upload(&self, filename: &str, bytes: &[u8]) -> Result<u64, UploadError> {
        if filename.is_empty() {
            return Err(UploadError::EmptyFilename);
        }

        let safe_name = sanitize_filename(filename);
        let format =
            UploadFormat::from_filename(&safe_name).ok_or(UploadError::UnsupportedFormat)?;

        let path = persist_upload(&self.upload_dir, &safe_name, bytes)?;
        let table = loader::load_table(&path, format)?;
        let Normalized { records, dropped } = normalize(&table)?;

        let kept = records.len();
        let version = self.store.replace(records);
        info!(
            "loaded {} ({:?}): {} records kept, {} rows dropped, version {}",
            safe_name, format, kept, dropped, version
        );

        Ok(version)
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(serve_upload_form))
        .route("/upload", post(upload_file))
        .route("/dashboard", get(serve_dashboard))
        .route("/data", get(get_data))
        .route("/summary", get(get_summary))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    create_dir_all(&config.upload_dir)?;

    let app_state = Arc::new(AppState::new(&config));
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    info!("Saving uploads under {}", config.upload_dir.display());
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_upload_form() -> Html<&'static str> {
    Html(include_str!("./static/upload.html"))
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

async fn get_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.snapshot())
}

async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(Summary::of(&state.store.snapshot()))
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "module": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "records": state.store.snapshot().len(),
    }))
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, Response> {
    let (filename, bytes) = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Err(UploadError::NoFile.into_response()),
        Err(rejection) => return Err(rejection.into_response()),
    };

    // Saving and parsing are blocking file work
    let ingested = tokio::task::spawn_blocking(move || state.ingest_upload(&filename, &bytes))
        .await
        .map_err(|e| {
            log::error!("upload task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Upload processing failed").into_response()
        })?;
    ingested.map_err(IntoResponse::into_response)?;

    Ok(Redirect::to("/dashboard"))
}

// First part named `file`; other parts are skipped
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Bytes)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Some((filename, bytes)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::CanonicalField;
    use crate::normalizer::NormalizeError;
    use crate::record::Record;
    use tempfile::tempdir;

    fn state_in(dir: &std::path::Path) -> AppState {
        AppState::new(&Config::with_upload_dir(dir.join("uploads")))
    }

    #[test]
    fn ingest_replaces_records_and_keeps_file() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let csv = "name,pre_summative,post_summative\nA,40,55\nB,abc,60\n";
        let version = state.ingest_upload("Term 1.csv", csv.as_bytes()).unwrap();

        assert_eq!(version, 1);
        assert_eq!(*state.store.snapshot(), vec![Record::new("A", 40.0, 55.0)]);
        assert!(dir.path().join("uploads").join("Term_1.csv").is_file());
    }

    #[test]
    fn rejected_upload_keeps_previous_records() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        state
            .ingest_upload("a.csv", b"Name,Pre_Summative,Post_Summative\nA,70,80\n")
            .unwrap();

        let err = state
            .ingest_upload("b.csv", b"Name,Pre_Summative\nB,10\n")
            .unwrap_err();
        assert!(matches!(
            err,
            UploadError::Normalize(NormalizeError::MissingColumns(ref missing))
                if missing == &vec![CanonicalField::PostSummative]
        ));

        let err = state.ingest_upload("notes.txt", b"hello").unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFormat));
        assert!(!dir.path().join("uploads").join("notes.txt").exists());

        assert!(matches!(
            state.ingest_upload("", b"x").unwrap_err(),
            UploadError::EmptyFilename
        ));

        assert_eq!(state.store.version(), 1);
        assert_eq!(*state.store.snapshot(), vec![Record::new("A", 70.0, 80.0)]);
    }
}
