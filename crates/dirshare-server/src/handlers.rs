//! Request handlers.
//!
//! Every filesystem call goes through `dirshare-core` on the blocking pool.

use crate::error::ApiError;
use crate::render;
use crate::render::encode_path;
use crate::render::percent_encode;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::extract::multipart::MultipartError;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use dirshare_core::ArchiveBuilder;
use dirshare_core::BrowseConfig;
use dirshare_core::BrowseError;
use dirshare_core::Disposition;
use dirshare_core::ResolvedEntry;
use dirshare_core::UploadRejection;
use dirshare_core::disposition_for;
use dirshare_core::list_directory;
use dirshare_core::write_uploaded_file;
use tokio_util::io::ReaderStream;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Runs a core operation on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> dirshare_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

async fn resolve(state: &AppState, path: String) -> Result<ResolvedEntry, ApiError> {
    let root = state.root.clone();
    let config = state.config.clone();
    blocking(move || root.resolve_with(&path, &config)).await
}

/// `GET /`: status page.
pub async fn status(State(state): State<AppState>) -> Html<String> {
    Html(render::status_page(state.started.uptime()))
}

/// `GET /files/`: listing of the root.
pub async fn browse_root(State(state): State<AppState>) -> Result<Response, ApiError> {
    browse_path(state, String::new()).await
}

/// `GET /files/{*path}`: listing for directories, download for files.
pub async fn browse(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    browse_path(state, path).await
}

async fn browse_path(state: AppState, path: String) -> Result<Response, ApiError> {
    let entry = resolve(&state, path).await?;

    if entry.is_file() {
        return send_file(entry).await;
    }

    let config = state.config.clone();
    let relative = entry.relative().to_string();
    let listing = blocking(move || list_directory(&entry, &config)).await?;
    Ok(Html(render::listing_page(&relative, &listing)).into_response())
}

async fn send_file(entry: ResolvedEntry) -> Result<Response, ApiError> {
    let file = tokio::fs::File::open(entry.path())
        .await
        .map_err(access_failure)?;
    let len = file.metadata().await.map_err(access_failure)?.len();

    let name = entry.file_name();
    let mime = mime_guess::from_path(entry.path()).first_or_octet_stream();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref()).map_err(|_| ApiError::Internal)?,
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(disposition_for(&name), &name)?,
    );

    info!(path = entry.relative(), size = len, "sending file");
    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

/// `GET /download_folder/`: archive of the root.
pub async fn download_root(State(state): State<AppState>) -> Result<Response, ApiError> {
    download_path(state, String::new()).await
}

/// `GET /download_folder/{*path}`: archive of a directory.
pub async fn download_folder(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    download_path(state, path).await
}

async fn download_path(state: AppState, path: String) -> Result<Response, ApiError> {
    let entry = resolve(&state, path).await?;
    let config = BrowseConfig::clone(&state.config);
    let relative = entry.relative().to_string();

    let artifact = blocking(move || ArchiveBuilder::new(config).build(&entry)).await?;

    let report = artifact.report();
    info!(
        path = %relative,
        files = report.files_added,
        skipped = report.entries_skipped,
        size = artifact.len(),
        "sending folder archive"
    );

    let name = artifact.file_name().to_string();
    let len = artifact.len();
    let file = tokio::fs::File::from_std(artifact.into_file());

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/zip"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(Disposition::Attachment, &name)?,
    );

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

/// `POST /files/`: upload into the root.
pub async fn upload_root(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    upload_path(state, String::new(), multipart).await
}

/// `POST /files/{*path}`: upload into a directory.
pub async fn upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    upload_path(state, path, multipart).await
}

async fn upload_path(
    state: AppState,
    path: String,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let dir = resolve(&state, path).await?.require_directory()?.clone();
    let back = Redirect::to(&listing_url(dir.relative()));

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_failure)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let suggested = field.file_name().unwrap_or_default().to_string();
        if suggested.is_empty() {
            debug!(dir = dir.relative(), reason = %UploadRejection::EmptyFilename, "upload ignored");
            return Ok(back.into_response());
        }

        let content = field
            .bytes()
            .await
            .map_err(multipart_failure)?;
        let size = content.len();

        let result = blocking({
            let dir = dir.clone();
            let suggested = suggested.clone();
            move || write_uploaded_file(&dir, &suggested, &content[..])
        })
        .await;

        return match result {
            Ok(written) => {
                info!(dir = dir.relative(), file = %written.display(), size, "upload stored");
                Ok(back.into_response())
            }
            Err(ApiError::BadRequest(reason)) => {
                warn!(dir = dir.relative(), suggested = %suggested, %reason, "upload ignored");
                Ok(back.into_response())
            }
            Err(err) => Err(err),
        };
    }

    debug!(dir = dir.relative(), reason = %UploadRejection::MissingFile, "upload ignored");
    Ok(back.into_response())
}

fn access_failure(source: std::io::Error) -> ApiError {
    ApiError::from(BrowseError::AccessFailure { source })
}

fn multipart_failure(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Listing URL for a relative directory path.
fn listing_url(relative: &str) -> String {
    format!("/files/{}", encode_path(relative))
}

/// Builds a `Content-Disposition` value with an ASCII `filename` fallback
/// and an RFC 5987 `filename*` carrying the exact UTF-8 name.
fn content_disposition(disposition: Disposition, name: &str) -> Result<HeaderValue, ApiError> {
    let fallback: String = name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = percent_encode(name, is_attr_char);

    HeaderValue::from_str(&format!(
        "{disposition}; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .map_err(|_| ApiError::Internal)
}

/// RFC 5987 `attr-char`.
const fn is_attr_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
}
