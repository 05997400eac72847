use std::sync::Arc;
use std::time::Instant;

use actix_web::{get, web, HttpRequest, HttpResponse};
use log::{debug, info, warn};
use rust_embed::RustEmbed;
use serde_json::json;

use crate::auth::CredentialProvider;
use crate::error::AppError;
use crate::github::GithubClient;
use crate::models::{RepoDetails, RepoQuery};
use crate::tree_view;

#[derive(RustEmbed)]
#[folder = "public/"]
struct Asset;

pub struct AppState {
    pub github: GithubClient,
    pub credentials: Arc<dyn CredentialProvider>,
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(connect)
        .service(get_repo_details)
        .service(export_repo_structure)
        .default_service(web::to(static_handler));
}

#[get("/api/connect")]
async fn connect() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "message": "Connection successful" }))
}

#[get("/api/github")]
async fn get_repo_details(
    req: HttpRequest,
    query: web::Query<RepoQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let details = explore(&state, &req, &query).await?;
    Ok(HttpResponse::Ok().json(details))
}

#[get("/api/github/export")]
async fn export_repo_structure(
    req: HttpRequest,
    query: web::Query<RepoQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let details = explore(&state, &req, &query).await?;
    let outline = tree_view::serialize_structure(&details.file_structure);
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(outline))
}

/// Shared fetch pipeline: validates the query, issues the metadata and root
/// contents calls concurrently, then expands the tree to completion. Any
/// upstream failure aborts the whole exploration.
async fn explore(
    state: &AppState,
    req: &HttpRequest,
    query: &RepoQuery,
) -> Result<RepoDetails, AppError> {
    let owner = required(&query.owner)?;
    let repo = required(&query.repo)?;
    info!("Received exploration request for {}/{}", owner, repo);
    let start_time = Instant::now();

    let token = state.credentials.credential(req);
    let token = token.as_deref();

    let (metadata, root_entries) = tokio::try_join!(
        state.github.repo_metadata(owner, repo, token),
        state.github.contents(owner, repo, "", token),
    )
    .map_err(|e| {
        warn!("Upstream fetch failed for {}/{}: {}", owner, repo, e);
        AppError::Upstream(e)
    })?;

    let file_structure = state
        .github
        .build_file_structure(owner, repo, root_entries, token)
        .await
        .map_err(|e| {
            warn!("Tree expansion failed for {}/{}: {}", owner, repo, e);
            AppError::Upstream(e)
        })?;

    info!(
        "Successfully explored {}/{} in {:.2?}",
        owner,
        repo,
        start_time.elapsed()
    );
    Ok(RepoDetails::new(metadata, file_structure))
}

fn required(value: &Option<String>) -> Result<&str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingParameter),
    }
}

async fn static_handler(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };
    debug!("Serving static asset: {}", path);

    match Asset::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(content.data.into_owned())
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}
