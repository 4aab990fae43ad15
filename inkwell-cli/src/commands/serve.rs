//! HTTP server command implementation.

use crate::bundle::{ASSETS_DIR, CONTENT_DIR, STATIC_DIR};
use anyhow::{Context, Result};
use askama::Template;
use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use include_dir::Dir;
use inkwell_core::assets::unhash_path;
use inkwell_core::{
    list_entries, load_page, AssetManifest, Collection, Config, ContentStore, EmbeddedStore,
    FsStore, MarkdownProcessor,
};
use inkwell_render::{
    render_page, Chrome, ContentTemplate, Frame, HomeTemplate, ListTemplate, NotFoundTemplate,
};
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// Everything a request needs, built once before serving
struct Site {
    config: Config,
    store: Box<dyn ContentStore>,
    processor: MarkdownProcessor,
    assets: AssetManifest,
    static_dir: &'static Dir<'static>,
    assets_dir: &'static Dir<'static>,
}

impl Site {
    fn from_config(config: Config) -> Self {
        let store: Box<dyn ContentStore> = match config.content_root() {
            Some(root) => {
                tracing::info!("Serving content from {:?}", root);
                Box::new(FsStore::new(root))
            }
            None => {
                tracing::info!("Serving embedded content");
                Box::new(EmbeddedStore::new(&CONTENT_DIR))
            }
        };
        Self::new(config, store)
    }

    fn new(config: Config, store: Box<dyn ContentStore>) -> Self {
        Self {
            config,
            store,
            processor: MarkdownProcessor::new(),
            assets: AssetManifest::from_dir(&STATIC_DIR, "/static"),
            static_dir: &STATIC_DIR,
            assets_dir: &ASSETS_DIR,
        }
    }

    fn chrome<'a>(&'a self, title: &'a str, description: &'a str) -> Chrome<'a> {
        Chrome {
            site_title: &self.config.site.title,
            title,
            description,
            assets: &self.assets,
        }
    }
}

type AppState = Arc<Site>;

/// Start the HTTP server
pub async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    let mut config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let site = Site::from_config(config);
    let addr = site.config.bind_addr();
    let app = router(Arc::new(site));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/blog", get(blog_list))
        .route("/wiki", get(wiki_list))
        .route("/blog/{slug}", get(blog_entry))
        .route("/wiki/{slug}", get(wiki_entry))
        .route("/static/{*path}", get(static_file))
        .route("/assets/{*path}", get(asset_file))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}

/// htmx navigations only want the inner fragment
fn frame_for(headers: &HeaderMap) -> Frame {
    match headers.get("hx-request").and_then(|v| v.to_str().ok()) {
        Some("true") => Frame::Fragment,
        _ => Frame::Full,
    }
}

fn render<T: Template>(
    status: StatusCode,
    fragment: &T,
    frame: Frame,
    chrome: &Chrome<'_>,
) -> Response {
    match render_page(fragment, frame, chrome) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render template").into_response()
        }
    }
}

async fn index(State(site): State<AppState>, headers: HeaderMap) -> Response {
    let home = HomeTemplate {
        site_title: &site.config.site.title,
        site_description: &site.config.site.description,
    };
    let chrome = site.chrome("Home", &site.config.site.description);
    render(StatusCode::OK, &home, frame_for(&headers), &chrome)
}

async fn blog_list(State(site): State<AppState>, headers: HeaderMap) -> Response {
    list(&site, Collection::Blog, &headers)
}

async fn wiki_list(State(site): State<AppState>, headers: HeaderMap) -> Response {
    list(&site, Collection::Wiki, &headers)
}

fn list(site: &Site, collection: Collection, headers: &HeaderMap) -> Response {
    let entries = match list_entries(site.store.as_ref(), collection) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to list {}: {}", collection.dir_name(), e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list files").into_response();
        }
    };

    let listing = ListTemplate {
        heading: collection.label(),
        route: collection.route(),
        entries: &entries,
    };
    let chrome = site.chrome(collection.label(), "");
    render(StatusCode::OK, &listing, frame_for(headers), &chrome)
}

async fn blog_entry(
    State(site): State<AppState>,
    AxumPath(slug): AxumPath<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    entry(&site, Collection::Blog, &slug, &headers, &uri)
}

async fn wiki_entry(
    State(site): State<AppState>,
    AxumPath(slug): AxumPath<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    entry(&site, Collection::Wiki, &slug, &headers, &uri)
}

fn entry(
    site: &Site,
    collection: Collection,
    slug: &str,
    headers: &HeaderMap,
    uri: &Uri,
) -> Response {
    let frame = frame_for(headers);

    // Anything with an extension is a file living next to the markdown
    if Path::new(slug).extension().is_some() {
        return raw_file(site, collection, slug, headers, uri);
    }

    match load_page(site.store.as_ref(), &site.processor, collection, slug) {
        Ok(page) => {
            let content = ContentTemplate {
                title: &page.title,
                description: &page.description,
                toc: &page.toc,
                content: &page.html,
            };
            let chrome = site.chrome(&page.title, &page.description);
            render(StatusCode::OK, &content, frame, &chrome)
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!("{}", e);
            not_found_page(site, uri.path(), frame)
        }
        Err(e) => {
            tracing::error!("Failed to load {}/{}: {}", collection.dir_name(), slug, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

fn raw_file(
    site: &Site,
    collection: Collection,
    name: &str,
    headers: &HeaderMap,
    uri: &Uri,
) -> Response {
    let contents = match site.store.read(collection, name) {
        Ok(contents) => contents.into_owned(),
        Err(e) => {
            tracing::debug!("{}", e);
            return not_found_page(site, uri.path(), frame_for(headers));
        }
    };

    // The epoch stands in for "unknown" and never validates a cached copy
    let modified = match site.store.modified(collection, name) {
        Ok(Some(time)) if time != SystemTime::UNIX_EPOCH => Some(time),
        _ => None,
    };

    let mut response =
        Response::builder().header(header::CONTENT_TYPE, content_type_for_path(name));
    if let Some(modified) = modified {
        response = response.header(header::LAST_MODIFIED, http_date(modified));
        if not_modified_since(headers, modified) {
            return body_or_500(response.status(StatusCode::NOT_MODIFIED), Body::empty());
        }
    }
    body_or_500(response.status(StatusCode::OK), contents)
}

/// Whether `If-Modified-Since` is at or after `modified`, to the second
fn not_modified_since(headers: &HeaderMap, modified: SystemTime) -> bool {
    let Some(since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
    else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

async fn static_file(
    State(site): State<AppState>,
    AxumPath(path): AxumPath<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    // Fingerprinted URLs map back onto the bundled file name
    let file = unhash_path(&path)
        .and_then(|plain| site.static_dir.get_file(plain))
        .or_else(|| site.static_dir.get_file(&path));

    match file {
        Some(file) => embedded_file(&path, file.contents()),
        None => not_found_page(&site, uri.path(), frame_for(&headers)),
    }
}

async fn asset_file(
    State(site): State<AppState>,
    AxumPath(path): AxumPath<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    match site.assets_dir.get_file(&path) {
        Some(file) => embedded_file(&path, file.contents()),
        None => not_found_page(&site, uri.path(), frame_for(&headers)),
    }
}

fn embedded_file(path: &str, contents: &'static [u8]) -> Response {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for_path(path));
    body_or_500(response, contents)
}

fn body_or_500(builder: axum::http::response::Builder, body: impl Into<Body>) -> Response {
    builder.body(body.into()).unwrap_or_else(|e| {
        tracing::error!("Failed to build response: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

async fn not_found(State(site): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    not_found_page(&site, uri.path(), frame_for(&headers))
}

fn not_found_page(site: &Site, path: &str, frame: Frame) -> Response {
    let page = NotFoundTemplate { path };
    let chrome = site.chrome("Not Found", "");
    render(StatusCode::NOT_FOUND, &page, frame, &chrome)
}

/// RFC 7231 IMF-fixdate, as used by `Last-Modified`
fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

fn content_type_for_path(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "html" => "text/html; charset=utf-8",
        "md" | "txt" => "text/plain; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
