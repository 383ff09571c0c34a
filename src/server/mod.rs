//! Icon server
//!
//! Serves profile `.ico` files to the GUI over local HTTP.
//! `GET /<anything>.ico?browser=<id>&directory=<dir>` returns the icon bytes.

use crate::config::ServerConfig;
use crate::core::icon::{self, IconError};
use crate::core::profile::ProfileKey;
use crate::core::registry::ProfileRegistry;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{RawQuery, State},
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use url::{Url, form_urlencoded};

const FAVICON_PATH: &str = "/favicon.ico";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IconQuery {
    pub browser: String,
    pub directory: String,
}

impl IconQuery {
    /// Parse a raw query string; the first `browser` and `directory` win,
    /// missing keys stay empty
    pub fn parse(raw: &str) -> Self {
        let mut browser = None;
        let mut directory = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "browser" if browser.is_none() => browser = Some(value.into_owned()),
                "directory" if directory.is_none() => directory = Some(value.into_owned()),
                _ => {}
            }
        }
        Self {
            browser: browser.unwrap_or_default(),
            directory: directory.unwrap_or_default(),
        }
    }
}

/// Whether a request path names an icon this server answers for
fn is_icon_path(raw_path: &str) -> bool {
    let path = percent_decode_str(raw_path).decode_utf8_lossy();
    path.ends_with(".ico") && path != FAVICON_PATH
}

/// Build the icon router over a shared profile registry
pub fn router(registry: ProfileRegistry) -> Router {
    Router::new().fallback(serve_icon).with_state(registry)
}

async fn serve_icon(
    State(registry): State<ProfileRegistry>,
    method: Method,
    uri: Uri,
    RawQuery(raw_query): RawQuery,
) -> Response {
    if method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    if !is_icon_path(uri.path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    tracing::debug!("Req: {}", uri);

    let query = IconQuery::parse(raw_query.as_deref().unwrap_or_default());
    let path = registry.with_profiles(|profiles| {
        icon::find_icon_path(profiles, &query.browser, &query.directory).map(|p| p.to_path_buf())
    });
    let result = match path {
        Ok(path) => tokio::fs::read(&path)
            .await
            .map_err(|source| IconError::Read { path, source }),
        Err(e) => Err(e),
    };

    match result {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/x-icon")], bytes).into_response(),
        Err(e) => {
            tracing::debug!("Icon request {} failed: {}", uri, e);
            let status = status_for(&e);
            if status == StatusCode::BAD_REQUEST {
                (status, format!("Could not load file {}", uri)).into_response()
            } else {
                status.into_response()
            }
        }
    }
}

/// HTTP status for a failed icon lookup
pub fn status_for(err: &IconError) -> StatusCode {
    match err {
        IconError::UnknownProfile { .. } | IconError::NoIcon(_) => StatusCode::NOT_FOUND,
        IconError::Read { .. } => StatusCode::BAD_REQUEST,
    }
}

/// Bind the listener described by the server config
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = format!("{}:{}", config.bind, config.port);
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind icon server on {}", addr))
}

/// Serve icons until the process exits
pub async fn serve(listener: TcpListener, registry: ProfileRegistry) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Icon server listening on http://{}", addr);
    axum::serve(listener, router(registry)).await?;
    Ok(())
}

/// Bind and run the icon server in the background, returning its address
pub async fn spawn(config: &ServerConfig, registry: ProfileRegistry) -> Result<SocketAddr> {
    let listener = bind(config).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = serve(listener, registry).await {
            tracing::error!("Icon server stopped: {:#}", e);
        }
    });

    Ok(addr)
}

/// Root URL of a server listening on `addr`
pub fn base_url(addr: SocketAddr) -> Result<Url> {
    Ok(Url::parse(&format!("http://{}/", addr))?)
}

/// URL of the icon for `key` on the server at `base`
pub fn icon_url(base: &Url, key: &ProfileKey) -> Result<Url> {
    let mut url = base.join("profile.ico")?;
    url.query_pairs_mut()
        .append_pair("browser", key.browser.id())
        .append_pair("directory", &key.directory);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{Browser, Profile};
    use axum::body::Body;
    use axum::http::Request;
    use std::path::{Path, PathBuf};
    use tower::ServiceExt;

    fn registry(ico_dir: &Path) -> ProfileRegistry {
        let ico = ico_dir.join("Google Profile.ico");
        std::fs::write(&ico, b"\x00\x00\x01\x00icon").unwrap();

        ProfileRegistry::new(vec![
            Profile {
                browser: Browser::Chrome,
                directory: "Profile 1".to_string(),
                name: "Work".to_string(),
                ico_path: Some(ico),
                user_data_dir: ico_dir.to_path_buf(),
            },
            Profile {
                browser: Browser::Edge,
                directory: "Default".to_string(),
                name: "Edge".to_string(),
                ico_path: Some(PathBuf::from("/nonexistent/Edge Profile.ico")),
                user_data_dir: ico_dir.to_path_buf(),
            },
        ])
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_known_profile_returns_icon_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let (status, body) = get(app, "/icon.ico?browser=chrome&directory=Profile%201").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"\x00\x00\x01\x00icon");
    }

    #[tokio::test]
    async fn test_unknown_profile_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let (status, _) = get(app.clone(), "/icon.ico?browser=chrome&directory=Default").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(app, "/icon.ico").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreadable_icon_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let (status, body) = get(app, "/x.ico?browser=edge&directory=Default").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body = String::from_utf8(body).unwrap();
        assert!(body.starts_with("Could not load file /x.ico?"));
    }

    #[tokio::test]
    async fn test_non_icon_paths_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let (status, _) = get(
            app.clone(),
            "/favicon.ico?browser=chrome&directory=Profile%201",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(app, "/index.html?browser=chrome&directory=Profile%201").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_repeated_query_keys_keep_first_value() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let (status, body) = get(
            app.clone(),
            "/a.ico?browser=chrome&browser=edge&directory=Profile%201&directory=Default",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"\x00\x00\x01\x00icon");

        let (status, _) = get(app, "/index.html?directory=a&directory=b").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_encoded_icon_path_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let (status, _) = get(app.clone(), "/a%2Eico?browser=chrome&directory=Profile%201").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(app, "/favicon%2Eico?browser=chrome&directory=Profile%201").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_is_405() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(registry(dir.path()));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/icon.ico?browser=chrome&directory=Profile%201")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_query_parse_defaults_to_empty() {
        assert_eq!(
            IconQuery::parse("directory=Profile+1&other=x"),
            IconQuery {
                browser: String::new(),
                directory: "Profile 1".to_string(),
            }
        );
    }

    #[test]
    fn test_icon_url_encodes_query() {
        let base = base_url("127.0.0.1:8080".parse().unwrap()).unwrap();
        let url = icon_url(&base, &ProfileKey::new(Browser::ChromeBeta, "Profile 1")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/profile.ico?browser=chrome-beta&directory=Profile+1"
        );
    }

    #[tokio::test]
    async fn test_spawned_server_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path());
        let config = ServerConfig {
            bind: "127.0.0.1".to_string(),
            port: 0,
        };

        let addr = spawn(&config, registry).await.unwrap();
        let base = base_url(addr).unwrap();
        let url = icon_url(&base, &ProfileKey::new(Browser::Chrome, "Profile 1")).unwrap();

        let response = reqwest::get(url).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.bytes().await.unwrap().as_ref(),
            b"\x00\x00\x01\x00icon"
        );
    }
}
