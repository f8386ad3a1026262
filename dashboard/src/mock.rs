//! Mock YouTube API server for testing the fetchers.
//!
//! The mock serves canned JSON for the Data API and Analytics API endpoints the dashboard uses,
//! and records every request it sees so tests can assert on paths, query parameters and bearer
//! headers, or on the absence of any request at all.
//!
//! Routes are matched on path plus a set of required query parameters. The first registered
//! route that matches wins; requests matching no route get a 404.

use crate::youtube_api::client::{ApiEndpoints, YouTubeClient};
use bytes::Bytes;
use eyre::{Context, Result};
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const CHANNELS: &str = "/youtube/v3/channels";
pub const PLAYLIST_ITEMS: &str = "/youtube/v3/playlistItems";
pub const VIDEOS: &str = "/youtube/v3/videos";
pub const REPORTS: &str = "/v2/reports";

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    /// The first value of query parameter `key`, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
struct Route {
    path: String,
    query: Vec<(String, String)>,
    status: StatusCode,
    body: String,
}

impl Route {
    fn matches(&self, request: &RecordedRequest) -> bool {
        self.path == request.path
            && self
                .query
                .iter()
                .all(|(k, v)| request.query_param(k) == Some(v.as_str()))
    }
}

#[derive(Debug, Default)]
struct MockState {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    async fn handle(&self, req: Request<Incoming>) -> Response<Full<Bytes>> {
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
                .into_owned()
                .collect(),
            authorization: req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        };
        tracing::debug!(path = %recorded.path, query = ?recorded.query, "mock received request");

        let (status, body) = {
            let routes = self.routes.lock().await;
            match routes.iter().find(|r| r.matches(&recorded)) {
                Some(route) => (route.status, route.body.clone()),
                None => (
                    StatusCode::NOT_FOUND,
                    r#"{"error":{"code":404,"message":"no mock route"}}"#.to_string(),
                ),
            }
        };
        self.requests.lock().await.push(recorded);

        let mut response = Response::new(Full::new(Bytes::from(body)));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

/// An in-process HTTP server standing in for the YouTube APIs.
///
/// The server runs until the value is dropped.
#[derive(Debug)]
pub struct MockYouTubeApi {
    addr: SocketAddr,
    state: Arc<MockState>,
    http: reqwest::Client,
    server: JoinHandle<()>,
}

impl MockYouTubeApi {
    /// Starts a mock server on a random local port.
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind to localhost")?;
        let addr = listener.local_addr().context("get local address")?;
        let state = Arc::new(MockState::default());

        let server_state = Arc::clone(&state);
        let server = tokio::spawn(async move {
            loop {
                let (conn, _) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!(error = %e, "mock server failed to accept connection");
                        continue;
                    }
                };
                let state = Arc::clone(&server_state);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let state = Arc::clone(&state);
                        async move { Ok::<_, Infallible>(state.handle(req).await) }
                    });
                    if let Err(e) = hyper::server::conn::http1::Builder::new()
                        .serve_connection(TokioIo::new(conn), service)
                        .await
                    {
                        tracing::debug!(error = %e, "mock connection ended with error");
                    }
                });
            }
        });

        // Talk to the mock directly even if the environment configures a proxy.
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            addr,
            state,
            http,
            server,
        })
    }

    /// Registers a canned response for GET requests to `path` carrying all of `query`.
    pub async fn respond(
        &self,
        path: &str,
        query: &[(&str, &str)],
        status: StatusCode,
        body: impl Into<String>,
    ) {
        self.state.routes.lock().await.push(Route {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            status,
            body: body.into(),
        });
    }

    /// Registers a `200 OK` JSON response.
    pub async fn respond_json(&self, path: &str, query: &[(&str, &str)], body: serde_json::Value) {
        self.respond(path, query, StatusCode::OK, body.to_string())
            .await;
    }

    /// Endpoints pointing at this server.
    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints {
            data_api: format!("http://{}/youtube/v3", self.addr),
            analytics_api: format!("http://{}/v2", self.addr),
        }
    }

    /// A client wired to this server.
    pub fn client(&self) -> YouTubeClient {
        YouTubeClient::with_endpoints(self.http.clone(), self.endpoints())
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Requests received for `path`, in arrival order.
    pub async fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockYouTubeApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Canned upstream payloads.
pub mod fixtures {
    use serde_json::{Value, json};

    pub fn channel_statistics(views: &str, subscribers: &str, videos: &str) -> Value {
        json!({
            "kind": "youtube#channelListResponse",
            "pageInfo": {"totalResults": 1, "resultsPerPage": 5},
            "items": [{
                "kind": "youtube#channel",
                "id": "UCmock",
                "statistics": {
                    "viewCount": views,
                    "subscriberCount": subscribers,
                    "hiddenSubscriberCount": false,
                    "videoCount": videos
                }
            }]
        })
    }

    pub fn no_channels() -> Value {
        json!({
            "kind": "youtube#channelListResponse",
            "pageInfo": {"totalResults": 0, "resultsPerPage": 5}
        })
    }

    pub fn channel_uploads(playlist_id: &str) -> Value {
        json!({
            "kind": "youtube#channelListResponse",
            "items": [{
                "kind": "youtube#channel",
                "id": "UCmock",
                "contentDetails": {"relatedPlaylists": {"likes": "", "uploads": playlist_id}}
            }]
        })
    }

    /// An uploads listing; each entry is `(video id, title, published at)`.
    pub fn playlist_items(entries: &[(&str, &str, &str)]) -> Value {
        let items: Vec<Value> = entries
            .iter()
            .map(|(id, title, published_at)| {
                json!({
                    "kind": "youtube#playlistItem",
                    "snippet": {
                        "publishedAt": published_at,
                        "title": title,
                        "thumbnails": {
                            "default": {"url": format!("https://i.ytimg.com/vi/{id}/default.jpg"), "width": 120, "height": 90},
                            "medium": {"url": format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"), "width": 320, "height": 180}
                        },
                        "resourceId": {"kind": "youtube#video", "videoId": id}
                    }
                })
            })
            .collect();
        json!({
            "kind": "youtube#playlistItemListResponse",
            "pageInfo": {"totalResults": items.len(), "resultsPerPage": items.len()},
            "items": items
        })
    }

    /// Video statistics; each entry is `(video id, views, likes, comments, duration)`.
    pub fn video_statistics(entries: &[(&str, &str, &str, &str, &str)]) -> Value {
        let items: Vec<Value> = entries
            .iter()
            .map(|(id, views, likes, comments, duration)| {
                json!({
                    "kind": "youtube#video",
                    "id": id,
                    "statistics": {
                        "viewCount": views,
                        "likeCount": likes,
                        "favoriteCount": "0",
                        "commentCount": comments
                    },
                    "contentDetails": {"duration": duration}
                })
            })
            .collect();
        json!({"kind": "youtube#videoListResponse", "items": items})
    }

    pub fn report(views: i64, gained: i64, lost: i64) -> Value {
        json!({
            "kind": "youtubeAnalytics#resultTable",
            "columnHeaders": [
                {"name": "views", "columnType": "METRIC", "dataType": "INTEGER"},
                {"name": "subscribersGained", "columnType": "METRIC", "dataType": "INTEGER"},
                {"name": "subscribersLost", "columnType": "METRIC", "dataType": "INTEGER"}
            ],
            "rows": [[views, gained, lost]]
        })
    }
}
