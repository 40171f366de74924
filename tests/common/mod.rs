//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    Router,
};
use elastic_request_log::ElasticLogConfig;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A request received by the mock Elasticsearch.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

impl CapturedRequest {
    /// Last path segment, i.e. the document ID of an index request.
    #[allow(dead_code)]
    pub fn document_id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }
}

/// Handle to a running mock Elasticsearch.
pub struct MockElasticsearch {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockElasticsearch {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock Elasticsearch that records every request and answers with
/// whatever `f` returns.
pub async fn start_programmable_elasticsearch<F, Fut>(f: F) -> MockElasticsearch
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    let app = Router::new().fallback(move |request: Request| {
        let f = f.clone();
        let recorded = recorded.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
            recorded.lock().unwrap().push(CapturedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(str::to_string),
                authorization: parts
                    .headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            });

            let (status, body) = f().await;
            (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockElasticsearch { addr, requests }
}

/// Start a mock Elasticsearch that accepts every document.
#[allow(dead_code)]
pub async fn start_mock_elasticsearch() -> MockElasticsearch {
    start_programmable_elasticsearch(|| async {
        (
            201,
            r#"{"_index":"test-index","_id":"1","_version":1,"result":"created","_shards":{"total":2,"successful":1,"failed":0}}"#
                .to_string(),
        )
    })
    .await
}

/// Start a mock Elasticsearch that takes `delay` before accepting.
#[allow(dead_code)]
pub async fn start_slow_elasticsearch(delay: Duration) -> MockElasticsearch {
    start_programmable_elasticsearch(move || async move {
        tokio::time::sleep(delay).await;
        (201, r#"{"_version":1,"result":"created"}"#.to_string())
    })
    .await
}

/// Handle to a mock Elasticsearch that holds every request open.
#[allow(dead_code)]
pub struct StallingElasticsearch {
    pub addr: SocketAddr,
    disconnected: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl StallingElasticsearch {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// True once a client closed its connection before getting an answer.
    pub fn client_hung_up(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}

/// Start a raw TCP mock Elasticsearch that keeps reading each connection for
/// `delay` before answering 201.
#[allow(dead_code)]
pub async fn start_stalling_elasticsearch(delay: Duration) -> StallingElasticsearch {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let disconnected = Arc::new(AtomicBool::new(false));

    let flag = disconnected.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let flag = flag.clone();
            tokio::spawn(async move {
                let deadline = tokio::time::Instant::now() + delay;
                let mut buf = [0u8; 4096];
                loop {
                    match tokio::time::timeout_at(deadline, socket.read(&mut buf)).await {
                        Ok(Ok(0)) | Ok(Err(_)) => {
                            flag.store(true, Ordering::SeqCst);
                            return;
                        }
                        Ok(Ok(_)) => continue,
                        Err(_) => break,
                    }
                }

                let body = r#"{"_version":1,"result":"created"}"#;
                let response = format!(
                    "HTTP/1.1 201 Created\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    StallingElasticsearch { addr, disconnected }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Configuration used throughout the tests, pointing at `url`.
pub fn test_config(url: &str) -> ElasticLogConfig {
    ElasticLogConfig {
        elasticsearch_url: url.to_string(),
        index_name: "test-index".into(),
        message: "Test Elasticsearch".into(),
        username: "elastic".into(),
        password: "elastic".into(),
        ..Default::default()
    }
}
