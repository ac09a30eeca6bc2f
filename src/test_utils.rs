//! テスト用のスタブHTTPサーバー
//!
//! 事前に用意したレスポンスを順番に返し、受信したリクエストを記録する。

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// スタブサーバーが受信したリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// リクエスト本文をJSONとして解析する
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// スタブサーバーが返すレスポンス
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

type Queue = Arc<Mutex<VecDeque<StubResponse>>>;
type Log = Arc<Mutex<Vec<RecordedRequest>>>;

pub struct StubServer {
    addr: SocketAddr,
    requests: Log,
}

impl StubServer {
    /// レスポンスを登録してサーバーを起動する
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let responses: Queue = Arc::new(Mutex::new(VecDeque::from(responses)));
        let requests: Log = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let responses = Arc::clone(&responses);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        handle_request(req, Arc::clone(&responses), Arc::clone(&recorded))
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle_request(
    req: Request<Incoming>,
    responses: Queue,
    recorded: Log,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let authorization = header_value(&req, "authorization");
    let content_type = header_value(&req, "content-type");

    let body = match req.into_body().collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
        Err(_) => String::new(),
    };

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path,
        authorization,
        content_type,
        body,
    });

    let stub = responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| StubResponse::text(500, "no stub response"));

    let response = Response::builder()
        .status(stub.status)
        .header("content-type", stub.content_type)
        .body(Full::new(Bytes::from(stub.body)))
        .unwrap();
    Ok(response)
}

fn header_value(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
