//! Scripted game backend on a random local port.
//!
//! Responses are queued per path and served first-in first-out; every request
//! is recorded so tests can assert on what the client actually sent. Paths
//! without a queued response answer 404 with a `detail`.

use std::collections::{HashMap, VecDeque};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Clone)]
enum Body {
    Json(Value),
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    status: u16,
    body: Body,
    delay: Option<Duration>,
}

impl ScriptedResponse {
    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Body::Json(body),
            delay: None,
        }
    }

    /// Non-JSON body, e.g. for malformed-response tests.
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Raw(body.into()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Parsed JSON body; `Value::Null` when absent or not JSON.
    pub body: Value,
}

#[derive(Default)]
struct Script {
    queues: HashMap<String, VecDeque<ScriptedResponse>>,
    requests: Vec<RecordedRequest>,
}

type SharedScript = Arc<Mutex<Script>>;

fn lock(script: &SharedScript) -> MutexGuard<'_, Script> {
    // Poisoning is ignored; the script stays readable after a test panic.
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct FakeBackend {
    addr: SocketAddr,
    handle: ServerHandle,
    script: SharedScript,
}

impl FakeBackend {
    /// Bind to `127.0.0.1:0` and serve in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let script = SharedScript::default();
        let data = web::Data::new(script.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(serve))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)?
        .run();

        let handle = server.handle();
        tokio::spawn(server);

        Ok(Self {
            addr,
            handle,
            script,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn enqueue(&self, path: &str, response: ScriptedResponse) {
        lock(&self.script)
            .queues
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.script).requests.clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        lock(&self.script)
            .requests
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn serve(req: HttpRequest, body: web::Bytes, script: web::Data<SharedScript>) -> HttpResponse {
    let path = req.path().to_string();
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: path.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    debug!(method = %recorded.method, path = %path, "Fake backend request");

    let scripted = {
        let mut script = lock(&script);
        script.requests.push(recorded);
        script.queues.get_mut(&path).and_then(VecDeque::pop_front)
    };

    let Some(scripted) = scripted else {
        return HttpResponse::NotFound()
            .json(json!({ "detail": format!("no scripted response for {path}") }));
    };

    if let Some(delay) = scripted.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(scripted.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match scripted.body {
        Body::Json(value) => HttpResponse::build(status).json(value),
        Body::Raw(text) => HttpResponse::build(status)
            .content_type("text/plain")
            .body(text),
    }
}
