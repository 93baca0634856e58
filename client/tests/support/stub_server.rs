//! Canned-response HTTP server standing in for the project server.
//!
//! Routes are matched on method and path only; every request is recorded so
//! tests can assert on what the REST adapter sent. Must run inside an Actix
//! system (`#[actix_rt::test]`).

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// One canned answer.
#[derive(Debug, Clone)]
pub struct StubRoute {
    method: Method,
    path: &'static str,
    status: u16,
    body: Value,
}

impl StubRoute {
    pub fn get(path: &'static str, status: u16, body: Value) -> Self {
        Self {
            method: Method::GET,
            path,
            status,
            body,
        }
    }

    pub fn post(path: &'static str, status: u16, body: Value) -> Self {
        Self {
            method: Method::POST,
            path,
            status,
            body,
        }
    }
}

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

struct StubData {
    routes: Vec<StubRoute>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubServer {
    base_url: String,
    handle: ServerHandle,
    data: web::Data<StubData>,
}

impl StubServer {
    pub fn start(routes: Vec<StubRoute>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let data = web::Data::new(StubData {
            routes,
            requests: Mutex::new(Vec::new()),
        });
        let server_data = data.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .listen(listener)
        .expect("listen on stub listener")
        .run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/"),
            handle,
            data,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data.requests.lock().expect("requests lock").clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().expect("one request")
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn respond(request: HttpRequest, body: web::Bytes, data: web::Data<StubData>) -> HttpResponse {
    let header_text = |name: header::HeaderName| {
        request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    data.requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: request.method().to_string(),
            path: request.path().to_owned(),
            query: request.query_string().to_owned(),
            authorization: header_text(header::AUTHORIZATION),
            content_type: header_text(header::CONTENT_TYPE),
            body: body.to_vec(),
        });

    let route = data
        .routes
        .iter()
        .find(|route| route.method == request.method() && route.path == request.path());
    match route {
        Some(route) => {
            let status = StatusCode::from_u16(route.status).expect("valid stub status");
            HttpResponse::build(status).json(&route.body)
        }
        None => HttpResponse::NotFound().json(json!({ "detail": "Not found." })),
    }
}
