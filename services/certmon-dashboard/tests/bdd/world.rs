//! BDD test world for the certmon dashboard

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use cucumber::World;
use serde_json::Value;
use tower::ServiceExt;

use certmon_dashboard::backend::BackendClient;
use certmon_dashboard::dashboard::build_router;
use certmon_dashboard::io::{HttpClient, HttpResponse};

/// In-memory backend serving the JSON the scenario has set up
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub bodies: Mutex<HashMap<String, String>>,
    pub failing: Mutex<Vec<String>>,
    pub requests: Mutex<Vec<String>>,
    pub posts: Mutex<Vec<Vec<(String, String)>>>,
    pub post_status: Mutex<Option<u16>>,
}

impl FakeBackend {
    fn path(url: &str) -> String {
        url.trim_start_matches("http://backend").to_string()
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn get(&self, url: &str) -> certmon_dashboard::Result<HttpResponse> {
        let path = Self::path(url);
        self.requests.lock().unwrap().push(path.clone());

        let endpoint = path.split('?').next().unwrap_or_default().to_string();
        if self.failing.lock().unwrap().contains(&endpoint) {
            return Ok(HttpResponse {
                status: 500,
                body: String::new(),
            });
        }
        let bodies = self.bodies.lock().unwrap();
        let body = bodies
            .get(&path)
            .or_else(|| bodies.get(&endpoint))
            .cloned()
            .unwrap_or_else(|| "null".to_string());
        Ok(HttpResponse { status: 200, body })
    }

    async fn post_form(
        &self,
        _url: &str,
        params: &[(&str, &str)],
    ) -> certmon_dashboard::Result<HttpResponse> {
        self.posts.lock().unwrap().push(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        Ok(HttpResponse {
            status: self.post_status.lock().unwrap().unwrap_or(202),
            body: String::new(),
        })
    }
}

#[derive(Debug, Default, World)]
pub struct CertmonWorld {
    pub backend: Arc<FakeBackend>,

    // Backend records, serialized on request
    pub certificates: Vec<Value>,
    pub states: Vec<Value>,
    pub state_certificates: Vec<Value>,

    pub response_status: Option<u16>,
    pub response_location: Option<String>,
    pub response_body: Option<String>,
}

impl CertmonWorld {
    fn publish(&self) {
        let mut bodies = self.backend.bodies.lock().unwrap();
        for (path, list) in [
            ("/certs", &self.certificates),
            ("/states", &self.states),
            ("/statecerts", &self.state_certificates),
        ] {
            bodies.insert(path.to_string(), Value::Array(list.clone()).to_string());
        }
    }

    pub async fn send(&mut self, request: Request<Body>) {
        self.publish();
        let client = BackendClient::new("http://backend", self.backend.clone());
        let response = build_router(client).oneshot(request).await.unwrap();

        self.response_status = Some(response.status().as_u16());
        self.response_location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        self.response_body = Some(String::from_utf8(body.to_vec()).unwrap());
    }

    pub async fn get(&mut self, uri: &str) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
    }

    pub fn body(&self) -> &str {
        self.response_body.as_deref().expect("no response body")
    }
}
