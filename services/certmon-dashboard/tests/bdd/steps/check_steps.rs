//! BDD step definitions for online checks and adding states

use axum::body::Body;
use axum::http::{header, Request};
use cucumber::{given, then, when};
use serde_json::json;

use crate::world::CertmonWorld;

fn encode(params: &[(&str, &str)]) -> String {
    reqwest::Url::parse_with_params("http://dashboard/", params)
        .unwrap()
        .query()
        .unwrap_or_default()
        .to_string()
}

#[given(expr = "the backend reports validity {int} with {int} certificates for {string}")]
fn backend_check_result(world: &mut CertmonWorld, valid: i64, count: usize, query: String) {
    let (host, sni) = match query.split_once('/') {
        Some((host, sni)) => (host, Some(sni)),
        None => (query.as_str(), None),
    };
    let mut params = vec![("host", host)];
    if let Some(sni) = sni {
        params.push(("sni", sni));
    }
    let certificates: Vec<_> = (0..count)
        .map(|i| json!({"commonName": format!("chain{}", i), "fingerprint": format!("fp{}", i)}))
        .collect();
    let body = json!({
        "valid": valid,
        "description": "checked",
        "certificates": certificates,
    });
    world
        .backend
        .bodies
        .lock()
        .unwrap()
        .insert(format!("/check?{}", encode(&params)), body.to_string());
}

#[given(expr = "the backend rejects new states with status {int}")]
fn backend_rejects_states(world: &mut CertmonWorld, status: u16) {
    *world.backend.post_status.lock().unwrap() = Some(status);
}

#[when(expr = "the user checks {string}")]
async fn user_checks(world: &mut CertmonWorld, query: String) {
    let uri = format!("/onlinecheck?{}", encode(&[("query", &query)]));
    world.get(&uri).await;
}

#[when(expr = "the user adds host {string} with SNI {string}")]
async fn user_adds_state(world: &mut CertmonWorld, host: String, sni: String) {
    let request = Request::builder()
        .method("POST")
        .uri("/states")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encode(&[("host", &host), ("sni", &sni)])))
        .unwrap();
    world.send(request).await;
}

#[then(expr = "the backend should have received {int} check requests")]
fn check_requests(world: &mut CertmonWorld, count: usize) {
    let requests = world.backend.requests.lock().unwrap();
    assert_eq!(
        requests.iter().filter(|r| r.starts_with("/check")).count(),
        count
    );
}

#[then(expr = "the backend should have been asked to monitor {string}")]
fn backend_received_state(world: &mut CertmonWorld, host: String) {
    let posts = world.backend.posts.lock().unwrap();
    assert!(
        posts
            .iter()
            .any(|p| p.iter().any(|(k, v)| k == "host" && *v == host)),
        "no state posted for {}: {:?}",
        host,
        posts
    );
}

#[then(expr = "the response should redirect to {string}")]
fn response_redirects(world: &mut CertmonWorld, location: String) {
    assert_eq!(world.response_status, Some(303));
    assert_eq!(world.response_location.as_deref(), Some(location.as_str()));
}
