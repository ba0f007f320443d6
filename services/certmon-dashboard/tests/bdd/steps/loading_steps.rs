//! BDD step definitions for loading the dashboard page

use cucumber::{given, then, when};
use serde_json::json;

use crate::world::CertmonWorld;

#[given(expr = "the backend has a certificate {string} expiring in {int} days")]
fn backend_certificate(world: &mut CertmonWorld, common_name: String, days: i64) {
    let n = world.certificates.len();
    world.certificates.push(json!({
        "commonName": common_name,
        "fingerprint": format!("fp{}", n),
        "subjectHash": format!("sh{}", n),
        "issuerHash": format!("ih{}", n),
        "domains": [common_name],
        "expired": days,
    }));
}

#[given(expr = "the backend has a state {string} with validity {string}")]
fn backend_state(world: &mut CertmonWorld, host: String, valid: String) {
    world.states.push(json!({
        "host": host,
        "valid": valid,
        "description": "",
    }));
}

#[given(expr = "the backend has a state {string} with a null description and string type {string}")]
fn backend_state_malformed(world: &mut CertmonWorld, host: String, kind: String) {
    world.states.push(json!({
        "host": host,
        "type": kind,
        "valid": 0,
        "description": null,
    }));
}

#[given(expr = "the backend has a state {string} with SNI {string} and validity {string}")]
fn backend_state_with_sni(world: &mut CertmonWorld, host: String, sni: String, valid: String) {
    world.states.push(json!({
        "host": host,
        "sni": sni,
        "valid": valid,
        "description": "",
    }));
}

#[given(expr = "the backend has a state {string} with SNI {string} serving {int} certificates")]
fn backend_state_chain(world: &mut CertmonWorld, host: String, sni: String, count: usize) {
    let certificates: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "commonName": format!("chain{}", i),
                "fingerprint": format!("chainfp{}", i),
                "subjectHash": format!("chainsh{}", i),
                "issuerHash": format!("chainih{}", i),
                "notAfter": "2027-01-01T00:00:00Z",
            })
        })
        .collect();
    world.state_certificates.push(json!({
        "host": host,
        "sni": sni,
        "type": 1,
        "valid": 1,
        "description": "",
        "certificates": certificates,
    }));
}

#[given(expr = "the backend {string} endpoint fails")]
fn backend_endpoint_fails(world: &mut CertmonWorld, endpoint: String) {
    world.backend.failing.lock().unwrap().push(endpoint);
}

#[when("the dashboard page is requested")]
async fn request_index(world: &mut CertmonWorld) {
    world.get("/").await;
}

#[when(expr = "the dashboard page is requested with tab {string}")]
async fn request_index_tab(world: &mut CertmonWorld, tab: String) {
    world.get(&format!("/?tab={}", tab)).await;
}

#[then(expr = "the response status should be {int}")]
fn response_status(world: &mut CertmonWorld, status: u16) {
    assert_eq!(world.response_status, Some(status));
}

#[then(expr = "the response should contain {string}")]
fn response_contains(world: &mut CertmonWorld, expected: String) {
    let body = world.body();
    assert!(
        body.contains(&expected),
        "Expected response to contain '{}', but it didn't.\nResponse body:\n{}",
        expected,
        body
    );
}

#[then(expr = "the response should not contain {string}")]
fn response_not_contains(world: &mut CertmonWorld, unexpected: String) {
    let body = world.body();
    assert!(
        !body.contains(&unexpected),
        "Expected response not to contain '{}'.\nResponse body:\n{}",
        unexpected,
        body
    );
}

#[then(expr = "the {string} tab should be active")]
fn tab_active(world: &mut CertmonWorld, slug: String) {
    let expected = format!(r#"<a href="/?tab={}" class="active">"#, slug);
    assert!(world.body().contains(&expected));
    let section = format!(r#"<section id="tab-{}">"#, slug);
    assert!(world.body().contains(&section), "tab {} is hidden", slug);
}

#[then(expr = "the {string} table should have {int} danger rows")]
fn danger_rows(world: &mut CertmonWorld, table_id: String, count: usize) {
    let body = world.body();
    let start = body
        .find(&format!(r#"<table id="{}""#, table_id))
        .unwrap_or_else(|| panic!("table {} not rendered", table_id));
    let end = start + body[start..].find("</table>").unwrap();
    assert_eq!(body[start..end].matches(r#"<tr class="danger""#).count(), count);
}

#[then(expr = "the {string} table should have {int} rows")]
fn table_rows(world: &mut CertmonWorld, table_id: String, count: usize) {
    let body = world.body();
    let start = body
        .find(&format!(r#"<table id="{}""#, table_id))
        .unwrap_or_else(|| panic!("table {} not rendered", table_id));
    let end = start + body[start..].find("</table>").unwrap();
    assert_eq!(body[start..end].matches("data-row=").count(), count);
}
