//! BDD step definitions for backend reports

use cucumber::{given, when};
use serde_json::json;

use crate::world::CertmonWorld;

#[given(expr = "the backend reports certificate {string} expiring within {int} days")]
fn backend_expire_report(world: &mut CertmonWorld, common_name: String, days: u32) {
    let body = json!([{
        "commonName": common_name,
        "fingerprint": "fp",
        "domains": [common_name],
        "expired": days,
    }]);
    world
        .backend
        .bodies
        .lock()
        .unwrap()
        .insert(format!("/report/expire?filter={}", days), body.to_string());
}

#[given(expr = "the backend reports state {string} with validity {int}")]
fn backend_validity_report(world: &mut CertmonWorld, host: String, valid: i64) {
    let body = json!([{"host": host, "valid": valid, "description": "reported"}]);
    world
        .backend
        .bodies
        .lock()
        .unwrap()
        .insert(format!("/report/valid?filter={}", valid), body.to_string());
}

#[when(expr = "the expiry report for {int} days is requested")]
async fn request_expire_report(world: &mut CertmonWorld, days: u32) {
    world.get(&format!("/report/expire?days={}", days)).await;
}

#[when(expr = "the validity report for code {int} is requested")]
async fn request_validity_report(world: &mut CertmonWorld, code: i64) {
    world.get(&format!("/report/valid?valid={}", code)).await;
}
