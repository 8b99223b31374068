//! Records built from posted bodies must serialize back to the posted shape.

use chrono::{TimeZone, Utc};
use lead_core::enums::SubmissionStatus;
use lead_core::submission::Submission;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn build(body: Value) -> Submission {
    let Value::Object(map) = body else {
        panic!("fixture must be an object");
    };
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
    Submission::from_payload(map, now, [0xab, 0xcd]).expect("valid payload")
}

#[test]
fn contact_page_scenario_keeps_every_field() {
    let posted = json!({
        "id": "sub-1777626000000",
        "submittedAt": "2026-05-01T09:00:00.000Z",
        "firstName": "Jane",
        "email": "jane@x.com",
        "phone": "0411111111",
        "service": "web-design",
        "message": "Need a site"
    });
    let record = build(posted.clone());

    let mut expected = posted;
    expected["status"] = json!("new");
    assert_eq!(serde_json::to_value(&record).unwrap(), expected);
}

#[test]
fn nested_unknown_fields_survive() {
    let record = build(json!({
        "email": "ops@acme.io",
        "utm": {"source": "google", "campaign": "spring"},
        "pages": ["home", "pricing"]
    }));
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["utm"]["campaign"], json!("spring"));
    assert_eq!(value["pages"][1], json!("pricing"));
    assert_eq!(value["status"], json!("new"));

    let back: Submission = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.status, SubmissionStatus::New);
}
