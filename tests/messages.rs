use form_filler::{
    Category, ControlHandle, Error, FormControl, FormFiller, MemoryDocument, MessageTarget, Profile, Request,
    Response,
};
use serde_json::json;

fn signup_form() -> MemoryDocument {
    MemoryDocument::new([
        FormControl::input("email").name("email"),
        FormControl::input("text").name("fname"),
        FormControl::input("number").name("age"),
    ])
}

#[test]
fn decodes_fill_request() {
    let raw = json!({
        "action": "fillForm",
        "profile": { "firstName": "Ann", "email": "ann@example.com", "age": 30, "nickname": "ignored" },
        "autoDetect": false
    });
    let request = Request::from_value(&raw).expect("valid").expect("recognized");

    let expected_profile = Profile::new()
        .with(Category::FirstName, "Ann")
        .with(Category::Email, "ann@example.com")
        .with(Category::Age, "30");
    assert_eq!(
        request,
        Request::FillForm { profile: expected_profile, auto_detect: false }
    );
}

#[test]
fn auto_detect_defaults_to_on() {
    let raw = json!({ "action": "fillForm", "profile": {} });
    match Request::from_value(&raw).expect("valid") {
        Some(Request::FillForm { auto_detect, profile }) => {
            assert!(auto_detect);
            assert!(profile.is_empty());
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unknown_or_missing_action_is_ignored() {
    assert_eq!(Request::from_value(&json!({ "action": "getData" })).expect("ok"), None);
    assert_eq!(Request::from_value(&json!({ "profile": {} })).expect("ok"), None);
    assert_eq!(Request::from_value(&json!("fillForm")).expect("ok"), None);
}

#[test]
fn fill_without_profile_is_invalid() {
    let err = Request::from_value(&json!({ "action": "fillForm" })).expect_err("missing profile");
    assert!(matches!(err, Error::InvalidMessage(_)), "got {err:?}");
}

#[test]
fn empty_profile_values_count_as_absent() {
    let profile: Profile = serde_json::from_value(json!({ "email": "", "phone": null })).expect("decode");
    assert_eq!(profile.get(Category::Email), None);
    assert_eq!(profile.get(Category::Phone), None);
    assert!(profile.is_empty());
}

#[tokio::test]
async fn falsy_profile_values_are_not_written() {
    let doc = MemoryDocument::new([
        FormControl::input("number").name("years"),
        FormControl::input("text").name("email"),
    ]);
    let filler = FormFiller::new(doc.clone());

    let reply = filler
        .send(json!({ "action": "fillForm", "profile": { "age": 0, "email": false } }))
        .await
        .expect("send")
        .expect("response");

    assert_eq!(reply, json!({ "success": false, "filled": 0, "found": 2 }));
    assert_eq!(doc.values(), vec!["", ""]);
}

#[tokio::test]
async fn non_scalar_profile_values_are_skipped() {
    let doc = MemoryDocument::new([FormControl::input("email"), FormControl::input("date")]);
    let filler = FormFiller::new(doc.clone());

    let reply = filler
        .send(json!({ "action": "fillForm", "profile": { "email": "a@b.c", "company": { "n": 1 }, "city": [1] } }))
        .await
        .expect("send")
        .expect("response");

    assert_eq!(reply, json!({ "success": true, "filled": 2, "found": 2 }));
    assert_eq!(doc.value(ControlHandle(0)).as_deref(), Some("a@b.c"));
    assert_eq!(doc.value(ControlHandle(1)).map(|v| v.len()), Some(10));
}

#[test]
fn non_object_profile_is_invalid() {
    let err = Request::from_value(&json!({ "action": "fillForm", "profile": "personal" })).expect_err("string profile");
    assert!(matches!(err, Error::InvalidMessage(_)), "got {err:?}");
}

#[tokio::test]
async fn fill_message_round_trip() {
    let doc = signup_form();
    let filler = FormFiller::new(doc.clone());

    let reply = filler
        .send(json!({
            "action": "fillForm",
            "profile": { "email": "x@y.z", "firstName": "Xi", "age": "28" },
            "autoDetect": true
        }))
        .await
        .expect("send")
        .expect("response");

    assert_eq!(reply, json!({ "success": true, "filled": 3, "found": 3 }));
    assert_eq!(doc.value(ControlHandle(2)).as_deref(), Some("28"));
}

#[tokio::test]
async fn fill_with_nothing_to_write_is_not_success() {
    let filler = FormFiller::new(signup_form());
    let response = filler
        .handle(&Request::FillForm { profile: Profile::new(), auto_detect: true })
        .await
        .expect("handle");

    assert_eq!(response, Response::Fill { success: false, filled: 0, found: 3 });
    assert!(!response.success());
}

#[tokio::test]
async fn clear_message_round_trip() {
    let filler = FormFiller::new(signup_form());
    let reply = filler
        .send(json!({ "action": "clearForm" }))
        .await
        .expect("send")
        .expect("response");
    assert_eq!(reply, json!({ "success": true }));

    let filler = FormFiller::new(MemoryDocument::empty());
    let response = filler
        .handle_message(&json!({ "action": "clearForm" }))
        .await
        .expect("handle");
    assert_eq!(response, Some(Response::Clear { success: false }));
}

#[tokio::test]
async fn unknown_action_gets_no_reply() {
    let doc = signup_form();
    let filler = FormFiller::new(doc.clone());
    let reply = filler.send(json!({ "action": "ping" })).await.expect("send");

    assert!(reply.is_none());
    assert!(doc.values().iter().all(String::is_empty));
}

#[test]
fn responses_decode_by_shape() {
    let fill: Response = serde_json::from_value(json!({ "success": true, "filled": 2, "found": 5 })).expect("fill");
    assert_eq!(fill, Response::Fill { success: true, filled: 2, found: 5 });

    let clear: Response = serde_json::from_value(json!({ "success": false })).expect("clear");
    assert_eq!(clear, Response::Clear { success: false });
}
