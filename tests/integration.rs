//! End-to-end tests against a real headless Chrome. Run with
//! `cargo test -- --ignored` on a machine with Chrome installed.

use form_filler::page::NOTICE_ID;
use form_filler::surface::{Highlight, ValueWrite, FILL_EVENTS};
use form_filler::{FormBrowser, FormFiller, FormSurface, ProfileBook};

const SIGNUP_FORM: &str = "data:text/html,\
<form>\
<input type='email' id='mail'>\
<input type='tel' name='phone'>\
<input name='first_name'>\
<input name='last_name'>\
<input type='hidden' name='token' value='abc'>\
<input name='city' disabled>\
<textarea name='comments'></textarea>\
<input type='submit'>\
</form>\
<script>\
window.seen = [];\
document.addEventListener('input', e => window.seen.push(e.target.name || e.target.id));\
</script>";

async fn launch() -> FormBrowser {
    FormBrowser::builder()
        .headless(true)
        .build()
        .await
        .expect("Failed to launch browser")
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_snapshot_controls() {
    let browser = launch().await;
    let page = browser.new_page(SIGNUP_FORM).await.expect("Failed to open page");

    let controls = page.controls().await.expect("Failed to read controls");
    assert_eq!(controls.len(), 8);
    assert_eq!(controls[0].kind, "email");
    assert_eq!(controls[2].kind, "text");
    assert_eq!(controls[6].kind, "textarea");
    assert!(controls[5].disabled);
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_fill_and_clear_page() {
    let browser = launch().await;
    let page = browser.new_page(SIGNUP_FORM).await.expect("Failed to open page");
    let filler = FormFiller::new(page);

    let profile = ProfileBook::builtin().get("personal").cloned().expect("builtin profile");
    let result = filler.fill(&profile, true).await.expect("Failed to fill");
    assert_eq!(result.found, 5);
    assert_eq!(result.filled, 5);

    let controls = filler.surface().controls().await.expect("Failed to read controls");
    assert_eq!(controls[0].value, "john.doe@email.com");
    assert_eq!(controls[2].value, "John");
    assert_eq!(controls[4].value, "abc");
    assert_eq!(controls[6].value, "This is a test message.");

    let seen: String = filler
        .surface()
        .inner()
        .evaluate("window.seen.join(',')")
        .await
        .expect("Failed to read events")
        .into_value()
        .expect("string");
    assert_eq!(seen, "mail,phone,first_name,last_name,comments");

    let notice: bool = filler
        .surface()
        .inner()
        .evaluate(format!("!!document.getElementById('{NOTICE_ID}')"))
        .await
        .expect("Failed to query notice")
        .into_value()
        .expect("bool");
    assert!(notice);

    assert!(filler.clear().await.expect("Failed to clear"));
    let controls = filler.surface().controls().await.expect("Failed to read controls");
    assert_eq!(controls[0].value, "");
    assert_eq!(controls[4].value, "abc");
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_title_and_url() {
    let browser = launch().await;
    let page = browser
        .new_page("data:text/html,<title>Signup</title><input name='email'>")
        .await
        .expect("Failed to open page");

    assert_eq!(page.title().await.expect("Failed to get title"), "Signup");
    assert!(page.url().await.expect("Failed to get url").starts_with("data:"));
    page.wait_for_selector("input").await.expect("input present");
    page.close().await.expect("Failed to close page");
}

#[tokio::test]
#[ignore = "requires a local Chrome"]
async fn test_stale_handles_are_skipped() {
    let browser = launch().await;
    let page = browser
        .new_page("data:text/html,<input name='city'><input name='zip'>")
        .await
        .expect("Failed to open page");

    let controls = page.controls().await.expect("Failed to read controls");
    page.evaluate_void("document.body.prepend(document.createElement('input'))")
        .await
        .expect("Failed to mutate page");

    let writes: Vec<ValueWrite> = controls
        .iter()
        .map(|c| ValueWrite {
            handle: c.handle,
            value: "x".into(),
            events: FILL_EVENTS,
            highlight: Highlight::Filled,
        })
        .collect();
    let applied = page.apply(&writes).await.expect("Failed to apply");
    assert_eq!(applied, 0);

    let values = page.controls().await.expect("Failed to read controls");
    assert!(values.iter().all(|c| c.value.is_empty()));
}
