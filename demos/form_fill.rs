use form_filler::{FormBrowser, FormFiller, FormSurface, ProfileBook};

#[tokio::main]
async fn main() -> form_filler::Result<()> {
    let browser = FormBrowser::builder().headless(true).build().await?;
    let page = browser.new_page("https://httpbin.org/forms/post").await?;
    let filler = FormFiller::new(page);

    let controls = filler.surface().controls().await?;
    println!("Found {} form controls:", controls.len());
    for control in &controls {
        println!("  {:?} (type={}, name={})", control.tag, control.kind, control.name);
    }

    let profiles = ProfileBook::builtin();
    let profile = profiles.get("business").cloned().unwrap_or_default();
    let result = filler.fill(&profile, true).await?;
    println!("Filled {} of {} fields", result.filled, result.found);

    for control in filler.surface().controls().await? {
        if !control.value.is_empty() {
            println!("  {} = {}", control.name, control.value);
        }
    }

    Ok(())
}
