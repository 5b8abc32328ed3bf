use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use form_filler::controller::{ProfileSummary, StatusKind};
use form_filler::{
    Controller, FormBrowser, FormFiller, JsonFileStore, Page, ProfileBook, Result, SettingsStore, Status,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "form-filler", about = "Fill web forms from saved profiles")]
struct Cli {
    /// Settings file (default: <config dir>/form-filler/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Chrome executable to launch
    #[arg(long, global = true)]
    chrome: Option<String>,

    /// Show the browser window
    #[arg(long, global = true)]
    headed: bool,

    /// Seconds to keep the page open after acting
    #[arg(long, global = true, default_value_t = 0)]
    linger: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill the form at URL with the selected profile
    Fill {
        url: String,
        /// Profile to select before filling
        #[arg(long)]
        profile: Option<String>,
        /// Enable or disable the generic text fallback
        #[arg(long)]
        auto_detect: Option<bool>,
    },
    /// Clear every editable field at URL
    Clear { url: String },
    /// List the available profiles
    Profiles,
    /// Show or change saved settings
    Settings {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        auto_detect: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(status) if status.is_success() || status.kind == StatusKind::Info => {
            println!("{status}");
            ExitCode::SUCCESS
        }
        Ok(status) => {
            println!("{status}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Status> {
    let store = match cli.settings {
        Some(ref path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location(),
    };
    let mut controller = Controller::load(store, ProfileBook::builtin())?;

    match cli.command {
        Command::Fill { ref url, ref profile, auto_detect } => {
            if let Some(key) = profile {
                controller.select_profile(key)?;
            }
            if let Some(enabled) = auto_detect {
                controller.set_auto_detect(enabled)?;
            }
            let (_browser, filler) = open(&cli, url).await?;
            let page_url = filler.surface().url().await?;
            let status = controller.fill(&filler, &page_url).await?;
            print_stats(&controller);
            linger(cli.linger).await;
            Ok(status)
        }
        Command::Clear { ref url } => {
            let (_browser, filler) = open(&cli, url).await?;
            let status = controller.clear(&filler).await?;
            linger(cli.linger).await;
            Ok(status)
        }
        Command::Profiles => {
            let current = controller.settings().current_profile.clone();
            for (key, profile) in controller.profiles().iter() {
                let summary = ProfileSummary::of(profile);
                let marker = if key == current { "*" } else { " " };
                println!(
                    "{marker} {key:<10} {} <{}> {}",
                    summary.name, summary.email, summary.phone
                );
            }
            Ok(Status::info(format!("{} profiles", controller.profiles().keys().count())))
        }
        Command::Settings { profile, auto_detect } => {
            if let Some(ref key) = profile {
                controller.select_profile(key)?;
            }
            let status = match auto_detect {
                Some(enabled) => controller.set_auto_detect(enabled)?,
                None => Status::info(format!(
                    "profile={} autoDetect={}",
                    controller.settings().current_profile,
                    controller.settings().auto_detect
                )),
            };
            print_stats(&controller);
            Ok(status)
        }
    }
}

/// The browser is returned alongside the filler because dropping it closes the page.
async fn open(cli: &Cli, url: &str) -> Result<(FormBrowser, FormFiller<Page>)> {
    let mut builder = FormBrowser::builder().headless(!cli.headed);
    if let Some(ref path) = cli.chrome {
        builder = builder.chrome_path(path);
    }
    let browser = builder.build().await?;
    let page = browser.new_page(url).await?;
    Ok((browser, FormFiller::new(page)))
}

fn print_stats<St: SettingsStore>(controller: &Controller<St>) {
    let stats = controller.stats();
    let last_used = stats
        .last_used
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "Never".to_string());
    println!(
        "found: {}  filled: {}  last used: {}",
        stats.fields_found, stats.fields_filled, last_used
    );
}

async fn linger(secs: u64) {
    if secs > 0 {
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
}
