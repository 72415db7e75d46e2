use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use advisor::ui::install_panic_hook;
use advisor::{headless, util, App, Config, Script};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Scripted Performance Advisor chat demo", long_about = None)]
struct Cli {
    /// Image shown next to the chat (defaults to assets/pa_example.png)
    #[arg(long)]
    pa_image: Option<PathBuf>,

    /// Directory holding the illustration variants
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Play a TOML script instead of the built-in conversation
    #[arg(long)]
    script: Option<PathBuf>,

    /// Skip typing and thinking delays
    #[arg(long)]
    fast: bool,

    /// Wait for a keypress before the first step
    #[arg(long)]
    no_autoplay: bool,

    /// Play the whole script without a terminal UI and print the transcript
    #[arg(long)]
    print: bool,

    /// With --print, append the example Query Analysis Report
    #[arg(long, requires = "print")]
    report: bool,

    /// Data directory for config and logs (defaults to ~/.advisor-demo)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Log to file (~/.advisor-demo/logs/advisor.log)
    fs::create_dir_all(util::logs_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = apply_cli(Config::load(), &cli);
    let script = match &config.script_path {
        Some(path) => Script::from_file(path)
            .with_context(|| format!("Could not load script {}", path.display()))?,
        None => Script::performance_advisor(),
    };

    if cli.print {
        let mut pacing = config.pacing;
        pacing.fast_forward = true;
        for line in headless::transcript(script, pacing, cli.report).await {
            println!("{}", line);
        }
        return Ok(());
    }

    install_panic_hook();
    let mut app = App::new(config, script);
    app.run().await
}

fn apply_cli(mut config: Config, cli: &Cli) -> Config {
    if let Some(path) = &cli.pa_image {
        config = config.with_pa_image(path.clone());
    }
    if let Some(dir) = &cli.assets_dir {
        config = config.with_assets_dir(dir.clone());
    }
    if let Some(path) = &cli.script {
        config = config.with_script_path(path.clone());
    }
    if cli.fast {
        config = config.with_fast_forward();
    }
    if cli.no_autoplay {
        config.autoplay = false;
    }
    config
}
