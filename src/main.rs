mod args;

use args::Args;
use screen_sweeper::screen::{DesktopCapture, DesktopPointer};
use screen_sweeper::sweeper::match_image::TemplateSet;
use screen_sweeper::{Sweeper, SweeperConfig, SweeperResult};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let Some(args) = Args::parse() else {
        return ExitCode::SUCCESS;
    };

    let default_level = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> SweeperResult<()> {
    let config = match &args.config_path {
        Some(path) => {
            log::info!("📄 Loading config from {:?}", path);
            SweeperConfig::from_json_file(path)?
        }
        None => SweeperConfig::default(),
    };

    // Any unreadable asset aborts here, before a single worker exists
    let templates = TemplateSet::load(&config.templates)?;

    let sweeper = Sweeper::new(
        config,
        templates,
        Arc::new(DesktopCapture::new()),
        Arc::new(DesktopPointer::new()),
    )?;
    let running = sweeper.spawn();

    println!("Press Enter to stop...");
    wait_for_stop_request(args.timeout_secs.map(Duration::from_secs)).await;

    log::info!("🛑 Stopping workers...");
    let mut first_error = None;
    for report in running.shutdown().await {
        match report {
            Ok(report) => log::info!("📊 {}", report),
            Err(e) => {
                log::error!("❌ Worker failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Resolve on the first of: a line on stdin, Ctrl-C, or the optional timeout.
async fn wait_for_stop_request(timeout: Option<Duration>) {
    // A dedicated thread keeps the blocking read from holding up runtime shutdown
    let (line_tx, line_rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = line_tx.send(std::io::stdin().read_line(&mut line));
    });

    let deadline = async {
        match timeout {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        line = line_rx => {
            if let Ok(Err(e)) = line {
                log::warn!("⚠️ Console input failed ({}), stopping", e);
            }
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                log::warn!("⚠️ Ctrl-C handler failed ({}), stopping", e);
            } else {
                log::info!("Ctrl-C received");
            }
        }
        _ = deadline => log::info!("⏱️ Timeout reached"),
    }
}
