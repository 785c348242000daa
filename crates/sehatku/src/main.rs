mod cli;
mod config;
mod controller;
mod headless;
mod layers;

use crate::cli::Args;
use crate::config::Config;
use crate::headless::run_headless;
use crate::layers::service::{init_tracing, AdviceService, ServiceEvent};
use crate::layers::ui::{draw_ui, handle_key_event, restore_terminal, setup_terminal, AppState};
use advice_client::{AdviceClient, GeminiClient};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let _file_guard = init_tracing(&args.log_dir, args.log_to_stderr)?;

    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let api_key = config.resolve_api_key(|name| std::env::var(name).ok());
    if api_key.is_none() {
        tracing::warn!(
            env = %config.gemini.api_key_env,
            "no Gemini API key found; every request will fail"
        );
    }
    let gemini = config.gemini_config(api_key, args.model.clone())?;
    let client = GeminiClient::new(gemini).context("failed to build Gemini client")?;
    tracing::info!(
        event = "startup",
        model = %client.model(),
        headless = args.headless_input().is_some(),
    );

    if let Some((height, weight)) = args.headless_input() {
        let report = tokio::select! {
            report = run_headless(&client, &height, &weight) => report,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted before advice arrived");
                return Ok(ExitCode::from(130));
            }
        };
        report.write(args.json, &mut io::stdout().lock(), &mut io::stderr().lock())?;
        return Ok(if report.ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let model = client.model().to_string();
    let has_api_key = client.has_api_key();
    run_tui(Arc::new(client), AppState::new(model, has_api_key))?;
    Ok(ExitCode::SUCCESS)
}

fn run_tui(client: Arc<dyn AdviceClient>, mut app: AppState) -> anyhow::Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel::<ServiceEvent>(16);
    let mut service = AdviceService::new(client, event_tx);

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let result = (|| -> anyhow::Result<()> {
        loop {
            while let Ok(event) = event_rx.try_recv() {
                let request_id = app.handle_event(event);
                service.finish(request_id);
            }

            terminal.draw(|frame| draw_ui(frame, &mut app))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && handle_key_event(key, &mut app, &mut service)
                    {
                        return Ok(());
                    }
                }
            }
        }
    })();

    service.shutdown();
    restore_terminal(&mut terminal)?;
    result
}
