//! UniLife console assistant - main entry point.

use anyhow::Context;
use llm_client::LlmClient;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use unilife::commands::{self, *};
use unilife::config::Config;
use unilife::error::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.app.log_level);

    info!("Starting UniLife...");

    let client = Arc::new(
        LlmClient::new(
            &config.llm.api_key,
            &config.llm.base_url,
            &config.llm.model,
            config.llm.timeout,
        )
        .context("Failed to create model client")?,
    );

    if client.health_check().await {
        info!("Model endpoint healthy - Model: {}", config.llm.model);
    } else {
        warn!("Model endpoint health check failed - will retry on requests");
    }

    let session = Arc::new(
        unilife::build_session(&config, client.clone())
            .await
            .context("Failed to set up chat session")?,
    );
    info!(
        "Data store ready at {} (max_history={})",
        config.data.path.display(),
        config.data.max_history
    );

    let handlers: Vec<Box<dyn CommandHandler>> = vec![
        Box::new(ChatHandler::new(session.clone())),
        Box::new(ClearHandler::new(session.clone())),
        Box::new(WaterHandler::new(session.data().clone())),
        Box::new(ExerciseHandler::new(session.data().clone())),
        Box::new(MoodHandler::new(session.data().clone())),
        Box::new(PackHandler::new(session.data().clone())),
        Box::new(HelpHandler::new()),
        Box::new(ModelsHandler::new(client.clone())),
    ];
    info!("Registered {} command handlers", handlers.len());

    if session.saved_messages().await.is_empty() {
        println!("{}\n", session.welcome().await);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                match commands::find(&handlers, input) {
                    Some(handler) => match handler.execute(input).await {
                        Ok(response) => println!("\n{}\n", response),
                        Err(e) => {
                            error!("Handler error: {}", e);
                            println!("\nSorry, something went wrong.\n");
                        }
                    },
                    None => println!("\nUnknown command. Type !help for the list.\n"),
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn print_prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
