//! `paddock-console` -- terminal management console for MCAP recording
//! logs.
//!
//! Talks to the Paddock backend over HTTP: upload recordings, browse and
//! edit their metadata, preview spatial tracks, download originals. All
//! state lives in a single view-state store owned by the synchronization
//! controller; this binary only wires configuration, the REPL loop, and
//! the renderer together.
//!
//! # Environment variables
//!
//! | Variable       | Required | Default                 | Description              |
//! |----------------|----------|-------------------------|--------------------------|
//! | `API_BASE_URL` | no       | `http://127.0.0.1:8000` | Backend base URL         |
//! | `DOWNLOAD_DIR` | no       | `.`                     | Where downloads are saved |

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paddock_client::api::LogApi;
use paddock_console::command::{self, Command};
use paddock_console::config::ConsoleConfig;
use paddock_console::controller::Controller;
use paddock_console::render::render;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paddock_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::from_env();
    tracing::info!(api = %config.api_base_url, "Starting paddock-console");

    let mut controller = Controller::new(LogApi::new(config.api_base_url.clone()));
    controller.init().await;
    print!("{}", render(controller.state(), controller.lookups()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            prompt();
            continue;
        }

        match command::parse(line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", command::HELP),
            Ok(cmd) => {
                dispatch(&mut controller, cmd, &config).await;
                print!("{}", render(controller.state(), controller.lookups()));
            }
            Err(message) => println!("{message}"),
        }
        prompt();
    }
}

/// Route one parsed command into the controller.
async fn dispatch(controller: &mut Controller, cmd: Command, config: &ConsoleConfig) {
    match cmd {
        Command::Refresh => controller.refresh().await,
        Command::Search(query) => controller.set_query(query),
        Command::Upload(path) => controller.upload(&path).await,
        Command::View(id) => controller.open_view(id).await,
        Command::Edit(id) => controller.open_edit(id).await,
        Command::Set { field, value } => controller.set_draft_field(field, value),
        Command::Save(mode) => controller.save(mode).await,
        Command::Delete(id) => controller.request_delete(id),
        Command::Confirm => controller.confirm_delete().await,
        Command::Map(id) => controller.open_map(id).await,
        Command::Download { id, dir } => {
            let dir = dir.unwrap_or_else(|| config.download_dir.clone());
            if let Some(path) = controller.download(id, &dir).await {
                println!("Saved {}", path.display());
            }
        }
        Command::Summary => controller.fetch_summary().await,
        Command::Close => controller.close_modal(),
        // Handled by the caller.
        Command::Help | Command::Quit => {}
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
