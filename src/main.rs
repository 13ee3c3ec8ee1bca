use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use parley::core::config::{self, ParleyConfig};
use parley::core::conversation::send_message;
use parley::core::state::App;
use parley::inference::{Role, build_provider};

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat client for OpenAI-compatible models")]
struct Args {
    /// Model id, overriding PARLEY_MODEL and the config file
    #[arg(short, long)]
    model: Option<String>,

    /// Send one message, print the reply and exit instead of starting the UI
    #[arg(short, long)]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Log to a file so output never lands on the terminal UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Falling back to default config: {}", e);
        ParleyConfig::default()
    });
    let resolved = config::resolve(&file_config, args.model.as_deref());
    info!(
        "Parley starting up (model={}, base_url={}, key configured={})",
        resolved.model_name,
        resolved.openai_base_url,
        resolved.openai_api_key.is_some()
    );

    let client = match build_provider(
        resolved.openai_api_key.clone(),
        resolved.openai_base_url.clone(),
    ) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Completion client unavailable: {}", e);
            None
        }
    };
    let mut app = App::from_config(client, &resolved);

    match args.prompt {
        Some(prompt) => Ok(run_once(&mut app, prompt).await),
        None => {
            parley::tui::run(app)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One round trip without the UI. The reply goes to stdout, a notice to stderr.
async fn run_once(app: &mut App, prompt: String) -> ExitCode {
    let before = app.transcript.len();
    send_message(app, prompt).await;

    if let Some(notice) = &app.notice {
        eprintln!("{}: {}", notice.title, notice.description);
        return ExitCode::FAILURE;
    }

    match app.transcript.last() {
        Some(reply) if app.transcript.len() > before && reply.role() == Role::Assistant => {
            println!("{}", reply.content());
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Nothing to send.");
            ExitCode::FAILURE
        }
    }
}
