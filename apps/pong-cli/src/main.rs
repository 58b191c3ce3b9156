use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde_json::{json, Value};
use tracing::debug;

const DEFAULT_NODES: [&str; 2] = ["http://localhost:8000", "http://localhost:8001"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameCommand {
    Start,
    Pause,
    Resume,
    Stop,
    /// Query state without changing it
    Status,
}

impl GameCommand {
    fn wire_name(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::Stop => "stop",
            GameCommand::Status => "status",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pong-cli")]
#[command(about = "Control the ping-pong game on both nodes")]
struct Args {
    /// Game command
    #[arg(value_enum)]
    command: GameCommand,

    /// Delay between pings in milliseconds (only used with start)
    pong_time_ms: Option<u64>,

    /// Node base URL; repeat for each node (defaults to localhost:8000 and :8001)
    #[arg(long = "node")]
    nodes: Vec<String>,
}

impl Args {
    fn nodes(&self) -> Vec<String> {
        if self.nodes.is_empty() {
            DEFAULT_NODES.iter().map(|s| s.to_string()).collect()
        } else {
            self.nodes
                .iter()
                .map(|s| s.trim_end_matches('/').to_string())
                .collect()
        }
    }
}

/// Control body for one node; the interval is only sent with `start`.
fn control_body(command: GameCommand, pong_time_ms: Option<u64>) -> Value {
    match (command, pong_time_ms) {
        (GameCommand::Start, Some(ms)) => json!({ "command": "start", "pong_time_ms": ms }),
        (command, _) => json!({ "command": command.wire_name() }),
    }
}

/// Endpoint a command is sent to on one node.
fn endpoint(node: &str, command: GameCommand) -> String {
    match command {
        GameCommand::Status => format!("{node}/state"),
        _ => format!("{node}/control"),
    }
}

async fn send(client: &reqwest::Client, url: &str, args: &Args) -> Result<Value, reqwest::Error> {
    let request = match args.command {
        GameCommand::Status => client.get(url),
        command => client
            .post(url)
            .json(&control_body(command, args.pong_time_ms)),
    };
    debug!(url, command = args.command.wire_name(), "Sending command");
    request.send().await?.json().await
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let client = reqwest::Client::new();

    let mut failures = 0;
    for node in args.nodes() {
        let url = endpoint(&node, args.command);
        match send(&client, &url, &args).await {
            Ok(body) => println!("Response from {url}: {body}"),
            Err(e) => {
                println!("Error contacting {url}: {e}");
                failures += 1;
            }
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
