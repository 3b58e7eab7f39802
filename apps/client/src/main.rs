//! Terminal client for the "guess the top comment" game.

use std::io;
use std::sync::Arc;

use clap::Parser;
use comment_guesser::config::api::{normalize_base_url, parse_timeout_ms};
use comment_guesser::config::parse_video_seconds;
use comment_guesser::telemetry::init_tracing;
use comment_guesser::ui::terminal::{render, render_help, Completion, Reaction, Session};
use comment_guesser::ui::parse_command;
use comment_guesser::{ClientConfig, GameApi, GuessMode, HttpGameApi, RoundController};
use futures::future::{BoxFuture, OptionFuture};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "comment-guesser")]
#[command(about = "Guess which comment on a short video got the most likes")]
struct Args {
    /// Backend base URL (overrides COMMENT_GUESSER_API_BASE_URL)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Backend contract: top-pick or ranking (overrides COMMENT_GUESSER_MODE)
    #[arg(long)]
    mode: Option<GuessMode>,

    /// Assumed video length in seconds, used for the time bonus
    #[arg(long)]
    video_seconds: Option<String>,

    /// HTTP request timeout in milliseconds
    #[arg(long)]
    http_timeout_ms: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve(&self) -> Result<ClientConfig, Box<dyn std::error::Error>> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.api_base_url {
            config.api.base_url = normalize_base_url(url)?;
        }
        if let Some(mode) = self.mode {
            config.api.mode = mode;
        }
        if let Some(raw) = &self.http_timeout_ms {
            config.api.timeout = parse_timeout_ms("--http-timeout-ms", raw)?;
        }
        if let Some(raw) = &self.video_seconds {
            config.video_seconds = Some(parse_video_seconds("--video-seconds", raw)?);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.resolve()?;
    info!(
        base_url = %config.api.base_url,
        mode = config.api.mode.as_str(),
        video_seconds = ?config.video_seconds,
        "Starting comment guesser"
    );

    let api: Arc<dyn GameApi> = Arc::new(HttpGameApi::new(&config.api)?);
    let controller = RoundController::new(api, config.api.mode);
    let mut session = Session::new(controller, config.video_seconds);

    run(&mut session).await?;
    session.shutdown();
    info!("Bye");
    Ok(())
}

async fn run(session: &mut Session) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<BoxFuture<'static, Completion>> =
        session.start().map(|work| work.into_future());

    render_help(&mut stdout)?;
    render(&mut stdout, &session.view())?;

    loop {
        tokio::select! {
            Some(completion) = OptionFuture::from(pending.as_mut()), if pending.is_some() => {
                pending = None;
                session.complete(completion);
                render(&mut stdout, &session.view())?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        warn!(error = %err, "Ignoring input");
                        println!("{err}");
                        continue;
                    }
                };
                match session.handle(command) {
                    Reaction::Render => render(&mut stdout, &session.view())?,
                    Reaction::Start(work) => {
                        pending = Some(work.into_future());
                        render(&mut stdout, &session.view())?;
                    }
                    Reaction::Notice(message) => println!("{message}"),
                    Reaction::Help => render_help(&mut stdout)?,
                    Reaction::Quit => break,
                }
            }
        }
    }
    Ok(())
}
