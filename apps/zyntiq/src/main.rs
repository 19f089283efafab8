//! zyntiq - member credential verification
//!
//! Command line front-end for the verification portal: one-shot lookups,
//! an interactive session, and a member count.

mod cli;
mod display;
mod error;
mod events;
mod interactive;
mod logging;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::{OutputRenderer, TerminalView};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use std::process;
use tokio::select;
use tracing::{error, info};
use zyntiq_config::Config;
use zyntiq_events::{EventEmitter, EventReceiver, EventSender};
use zyntiq_net::{DatasetSource, HttpDatasetSource, NetClient, NetConfig};
use zyntiq_portal::{Portal, PresentationState};
use zyntiq_render::HtmlView;
use zyntiq_types::{OutputFormat, SearchMode};

/// Verified record found
const EXIT_OK: i32 = 0;
/// Search ran, nothing matched
const EXIT_NOT_FOUND: i32 = 1;
/// Connection, configuration or usage failure
const EXIT_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    match run(cli).await {
        Ok(EXIT_OK) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            if !json_mode {
                eprintln!("Error: {e}");
            }
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Everything a command needs
struct CommandContext {
    config: Config,
    source: HttpDatasetSource,
    renderer: OutputRenderer,
    tx: EventSender,
}

/// Main application logic; returns the process exit code
async fn run(cli: Cli) -> Result<i32, CliError> {
    info!("Starting zyntiq v{}", env!("CARGO_PKG_VERSION"));

    // 1. File config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    // 2. Environment variables
    config.merge_env()?;
    // 3. CLI flags
    apply_cli_config(&mut config, &cli.global);

    let (event_sender, event_receiver) = zyntiq_events::channel();

    let colors_enabled = display::colors_enabled(config.general.color);
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug);
    if cli.global.json {
        event_handler = event_handler.quiet();
    }

    let client = NetClient::new(NetConfig::from(&config))?;
    let source = HttpDatasetSource::new(client, &config.network.endpoint)?
        .with_event_sender(event_sender.clone());
    info!(endpoint = %source.endpoint(), "Using member data endpoint");

    let format = output_format(&config, &cli);
    let ctx = CommandContext {
        renderer: OutputRenderer::new(format, colors_enabled),
        config,
        source,
        tx: event_sender,
    };

    let code =
        execute_command_with_events(cli.command, ctx, event_receiver, &mut event_handler).await?;

    info!(code, "Command completed");
    Ok(code)
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    ctx: CommandContext,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<i32, CliError> {
    let mut command_future = Box::pin(execute_command(command, ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            Some(event) = event_receiver.recv() => {
                event_handler.handle_event(event);
            }
        }
    }
}

/// Execute the specified command, bracketed by operation events
async fn execute_command(command: Commands, ctx: CommandContext) -> Result<i32, CliError> {
    let tx = ctx.tx.clone();
    let operation = command.name();
    tx.emit_operation_started(operation);
    let result = dispatch(command, ctx).await;
    tx.emit_operation_completed(operation, result.is_ok());
    result
}

async fn dispatch(command: Commands, ctx: CommandContext) -> Result<i32, CliError> {
    match command {
        Commands::Verify { query, name, .. } => {
            let mode = if name { SearchMode::Name } else { SearchMode::Uid };
            verify(ctx, mode, query).await
        }

        Commands::Interactive => {
            let view = TerminalView::new(ctx.renderer.interactive());
            let mut portal = Portal::new(ctx.source, view, ctx.config.portal.clone())
                .with_event_sender(ctx.tx);
            interactive::run_session(&mut portal).await?;
            Ok(EXIT_OK)
        }

        Commands::Count => {
            let dataset = ctx.source.fetch().await?;
            ctx.renderer.render_count(dataset.len())?;
            Ok(EXIT_OK)
        }
    }
}

/// One-shot search through the portal controller
async fn verify(ctx: CommandContext, mode: SearchMode, query: String) -> Result<i32, CliError> {
    let mut portal = Portal::new(ctx.source, HtmlView::new(), ctx.config.portal.clone())
        .with_event_sender(ctx.tx);
    if mode != portal.state().mode() {
        portal.switch_mode(mode);
    }
    portal.set_query_text(query);

    let code = match portal.submit().await {
        PresentationState::Results { .. } => EXIT_OK,
        PresentationState::NotFound { .. } => EXIT_NOT_FOUND,
        PresentationState::Error { .. } => EXIT_FAILURE,
        PresentationState::Idle | PresentationState::Loading { .. } => {
            return Err(CliError::InvalidArguments(format!(
                "{} must not be empty",
                mode.noun()
            )));
        }
    };

    if ctx.renderer.format() == OutputFormat::Html {
        print!("{}", portal.view().fragment());
    } else {
        ctx.renderer.render_state(portal.presentation())?;
    }
    Ok(code)
}

/// Pick the output format: `--json` and `--html` beat the configured default
fn output_format(config: &Config, cli: &Cli) -> OutputFormat {
    if cli.global.json {
        return OutputFormat::Json;
    }
    if let Commands::Verify { html: true, .. } = cli.command {
        return OutputFormat::Html;
    }
    config.general.default_output
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(endpoint) = &global.endpoint {
        config.network.endpoint.clone_from(endpoint);
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = Config::logs_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "zyntiq-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,zyntiq=debug"),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // JSON mode: keep stdout and stderr clean
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode (or debug fallback): stderr
        let default_filter = if debug_enabled {
            "info,zyntiq=info"
        } else {
            "warn,zyntiq=warn"
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .init();
    }
}
