//! CLI entry point for sysglance.

mod cli;

use clap::Parser;
use cli::{CheckTarget, Command, CopyCard, TaskCommand};
use std::sync::Arc;
use sysglance::board::{QueryOutcome, SensitiveField, StatusBoard};
use sysglance::build_info::cli_version_text;
use sysglance::config::{load_config, Config, ConfigSource, DEFAULT_CONFIG_TEMPLATE};
use sysglance::host::{NativeHostChannel, StatusQuery};
use sysglance::present::{battery_view, check_view};
use sysglance::render::Renderer;
use sysglance::storage::JsonFileStore;
use sysglance::tasks::{task_placeholder, TaskList, EMPTY_LIST_HINT};
use sysglance::types::StatusQueryKind;

#[tokio::main]
async fn main() {
    init_tracing();
    let args = cli::Args::parse();

    if args.version {
        println!("{}", cli_version_text());
        return;
    }

    let loaded = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let mut config = loaded.config;
    if args.no_color {
        config.display.color = false;
    }

    let renderer = Renderer::new(config.display.color);
    let command = args.command.unwrap_or(Command::Status);
    if let Err(msg) = run(command, &config, &loaded.source, renderer).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(
    command: Command,
    config: &Config,
    source: &ConfigSource,
    renderer: Renderer,
) -> Result<(), String> {
    match command {
        Command::Status => {
            let mut board = open_board(config);
            board.refresh_all(StatusQuery::startup_set()).await;
            render_battery(renderer, &board);
            render_device(renderer, &board);
            render_wifi(renderer, &board);
            ensure_host_reached(&board, config)
        }
        Command::Battery => {
            let mut board = open_board(config);
            board.refresh(StatusQuery::Battery).await;
            render_battery(renderer, &board);
            ensure_host_reached(&board, config)
        }
        Command::Wifi { reveal } => {
            let mut board = open_board(config);
            board.refresh(StatusQuery::WifiCredential).await;
            if reveal {
                board.toggle(SensitiveField::WifiPassword);
            }
            render_wifi(renderer, &board);
            ensure_host_reached(&board, config)
        }
        Command::Device { reveal } => {
            let mut board = open_board(config);
            board.refresh(StatusQuery::DeviceIdentity).await;
            if reveal {
                board.toggle(SensitiveField::Hostname);
                board.toggle(SensitiveField::IpAddress);
            }
            render_device(renderer, &board);
            ensure_host_reached(&board, config)
        }
        Command::Check { target } => {
            let queries = check_queries(target)?;
            let mut board = open_board(config);
            board.refresh_all(queries.clone()).await;
            renderer.section("Network checks");
            for query in &queries {
                if let Some(outcome) = board.outcome(query.kind()) {
                    render_check(renderer, outcome);
                }
            }
            ensure_host_reached(&board, config)
        }
        Command::Copy { card } => {
            let mut board = open_board(config);
            let text = match card {
                CopyCard::Wifi => {
                    board.refresh(StatusQuery::WifiCredential).await;
                    board.wifi_copy_text()
                }
                CopyCard::Device => {
                    board.refresh(StatusQuery::DeviceIdentity).await;
                    board.device_copy_text()
                }
            };
            println!("{text}");
            ensure_host_reached(&board, config)
        }
        Command::Tasks { action } => run_tasks(action.unwrap_or(TaskCommand::List), config, renderer),
        Command::Config { template } => {
            if template {
                print!("{DEFAULT_CONFIG_TEMPLATE}");
            } else {
                renderer.section("Configuration");
                renderer.field("Source", &source.to_string());
                let host = std::iter::once(config.host.command.as_str())
                    .chain(config.host.args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ");
                renderer.field("Host", &host);
                renderer.field("Storage", &config.storage.path.display().to_string());
                renderer.field("Color", if config.display.color { "on" } else { "off" });
            }
            Ok(())
        }
    }
}

fn open_board(config: &Config) -> StatusBoard {
    let channel = NativeHostChannel::new(&config.host.command, config.host.args.clone());
    StatusBoard::new(Arc::new(channel))
}

/// Fail the command when any query could not reach the host.
fn ensure_host_reached(board: &StatusBoard, config: &Config) -> Result<(), String> {
    let failed = StatusQueryKind::ALL.iter().find_map(|kind| match board.outcome(*kind) {
        Some(QueryOutcome::ChannelFailed { error, .. }) => Some(error.clone()),
        _ => None,
    });
    match failed {
        Some(error) => Err(format!(
            "failed to contact native host `{}`: {error}",
            config.host.command
        )),
        None => Ok(()),
    }
}

fn check_queries(target: CheckTarget) -> Result<Vec<StatusQuery>, String> {
    Ok(match target {
        CheckTarget::Internet => vec![StatusQuery::InternetReachability],
        CheckTarget::Dns => vec![StatusQuery::DnsResolution { domain: None }],
        CheckTarget::DnsDomain { domain } => {
            vec![StatusQuery::dns_domain(&domain).map_err(|e| e.to_string())?]
        }
        CheckTarget::Gateway => vec![StatusQuery::GatewayReachability],
        CheckTarget::PublicIp => vec![StatusQuery::PublicAddress],
        CheckTarget::All => vec![
            StatusQuery::InternetReachability,
            StatusQuery::DnsResolution { domain: None },
            StatusQuery::GatewayReachability,
            StatusQuery::PublicAddress,
        ],
    })
}

fn render_battery(renderer: Renderer, board: &StatusBoard) {
    let Some(outcome) = board.outcome(StatusQueryKind::Battery) else {
        return;
    };
    let view = battery_view(outcome);
    renderer.section(StatusQueryKind::Battery.label());
    renderer.field("Level", &view.percent_text);
    renderer.gauge(view.fill_percent, view.level);
    renderer.status_field("Status", &view.status);
}

fn render_device(renderer: Renderer, board: &StatusBoard) {
    renderer.section(StatusQueryKind::DeviceIdentity.label());
    renderer.field("Hostname", &board.field_display(SensitiveField::Hostname));
    renderer.field("IP Address", &board.field_display(SensitiveField::IpAddress));
}

fn render_wifi(renderer: Renderer, board: &StatusBoard) {
    renderer.section(StatusQueryKind::WifiCredential.label());
    renderer.field("Network", &board.ssid_display());
    renderer.field("Password", &board.field_display(SensitiveField::WifiPassword));
}

fn render_check(renderer: Renderer, outcome: &QueryOutcome) {
    let view = check_view(outcome);
    renderer.status_field(outcome.kind().label(), &view.line);
    if let Some(detail) = &view.detail {
        renderer.detail(detail);
    }
}

fn run_tasks(action: TaskCommand, config: &Config, renderer: Renderer) -> Result<(), String> {
    let mut list = TaskList::open(JsonFileStore::new(&config.storage.path));
    match action {
        TaskCommand::List => {}
        TaskCommand::Add { text } => {
            let index = list.add().map_err(|e| e.to_string())?;
            if let Some(text) = text {
                list.update_text(index, text).map_err(|e| e.to_string())?;
            }
        }
        TaskCommand::Edit { index, text } => {
            list.update_text(task_index(index), text)
                .map_err(|e| e.to_string())?;
        }
        TaskCommand::Done { index } => {
            list.set_done(task_index(index), true)
                .map_err(|e| e.to_string())?;
        }
        TaskCommand::Undo { index } => {
            list.set_done(task_index(index), false)
                .map_err(|e| e.to_string())?;
        }
        TaskCommand::Remove { index } => {
            list.remove(task_index(index)).map_err(|e| e.to_string())?;
        }
    }

    renderer.section("Tasks");
    if list.is_empty() {
        renderer.hint(EMPTY_LIST_HINT);
    }
    for (i, task) in list.tasks().iter().enumerate() {
        let text = if task.text.is_empty() {
            task_placeholder(i)
        } else {
            task.text.clone()
        };
        renderer.task(i + 1, &text, task.done);
    }
    Ok(())
}

/// Convert a 1-based CLI index (clap guarantees `>= 1`) to a list index.
fn task_index(number: u64) -> usize {
    usize::try_from(number.saturating_sub(1)).unwrap_or(usize::MAX)
}
