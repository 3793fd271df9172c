mod commands;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use fleet_core::config::{DEFAULT_REQUEST_TIMEOUT, FetchConfig, REFRESH_INTERVAL};
use fleet_core::fetch::UpstreamClient;
use fleet_core::logging::setup_logging;
use fleet_core::present::Screen;
use fleet_core::refresh::{RefreshHandle, RefreshScheduler};
use fleet_core::view::ViewStateMachine;

use crate::commands::{Command, HELP};

#[derive(Parser, Debug)]
#[command(name = "fleet-dashboard", version, about = "Terminal fleet dashboard")]
struct Args {
    /// Transportation endpoint, usually served by fleet-server
    #[arg(
        short,
        long,
        env = "FLEET_PROXY_URL",
        default_value = "http://127.0.0.1:3000/api/transportation"
    )]
    proxy_url: String,

    /// Seconds between scheduled refreshes
    #[arg(short, long, env = "FLEET_REFRESH_SECS", default_value_t = REFRESH_INTERVAL.as_secs())]
    interval_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    eyre::ensure!(args.interval_secs > 0, "--interval-secs must be positive");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(args));
    // A pending stdin read would otherwise hold the runtime open.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(args: Args) -> eyre::Result<()> {
    let config = FetchConfig::new(args.proxy_url).with_timeout(Some(DEFAULT_REQUEST_TIMEOUT));
    let client = UpstreamClient::new(&config)?;
    info!(url = client.url(), "starting dashboard");

    let machine = Arc::new(ViewStateMachine::new());
    let mut views = machine.subscribe();
    let handle = RefreshScheduler::new(client)
        .with_interval(Duration::from_secs(args.interval_secs))
        .start(Arc::clone(&machine));

    draw(&machine);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                views.borrow_and_update();
                draw(&machine);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(command, &machine, &handle),
                    Err(e) => eprintln!("{e}"),
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    handle.stopped().await;
    info!("dashboard stopped");
    Ok(())
}

fn apply(command: Command, machine: &ViewStateMachine, handle: &RefreshHandle) {
    debug!(?command, "command");
    match command {
        Command::Select(id) => machine.select(id),
        Command::Row(index) => {
            let screen = Screen::new(&machine.view());
            let clicked = screen
                .dashboard()
                .and_then(|dashboard| dashboard.list.click(index, machine));
            if clicked.is_none() {
                eprintln!("no row {}", index + 1);
            }
        }
        Command::Retry => handle.refresh_now(),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn draw(machine: &ViewStateMachine) {
    print!("{}", render::render(&Screen::new(&machine.view())));
}
