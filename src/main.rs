use std::sync::Arc;

use clap::Parser;
use mvc_basic::config::{AppState, Config, DEFAULT_CONFIG_PATH};
use mvc_basic::logger;
use mvc_basic::server::{create_reusable_listener, shutdown_signal, start_server_loop};

#[derive(Parser)]
#[command(name = "mvc-basic")]
#[command(about = "Request mapping demo server")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "MVC_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = Config::load_from(&args.config)?;
    logger::init(&cfg)?;

    // Create the Tokio runtime, with the configured worker count if any
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    let state = Arc::new(AppState::new(cfg));
    logger::log_routes(state.dispatcher.routes());

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(start_server_loop(listener, state, shutdown_signal()))
        .await;
    Ok(())
}
