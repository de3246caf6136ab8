//! Voxedit - headless voxel editor driven over the remote protocol
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Editor config JSON (default: voxedit.json)
//!   --model <PATH>    Record file loaded at startup
//!   --save <PATH>     Record file written on shutdown
//!   --port <PORT>     Remote server port (overrides config)

use std::path::PathBuf;
use std::sync::Arc;

use voxedit::core::config::EditorConfig;
use voxedit::core::logging;
use voxedit::remote::EditorHandler;
use voxedit::voxel::{Editor, records};
use voxedit_remote::{RemoteServer, SharedHandler};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_path_arg(&args, "--config").unwrap_or_else(|| PathBuf::from("voxedit.json"));
    let model_path = parse_path_arg(&args, "--model");
    let save_path = parse_path_arg(&args, "--save");
    let port = parse_u16_arg(&args, "--port");

    let mut config = match EditorConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            logging::init();
            log::error!("Failed to load config {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };
    logging::init_with_filter(config.log_filter.as_deref().unwrap_or("info"));
    log::info!("Voxedit starting...");

    if let Some(port) = port {
        config.remote.port = port;
    }

    let mut editor = Editor::new(config.clone());
    if let Some(ref path) = model_path {
        match records::load_model(path) {
            Ok(values) => {
                editor.load_model(&values);
            }
            Err(e) => log::error!("Failed to load model {}: {}", path.display(), e),
        }
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    let exported = rt.block_on(async {
        let handler = Arc::new(tokio::sync::Mutex::new(EditorHandler::new(editor)));

        let server = if config.remote.enabled {
            let shared: SharedHandler = handler.clone();
            match RemoteServer::bind(&config.remote, shared).await {
                Ok(server) => Some(server),
                Err(e) => {
                    log::error!("Failed to start remote server on {}: {}", config.remote.addr(), e);
                    return None;
                }
            }
        } else {
            log::info!("Remote server disabled");
            None
        };

        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
        log::info!("Shutting down");

        if let Some(server) = server {
            server.shutdown();
        }
        let handler = handler.lock().await;
        Some(handler.editor().export())
    });

    let Some(exported) = exported else {
        std::process::exit(1);
    };

    if let Some(ref path) = save_path {
        match records::save_model(path, &exported) {
            Ok(()) => log::info!("Saved {} voxels to {}", exported.len(), path.display()),
            Err(e) => log::error!("Failed to save model {}: {}", path.display(), e),
        }
    }
}

fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn parse_u16_arg(args: &[String], flag: &str) -> Option<u16> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}
