//! raven-pointer - RavenDE pointer input daemon

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use raven_pointer::config;

mod state;

use state::PointerState;

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = config::Config::load()?;
    if let Some(spec) = args.specification {
        config.pointer.specification = spec;
    }

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_filter));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting raven-pointer v{}", env!("CARGO_PKG_VERSION"));

    let mut state = PointerState::new(config)?;

    info!("Entering event loop");
    state.run()?;

    info!("raven-pointer shutting down");
    Ok(())
}

#[derive(Debug)]
struct Args {
    specification: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self {
            specification: args
                .iter()
                .position(|a| a == "--spec" || a == "-s")
                .and_then(|i| args.get(i + 1).cloned()),
        }
    }
}
