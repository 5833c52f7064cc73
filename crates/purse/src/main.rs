// crates/purse/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine_core::{logging, App, AssetManager, EngineConfig, LoadingMode, PlatformRunner};
use engine_shared::Screen;
use purse_game::{GameConfig, GameScreen};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "purse")]
#[command(about = "Top-down coin collecting arcade game")]
struct Cli {
    /// RON settings file; missing file means defaults
    #[arg(long, default_value = "purse.ron")]
    config: PathBuf,

    /// Asset root directory
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Load assets one per frame instead of before the window opens
    #[arg(long)]
    async_loading: bool,

    /// Log filter, e.g. "info,purse_game=debug"
    #[arg(long)]
    log: Option<String>,

    /// Multi-line human readable log output
    #[arg(long)]
    pretty_logs: bool,
}

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct LauncherConfig {
    engine: EngineConfig,
    game: GameConfig,
}

impl LauncherConfig {
    fn load(cli: &Cli) -> Result<(Self, bool)> {
        if !cli.config.exists() {
            return Ok((Self::default(), false));
        }
        let config = engine_core::config::load_ron(&cli.config)
            .with_context(|| format!("loading settings from {}", cli.config.display()))?;
        Ok((config, true))
    }

    /// Command-line flags win over the file.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.assets {
            self.engine.asset_root = root.clone();
        }
        if cli.async_loading {
            self.engine.loading = LoadingMode::Async;
        }
        if let Some(filter) = &cli.log {
            self.engine.log_filter = filter.clone();
        }
        if cli.pretty_logs {
            self.engine.pretty_logs = true;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut config, from_file) = LauncherConfig::load(&cli)?;
    config.apply_cli(&cli);

    logging::init(&config.engine.log_filter, config.engine.pretty_logs);
    if from_file {
        info!(path = %cli.config.display(), "settings loaded");
    } else {
        info!(path = %cli.config.display(), "no settings file; using defaults");
    }

    let LauncherConfig { engine, game } = config;

    let mut assets = AssetManager::new(engine.asset_root.clone());
    for descriptor in purse_game::required_assets(&game) {
        assets.load(descriptor);
    }
    assets
        .start(engine.loading)
        .with_context(|| format!("loading assets from {}", engine.asset_root.display()))?;

    let runner = PlatformRunner::new(App::new(engine));
    runner.start(assets, move |source| {
        GameScreen::new(game, source).map(|screen| Box::new(screen) as Box<dyn Screen>)
    })?;

    info!("bye");
    Ok(())
}
