// DRAM roster assistant entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load settings (copying defaults on first run)
// 3. Autoload the roster, or start a fresh one
// 4. Run the interactive command loop (saves on quit)

use std::path::Path;

use dram::app;
use dram::config;
use dram::roster::store::Roster;

use anyhow::Context;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("DRAM roster assistant starting up");

    // 2. Load settings
    let settings = config::load_settings().context("failed to load settings")?;
    info!(
        "Settings loaded: roster_path={}, default_tempo={}, default_rating={}",
        settings.roster_path, settings.default_tempo, settings.default_rating
    );

    // 3. Autoload the roster, or start a fresh one
    let roster_path = Path::new(&settings.roster_path);
    let roster = if roster_path.exists() {
        let roster = Roster::load_from(roster_path)
            .with_context(|| format!("failed to load roster from {}", settings.roster_path))?;
        info!(
            "Loaded {} players from {} (tempo: {})",
            roster.len(),
            settings.roster_path,
            roster.team_tempo
        );
        roster
    } else {
        warn!(
            "No roster at {}; starting fresh with {} tempo",
            settings.roster_path, settings.default_tempo
        );
        Roster::new(settings.default_tempo)
    };

    // 4. Run the interactive command loop
    let mut app = app::App::new(settings, roster);
    app::run(&mut app)?;

    info!("DRAM roster assistant shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the prompt loop).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("dram.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dram=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
