use anyhow::Context;
use rust_sql_tour::{run, TourConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = TourConfig::default();
    config.logging.init();
    info!("sql tour starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out).context("sql tour failed")?;

    info!("sql tour finished");
    Ok(())
}
