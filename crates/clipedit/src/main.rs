//! clipedit - audio clip editor (command-line host)

use anyhow::Result;
use clap::Parser;
use clipedit::app;
use clipedit::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("clipedit {} starting", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();
    let report = app::execute(cli)?;

    for line in report.lines() {
        println!("{}", line);
    }
    Ok(())
}
