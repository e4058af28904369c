use clap::Parser;
use anyhow::{Context, Result};
use std::io;

use foldermon::{
    cli::Cli,
    config::MonitorConfig,
    Command, FolderMonitor, Shell,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    cli.setup_logging();

    let mut config = MonitorConfig::load_or_default(cli.config.as_deref())?;
    config.apply_env();
    cli.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    let root = config.monitor.root.clone();
    tracing::info!("Starting foldermon on: {}", root.display());

    let monitor = FolderMonitor::new(&root)
        .with_context(|| format!("Cannot monitor {}", root.display()))?;

    if cli.commands.is_empty() {
        run_interactive(monitor, &cli, config)
    } else {
        run_commands(monitor, &cli, config)
    }
}

fn run_interactive(monitor: FolderMonitor, cli: &Cli, config: MonitorConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut shell = Shell::new(monitor, stdin.lock(), io::stdout(), config.output, cli.output);
    shell.run()?;
    Ok(())
}

fn run_commands(monitor: FolderMonitor, cli: &Cli, config: MonitorConfig) -> Result<()> {
    let mut shell = Shell::new(monitor, io::empty(), io::stdout(), config.output, cli.output);

    for line in &cli.commands {
        if !shell.execute(&Command::parse(line))? {
            break;
        }
    }

    Ok(())
}
