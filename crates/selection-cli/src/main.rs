mod cli;
mod host;
mod logger;

use std::io::{self, Read, Write};

use clap::Parser;
use selection_engine::{
    Command, CommandDispatcher, CommandOutcome, HostServices, InMemoryDocument, SyntaxTable,
    TextStatistics,
};

use crate::cli::Cli;
use crate::host::TerminalHost;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let options = cli.resolve_options().inspect_err(|e| {
        tracing::error!("failed to load options: {e}");
    })?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let command = cli.engine_command();
    let mut document = InMemoryDocument::new(input);
    let mut dispatcher =
        CommandDispatcher::new(SyntaxTable::new(), TerminalHost::new(io::stdout()))
            .with_options(options);

    let outcome = dispatcher.execute(command, Some(&mut document))?;
    tracing::debug!(?outcome, "{} finished", command.name());

    match command {
        // An empty input has no selection; report zeros rather than nothing.
        Command::Statistics if outcome == CommandOutcome::Unavailable => {
            dispatcher
                .host_mut()
                .show_statistics(&TextStatistics::default())?;
        }
        Command::Statistics => {}
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.text().as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
