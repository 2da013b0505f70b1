use std::io::Write;
use std::path::Path;

use selection_engine::{HostError, HostServices, LanguageId, TextStatistics};

/// Host services for a terminal: statistics go to the writer, everything else is refused.
pub struct TerminalHost<W> {
    out: W,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn unsupported(what: &str) -> HostError {
    format!("{what} is not supported by selcmd").into()
}

impl<W: Write> HostServices for TerminalHost<W> {
    fn show_statistics(&mut self, stats: &TextStatistics) -> Result<(), HostError> {
        writeln!(self.out, "lines:                    {}", stats.lines)?;
        writeln!(self.out, "blank lines:              {}", stats.blank_lines)?;
        writeln!(self.out, "words:                    {}", stats.words)?;
        writeln!(self.out, "characters:               {}", stats.characters)?;
        writeln!(
            self.out,
            "non-whitespace characters: {}",
            stats.non_whitespace_characters
        )?;
        Ok(())
    }

    fn execute_text(&mut self, _: &str, _: Option<&LanguageId>) -> Result<(), HostError> {
        Err(unsupported("executing text"))
    }

    fn execute_file(&mut self, _: &Path) -> Result<(), HostError> {
        Err(unsupported("executing files"))
    }

    fn set_regions_collapsed(&mut self, _: bool) -> Result<(), HostError> {
        Err(unsupported("region folding"))
    }
}
