use follina_inspect::{Classification, ScanResult};
use follina_scan::{ScanEvent, Summary};
use std::io::{Result as IoResult, Write};
use std::path::PathBuf;
use yansi::Color::{Green, Red, Yellow};
use yansi::{Condition, Paint};

/// Renders scan events as the scanner's line-oriented report.
pub struct Printer<W: Write> {
    out: W,
    verbose: bool,
    colors: Condition,
}
impl<W: Write> Printer<W> {
    pub fn new(out: W, verbose: bool, colors: bool) -> Self {
        Self {
            out,
            verbose,
            colors: if colors { Condition::ALWAYS } else { Condition::NEVER },
        }
    }

    pub fn event(&mut self, event: &ScanEvent) -> IoResult<()> {
        match event {
            ScanEvent::Started => Ok(()),
            ScanEvent::AccessError { path, message } => writeln!(self.out, "[{}] {message}", path.display()),
            ScanEvent::SkippedDirectory(path) => {
                writeln!(self.out, "[{}] Is a directory: {}", path.display(), path.display())
            },
            ScanEvent::Duplicate(path) if self.verbose => {
                writeln!(self.out, "[{}] Already scanned, skipping", path.display())
            },
            ScanEvent::Duplicate(_) => Ok(()),
            ScanEvent::Inspected(result) => self.result(result),
            ScanEvent::Complete(summary) => self.summary(summary),
        }
    }

    fn result(&mut self, result: &ScanResult) -> IoResult<()> {
        let path = result.path.display();
        if !result.classification.is_document() {
            if self.verbose
                && let Some(message) = &result.message
            {
                writeln!(self.out, "[{path}] {message}")?;
            }
            return Ok(());
        }
        writeln!(self.out, "[{path}] Scanning file as zip...")?;
        let (Some(manifest), Some(url)) = (&result.manifest, &result.url) else {
            if self.verbose
                && let Some(message) = &result.message
            {
                writeln!(self.out, "[{path}] {message}")?;
            }
            return Ok(());
        };
        writeln!(self.out, "[{path}] Found URL in {manifest}: \"{url}\"")?;
        match result.classification {
            Classification::Suspicious => {
                let message = result.message.as_deref().unwrap_or("request failed");
                let line = format!("[{path}] {message}");
                writeln!(self.out, "{}", line.paint(Yellow).whenever(self.colors))
            },
            Classification::Infected => {
                let line = format!("[{path}] Found Follina exploit in {path} ({url})");
                let separator = "=".repeat(line.chars().count());
                for text in [&separator, &line, &separator] {
                    writeln!(self.out, "{}", text.paint(Red).bold().whenever(self.colors))?;
                }
                Ok(())
            },
            Classification::Valid | Classification::NotApplicable => {
                writeln!(self.out, "[{path}] No Follina exploit found")
            },
        }
    }

    fn summary(&mut self, summary: &Summary) -> IoResult<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}{}", "Scanned files: ".paint(Green).bold().whenever(self.colors), summary.scanned)?;
        writeln!(self.out, "{}{}", "Valid documents: ".paint(Green).bold().whenever(self.colors), summary.documents)?;
        let suspicious = format!("Suspicious files ({}): ", summary.suspicious.len());
        writeln!(
            self.out,
            "{}{}",
            suspicious.paint(Yellow).bold().whenever(self.colors),
            join(&summary.suspicious)
        )?;
        let infected = format!("Infected files ({}): ", summary.infected.len());
        writeln!(self.out, "{}{}", infected.paint(Red).bold().whenever(self.colors), join(&summary.infected))?;
        if summary.errors > 0 {
            writeln!(self.out, "{}{}", "Unreadable paths: ".paint(Yellow).whenever(self.colors), summary.errors)?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn join(paths: &[PathBuf]) -> String {
    paths.iter().map(|path| path.display().to_string()).collect::<Vec<_>>().join(", ")
}
