//! Console printing of batch results
//!
//! Paths and non-error results go to stdout. Errors and fetch failures go to
//! stderr so they can be separated in scripts.

use crate::checks::Classification;
use crate::crawler::PageResult;
use crate::output::BatchSummary;
use std::io::{self, IsTerminal, Write};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Whether ANSI colours should be used on stdout
pub fn color_enabled() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}

/// Colour wrapper that degrades to plain text
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

/// `1 error`, `2 errors`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Writes one page: its path, then one indented line per check result
pub fn write_page(
    out: &mut dyn Write,
    err: &mut dyn Write,
    styled: &Styled,
    page: &PageResult,
) -> io::Result<()> {
    writeln!(out, "{}", styled.bold(&page.path))?;

    if let Some(error) = page.fetch_error() {
        writeln!(err, "    {}", styled.red(&format!("Fetch failed: {}", error)))?;
        return Ok(());
    }

    for result in page.check_results() {
        let line = format!("{}: {}", result.check_name, result.message);
        match result.classification {
            Classification::Error => writeln!(err, "    {}", styled.red(&line))?,
            Classification::Warning => writeln!(out, "    {}", styled.yellow(&line))?,
            Classification::Success => writeln!(out, "    {}", styled.green(&line))?,
            Classification::Info => writeln!(out, "    {}", line)?,
        }
    }

    Ok(())
}

/// Writes the closing error and warning totals; zero counts are omitted
pub fn write_totals(
    out: &mut dyn Write,
    err: &mut dyn Write,
    summary: &BatchSummary,
) -> io::Result<()> {
    if summary.error_count > 0 {
        writeln!(err, "{}", pluralize(summary.error_count, "error"))?;
    }
    if summary.fetch_failure_count > 0 {
        writeln!(
            err,
            "{} could not be fetched",
            pluralize(summary.fetch_failure_count, "page")
        )?;
    }
    if summary.warning_count > 0 {
        writeln!(out, "{}", pluralize(summary.warning_count, "warning"))?;
    }
    Ok(())
}

/// Prints one page as soon as its checks finish
///
/// Both streams stay locked for the whole page so lines from concurrent
/// workers never interleave within a page.
pub fn print_page(styled: &Styled, page: &PageResult) -> io::Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    write_page(&mut out, &mut err, styled, page)?;
    out.flush()?;
    err.flush()
}

/// Prints the closing totals once the batch is done
pub fn print_totals(summary: &BatchSummary) -> io::Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    write_totals(&mut out, &mut err, summary)?;
    out.flush()?;
    err.flush()
}
