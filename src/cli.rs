//! Command-line interface definitions for ioprobe.
//!
//! Uses `clap` derive macros for declarative argument parsing. The backend,
//! window and glyph options have environment variable fallbacks; with no
//! arguments at all the program starts the interactive scanner on the
//! default window.

use crate::app::{App, Message};
use crate::config::{Glyphs, Settings};
use crate::error::CliResult;
use crate::output::{self, OutputFormat, ScanReport};
use crate::render::{Terminal, TerminalKeys};
use crate::scanner::devport::is_root;
use crate::scanner::{create_backend, Backend, BoxedIo, OpenedBackend, PortBuffer, ScanEngine};
use crate::types::{parse_hex, PortWindow};
use clap::Parser;
use std::io;
use tracing::info;

/// ioprobe - probe legacy ISA I/O ports and show them as a grid.
///
/// Reserved system ports (DMA, PIC, PIT, keyboard controller, IDE, VGA,
/// floppy, serial) are never read.
#[derive(Parser, Debug)]
#[command(name = "ioprobe")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An ISA I/O port scanner", long_about = None)]
pub struct Cli {
    /// Hardware backend used for port reads
    #[arg(short, long, value_enum, env = "IOPROBE_BACKEND", default_value = "auto")]
    pub backend: Backend,

    /// First port of the scan window (hex)
    #[arg(short, long, env = "IOPROBE_START", default_value = "0000", value_parser = parse_port)]
    pub start: u16,

    /// Last port of the scan window (hex)
    #[arg(short, long, env = "IOPROBE_END", default_value = "03FF", value_parser = parse_port)]
    pub end: u16,

    /// Whole scan window as START-END in hex, e.g. 0300-031F
    #[arg(short, long, value_name = "START-END", conflicts_with_all = ["start", "end"])]
    pub window: Option<PortWindow>,

    /// Draw with ASCII glyphs instead of block characters
    #[arg(long, env = "IOPROBE_ASCII")]
    pub ascii: bool,

    /// Scan once, print a report and exit instead of starting the screen UI
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub report: Option<OutputFormat>,

    /// Verbose logging to stderr (interactive mode only logs when stderr is redirected)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Log filter for report mode.
const REPORT_FILTER: &str = "warn";
/// Log filter for the full-screen UI with stderr redirected.
const QUIET_FILTER: &str = "off";
/// Log filter with `--verbose`.
const VERBOSE_FILTER: &str = "ioprobe=debug";

/// Parse a hex port number for clap.
fn parse_port(value: &str) -> Result<u16, String> {
    parse_hex(value).ok_or_else(|| format!("'{}' is not a hex port number (0000-FFFF)", value))
}

impl Cli {
    /// Default log filter, or `None` when nothing may be logged at all.
    ///
    /// The full-screen UI owns the terminal, so interactive runs only log
    /// when stderr goes somewhere else.
    pub fn log_filter(&self, stderr_is_term: bool) -> Option<&'static str> {
        let interactive = self.report.is_none();
        if interactive && stderr_is_term {
            return None;
        }
        match (self.verbose, interactive) {
            (true, _) => Some(VERBOSE_FILTER),
            (false, false) => Some(REPORT_FILTER),
            (false, true) => Some(QUIET_FILTER),
        }
    }

    /// Build validated settings from the arguments.
    pub fn settings(&self) -> CliResult<Settings> {
        let window = match self.window {
            Some(window) => window,
            None => PortWindow::new(self.start, self.end)?,
        };
        let glyphs = if self.ascii {
            Glyphs::ASCII
        } else {
            Glyphs::BLOCKS
        };
        let settings = Settings::default()
            .with_backend(self.backend)
            .with_window(window)
            .with_glyphs(glyphs);
        settings.validate()?;
        Ok(settings)
    }

    /// Execute the program.
    pub fn execute(&self) -> CliResult<()> {
        let settings = self.settings()?;

        if matches!(settings.backend, Backend::DevPort) && !is_root() {
            output::print_warning("reading /dev/port requires root privileges.");
        }
        let backend = create_backend(settings.backend)?;

        match self.report {
            Some(format) => {
                if let Some(notice) = &backend.fallback {
                    output::print_warning(notice);
                }
                run_report(backend, &settings, format)
            }
            None => run_interactive(backend, &settings),
        }
    }
}

/// One scan, printed to stdout.
fn run_report(
    backend: OpenedBackend,
    settings: &Settings,
    format: OutputFormat,
) -> CliResult<()> {
    let name = backend.io.name();
    let mut engine = ScanEngine::new(backend.io);
    let mut buffer = PortBuffer::new();
    let summary = engine.scan_window(settings.window, &mut buffer)?;

    let report = ScanReport::new(
        name,
        &summary,
        buffer.records(),
        engine.classifier().ranges(),
    );
    let stdout = io::stdout();
    output::format_report(&mut stdout.lock(), &report, format)
}

/// The full-screen scanner.
fn run_interactive(backend: OpenedBackend, settings: &Settings) -> CliResult<()> {
    let mut app = interactive_app(backend, settings);
    let mut terminal = Terminal::enter()?;
    let exit = app.run(&mut TerminalKeys, &mut terminal)?;
    info!(?exit, "interactive session ended");
    Ok(())
}

/// The application, warning on the message line when the data is simulated.
fn interactive_app(backend: OpenedBackend, settings: &Settings) -> App<BoxedIo> {
    let app = App::new(settings, backend.io);
    match backend.fallback {
        Some(notice) => app.with_message(Message::Error(notice)),
        None => app,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ScanError};
    use crate::render::ColorClass;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ioprobe").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.backend, Backend::Auto);
        assert_eq!((cli.start, cli.end), (0x000, 0x3FF));
        assert!(cli.report.is_none());

        let settings = cli.settings().unwrap();
        assert_eq!(settings.window, PortWindow::DEFAULT);
        assert_eq!(settings.glyphs, Glyphs::BLOCKS);
    }

    #[test]
    fn test_window_and_report_flags() {
        let cli = parse(&[
            "--start", "0x300", "--end", "31f", "--backend", "simulated", "--report", "json",
            "--ascii",
        ]);
        assert_eq!(cli.report, Some(OutputFormat::Json));
        let settings = cli.settings().unwrap();
        assert_eq!(settings.window, PortWindow::new(0x300, 0x31F).unwrap());
        assert_eq!(settings.backend, Backend::Simulated);
        assert_eq!(settings.glyphs, Glyphs::ASCII);
    }

    #[test]
    fn test_bad_port_rejected_by_parser() {
        let result = Cli::try_parse_from(["ioprobe", "--start", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let cli = parse(&["--start", "0400", "--end", "0300"]);
        assert!(matches!(
            cli.settings(),
            Err(CliError::Scan(ScanError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_window_argument() {
        let cli = parse(&["--window", "0x300-031F"]);
        assert_eq!(
            cli.settings().unwrap().window,
            PortWindow::new(0x300, 0x31F).unwrap()
        );

        assert!(Cli::try_parse_from(["ioprobe", "--window", "031F-0300"]).is_err());
        assert!(Cli::try_parse_from(["ioprobe", "--window", "0300"]).is_err());
        assert!(
            Cli::try_parse_from(["ioprobe", "--window", "0300-031F", "--start", "0100"]).is_err()
        );
    }

    #[test]
    fn test_fallback_notice_reaches_message_line() {
        let backend =
            OpenedBackend::demo_fallback(ScanError::Unavailable("/dev/port: denied".into()));
        let app = interactive_app(backend, &Settings::default());

        let message = app.state().message.as_ref().unwrap();
        assert!(message.is_error());
        assert!(message.text().contains("/dev/port: denied"));
        assert_eq!(app.view().message.map(|m| m.1), Some(ColorClass::Alert));
    }

    #[test]
    fn test_no_notice_for_real_choice() {
        let backend = create_backend(Backend::Simulated).unwrap();
        let app = interactive_app(backend, &Settings::default());
        assert!(app.state().message.is_none());
    }

    #[test]
    fn test_log_filter() {
        let interactive = parse(&[]);
        let verbose = parse(&["-v"]);
        let report = parse(&["--report", "csv"]);
        let verbose_report = parse(&["--report", "csv", "-v"]);

        assert_eq!(interactive.log_filter(true), None);
        assert_eq!(interactive.log_filter(false), Some("off"));
        assert_eq!(verbose.log_filter(true), None);
        assert_eq!(verbose.log_filter(false), Some("ioprobe=debug"));
        assert_eq!(report.log_filter(true), Some("warn"));
        assert_eq!(verbose_report.log_filter(true), Some("ioprobe=debug"));
    }
}
