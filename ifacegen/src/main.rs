mod output;
mod report;
mod theme;

use anyhow::{Context, Result};
use clap::{
    builder::{
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
        Styles,
    },
    error::ErrorKind,
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser,
};

use colored::{control::ShouldColorize, Color as ThemeColor, Colorize};
use ifacegen_build::{GenerationStatus, InterfaceConfig};
use log::debug;
use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use output::{GlobalOptions, OutputFormat, OutputManager};
use report::status_label;
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("IFACEGEN_CONFIG", "Config file used when --config is not given"),
    ("RUST_LOG", "Diagnostic log filter (e.g. ifacegen_build=debug)"),
    ("NO_COLOR", "Disable colored output"),
];

const EXAMPLES: &[&str] = &[
    "ifacegen heap.h heap_api.h                 # Generate heap_api.h",
    "ifacegen --check heap.h heap_api.h         # Fail if heap_api.h is out of date",
    "ifacegen --output json heap.h heap_api.h   # Report extracted functions as JSON",
    "ifacegen -c plugin.toml heap.h heap_api.h  # Use custom prefixes and banner glyphs",
];

#[derive(Parser)]
#[command(name = "ifacegen")]
#[command(version)]
#[command(
    about = "Generate the plugin interface header for a C header",
    long_about = r#"Scans a C header for the declarations that follow the export marker
(`#ifdef BUILD_PLUGIN` by default) and writes a companion header with:

• an enum giving every exported function a stable index
• a name table parallel to that enum
• one function-pointer typedef per function

Lines after the marker that are not single-line declarations are skipped.
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// C header to scan for exported declarations
    source: PathBuf,

    /// Interface header to generate
    destination: PathBuf,

    /// TOML file with marker, prefixes and banner glyphs
    #[arg(short = 'c', long, env = "IFACEGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Do not write; exit with an error if the destination is out of date
    #[arg(long)]
    check: bool,

    /// Output format of the run report
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command();
        match command.styles(help_styles()).try_get_matches() {
            Ok(matches) => match Cli::from_arg_matches(&matches) {
                Ok(cli) => cli,
                Err(err) => err.exit(),
            },
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    let _ = print_blank_line_stdout();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display help: {print_err}");
                    }
                    let _ = print_blank_line_stdout();
                    std::process::exit(err.exit_code());
                }
                _ => {
                    let exit_code = err.exit_code();
                    let _ = print_blank_line_stderr();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display error: {print_err}");
                    }
                    let _ = print_blank_line_stderr();
                    std::process::exit(exit_code);
                }
            },
        }
    }
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let appendix = render_top_level_appendix(use_color);
    let command = Cli::command().after_long_help(appendix);
    command.color(if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    })
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let examples_heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{examples_heading}");
    for example in EXAMPLES {
        let arrow = stylize(ICONS.arrow, theme.secondary, false, use_color);
        let command_text = stylize(example, theme.secondary, false, use_color);
        let _ = writeln!(buffer, "  {arrow} {command_text}");
    }

    buffer.push('\n');

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Without --config, the nearest ifacegen.toml in the current directory or its parents is used.",
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn print_blank_line_stdout() -> io::Result<()> {
    let mut stdout = io::stdout();
    IoWrite::write_all(&mut stdout, b"\n")?;
    IoWrite::flush(&mut stdout)
}

fn print_blank_line_stderr() -> io::Result<()> {
    let mut stderr = io::stderr();
    IoWrite::write_all(&mut stderr, b"\n")?;
    IoWrite::flush(&mut stderr)
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if use_color {
        let styled = text.color(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    } else {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let theme = &THEME;
    Styles::styled()
        .usage(style_from_color(theme.primary).bold())
        .header(style_from_color(theme.highlight).bold())
        .literal(style_from_color(theme.secondary))
        .placeholder(style_from_color(theme.muted))
        .valid(style_from_color(theme.success))
        .invalid(style_from_color(theme.warning))
        .error(style_from_color(theme.error).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    Style::new().fg_color(Some(color_to_clap_color(color)))
}

fn color_to_clap_color(color: ThemeColor) -> ClapColor {
    match color {
        ThemeColor::Black => ClapColor::Ansi(AnsiColor::Black),
        ThemeColor::Red => ClapColor::Ansi(AnsiColor::Red),
        ThemeColor::Green => ClapColor::Ansi(AnsiColor::Green),
        ThemeColor::Yellow => ClapColor::Ansi(AnsiColor::Yellow),
        ThemeColor::Blue => ClapColor::Ansi(AnsiColor::Blue),
        ThemeColor::Magenta => ClapColor::Ansi(AnsiColor::Magenta),
        ThemeColor::Cyan => ClapColor::Ansi(AnsiColor::Cyan),
        ThemeColor::White => ClapColor::Ansi(AnsiColor::White),
        ThemeColor::BrightBlack => ClapColor::Ansi(AnsiColor::BrightBlack),
        ThemeColor::BrightRed => ClapColor::Ansi(AnsiColor::BrightRed),
        ThemeColor::BrightGreen => ClapColor::Ansi(AnsiColor::BrightGreen),
        ThemeColor::BrightYellow => ClapColor::Ansi(AnsiColor::BrightYellow),
        ThemeColor::BrightBlue => ClapColor::Ansi(AnsiColor::BrightBlue),
        ThemeColor::BrightMagenta => ClapColor::Ansi(AnsiColor::BrightMagenta),
        ThemeColor::BrightCyan => ClapColor::Ansi(AnsiColor::BrightCyan),
        ThemeColor::BrightWhite => ClapColor::Ansi(AnsiColor::BrightWhite),
        ThemeColor::TrueColor { r, g, b } => ClapColor::Rgb(RgbColor(r, g, b)),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();

    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    if let Err(err) = execute(cli, &output) {
        output.error(&format!("Error: {err:#}"));
        std::process::exit(1);
    }
}

fn execute(cli: Cli, output: &OutputManager) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = resolve_config(cli.config.as_deref(), &current_dir, output)?;

    output.verbose(&format!("Scanning {}", cli.source.display()));
    output.key_value("export marker", &config.export_marker);

    let report = ifacegen_build::generate_interface(&cli.source, &cli.destination)
        .config(config)
        .check_only(cli.check)
        .run()
        .with_context(|| format!("Failed to generate {}", cli.destination.display()))?;

    output.display(&report)?;

    let count = report.signatures.len();
    let destination = report.destination.display();
    match report.status {
        GenerationStatus::Written => {
            output.status(report.status, &format!("Generated {destination} with {count} exported function(s)"));
        }
        GenerationStatus::Unchanged => {
            output.status(report.status, &format!("{destination} is up to date ({count} exported function(s))"));
        }
        GenerationStatus::Stale => {
            output.status(report.status, &format!("{destination} is {}", status_label(report.status)));
            anyhow::bail!("{destination} needs to be regenerated from {}", report.source.display());
        }
    }

    if count == 0 {
        output.warning("No exported functions were found; check the export marker");
    }

    Ok(())
}

/// Pick the configuration: explicit path, then the nearest `ifacegen.toml`
/// above `search_from`, then the built-in defaults.
fn resolve_config(explicit: Option<&Path>, search_from: &Path, output: &OutputManager) -> Result<InterfaceConfig> {
    if let Some(path) = explicit {
        output.key_value("config", &path.display().to_string());
        return Ok(InterfaceConfig::load(path)?);
    }

    match InterfaceConfig::discover(search_from)? {
        Some((path, config)) => {
            output.key_value("config", &path.display().to_string());
            Ok(config)
        }
        None => {
            debug!("no {} found, using defaults", ifacegen_build::CONFIG_FILE_NAME);
            Ok(InterfaceConfig::default())
        }
    }
}
