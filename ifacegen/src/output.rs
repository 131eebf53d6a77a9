use anyhow::Result;
use clap::ValueEnum;
use colored::{Color, Colorize};
use comfy_table::Table;
use ifacegen_build::GenerationStatus;
use serde::Serialize;

use crate::theme::{ICONS, THEME};

/// How the generation report is printed on stdout.
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// One row per exported function
    #[default]
    Table,
    /// The full report as JSON; status lines are withheld
    Json,
    /// `<destination>: <n> function(s), <status>`
    Compact,
}

#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// A report that knows its table and one-line renderings.
pub trait TableDisplay {
    fn to_table(&self, options: &GlobalOptions) -> Table;
    fn to_compact(&self) -> String;
}

/// Routes the report to stdout and status/diagnostic lines to stdout or
/// stderr, honouring `--quiet`, `--verbose`, `--no-color` and `--output`.
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Status lines are suppressed in quiet mode and when stdout carries JSON.
    fn status_suppressed(&self) -> bool {
        self.options.quiet || self.options.output_format == OutputFormat::Json
    }

    fn verbose_enabled(&self) -> bool {
        self.options.verbose && !self.options.quiet
    }

    fn decorate(&self, icon: &str, color: Color, message: &str) -> String {
        if self.options.no_color {
            format!("{icon} {message}")
        } else {
            format!("{} {}", icon.color(color), message.color(color))
        }
    }

    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                let table = data.to_table(&self.options);
                println!("{table}");
            }
            OutputFormat::Compact => {
                println!("{}", data.to_compact());
            }
        }
        Ok(())
    }

    /// Announce the outcome of a run, styled by its status.
    pub fn status(&self, status: GenerationStatus, message: &str) {
        if !self.status_suppressed() {
            let (icon, color) = THEME.for_status(status);
            println!("{}", self.decorate(icon, color, message));
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.status_suppressed() {
            println!("{}", self.decorate(ICONS.warning, THEME.warning, message));
        }
    }

    /// Always printed, to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.decorate(ICONS.error, THEME.error, message));
    }

    pub fn verbose(&self, message: &str) {
        if self.verbose_enabled() {
            eprintln!("{}", self.decorate(ICONS.arrow, THEME.muted, message));
        }
    }

    pub fn key_value(&self, key: &str, value: &str) {
        if !self.verbose_enabled() {
            return;
        }
        if self.options.no_color {
            eprintln!("  {key}: {value}");
        } else {
            eprintln!("  {}: {}", key.color(THEME.key).bold(), value.color(THEME.value));
        }
    }
}

/// Box-drawing borders when colors are on, plain ASCII otherwise.
pub fn create_table(options: &GlobalOptions) -> Table {
    let mut table = Table::new();

    if !options.no_color {
        table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    } else {
        table.load_preset(comfy_table::presets::ASCII_FULL);
    }

    table
}
