use crate::e_features::get_feature_flags_json;
use crate::e_spinner::DEFAULT_LABEL;
use crate::e_style::Palette;
use clap::{Parser, ValueEnum};
use crossterm::tty::IsTty;

#[derive(Parser, Debug)]
#[command(author, version, about = "tsc-e is for Errors. Pipe `tsc --watch` into it.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and feature flags in JSON format.
    #[arg(
        long,
        short = 'v',
        help = "Print version and feature flags in JSON format."
    )]
    pub version: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = ColorChoice::Auto,
        help = "Colorize the report (default: auto)."
    )]
    pub color: ColorChoice,

    #[arg(
        long,
        default_value = DEFAULT_LABEL,
        help = "Text shown next to the spinner while a round is checked."
    )]
    pub label: String,

    #[arg(long, help = "Never draw the checking spinner.")]
    pub no_spinner: bool,

    #[arg(
        long,
        default_value_t = 80,
        value_parser = clap::value_parser!(u64).range(10..),
        help = "Spinner frame interval in milliseconds (default: 80)."
    )]
    pub interval: u64,
}

/// Controls whether the report is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn resolve(self, stdout_is_tty: bool, no_color_env: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stdout_is_tty && !no_color_env,
        }
    }
}

impl Cli {
    /// The palette selected by `--color` for the current process.
    pub fn palette(&self) -> Palette {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Palette::new(self.color.resolve(std::io::stdout().is_tty(), no_color))
    }
}

/// Print the version and the JSON array of feature flags.
pub fn print_version_and_features() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
    println!("tsc-e {}", version);
    println!("{}", get_feature_flags_json());
}
