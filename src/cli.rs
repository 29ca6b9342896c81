//! src/cli.rs
//!
//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ringscope::graph::{Gradient, GraphConfig, RenderStyle, Rgb};

/// Where samples come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Seeded synthetic signal
    Sim,
    /// Numbers read line by line from a serial port
    Serial,
}

/// ringscope: live fixed-memory time-series graphs in the terminal
#[derive(Parser, Debug)]
#[command(name = "ringscope", version, about)]
pub struct Cli {
    /// Sample source
    #[arg(long, value_enum, default_value_t = SourceKind::Sim)]
    pub source: SourceKind,

    /// Serial port used with `--source serial`
    #[arg(long, default_value = "/dev/ttyACM0")]
    pub port: String,

    /// Serial baud rate
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Number of graphs; channel i of each frame feeds graph i
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..=8))]
    pub channels: u16,

    /// Samples retained per graph
    #[arg(long, default_value_t = 450)]
    pub capacity: usize,

    /// Graph surface height in pixels
    #[arg(long, default_value_t = GraphConfig::DEFAULT_HEIGHT)]
    pub height: u32,

    /// Line colour (#rrggbb)
    #[arg(long, default_value = "#2f7ed8")]
    pub color: Rgb,

    /// Paint lines with the height gradient instead of a flat colour
    #[arg(long)]
    pub gradient: bool,

    /// Hide the background grid
    #[arg(long)]
    pub no_grid: bool,

    /// Milliseconds between simulated samples
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Seed for the simulated source
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Log file; the terminal itself is owned by the UI
    #[arg(long, default_value = "ringscope.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Graph configuration shared by every channel.
    pub fn graph_config(&self) -> GraphConfig {
        let style = if self.gradient {
            RenderStyle::Gradient(Gradient::default())
        } else {
            RenderStyle::Solid(self.color)
        };
        GraphConfig::new(self.capacity)
            .with_height(self.height)
            .with_grid(!self.no_grid)
            .with_style(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_graph_defaults() {
        let cli = Cli::try_parse_from(["ringscope"]).unwrap();
        assert_eq!(cli.source, SourceKind::Sim);
        assert_eq!(cli.channels, 3);
        assert_eq!(cli.graph_config(), GraphConfig::default());
    }

    #[test]
    fn parses_style_options() {
        let cli = Cli::try_parse_from([
            "ringscope",
            "--source",
            "serial",
            "--color",
            "#ff0000",
            "--no-grid",
            "--capacity",
            "100",
        ])
        .unwrap();
        let cfg = cli.graph_config();
        assert_eq!(cli.source, SourceKind::Serial);
        assert_eq!(cfg.capacity, 100);
        assert!(!cfg.grid);
        assert_eq!(cfg.style, RenderStyle::Solid(Rgb(255, 0, 0)));
    }

    #[test]
    fn rejects_bad_color_and_channel_count() {
        assert!(Cli::try_parse_from(["ringscope", "--color", "blue"]).is_err());
        assert!(Cli::try_parse_from(["ringscope", "--channels", "0"]).is_err());
    }
}
