//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::og::{Section, Theme};

/// Open Graph image renderer for a personal blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: ogcard.toml)
    #[arg(short = 'C', long, global = true, default_value = "ogcard.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve images at /og/{section}/{slug}[-{theme}].png
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Pre-render images for every post, both themes
    #[command(visible_alias = "b")]
    Build {
        /// Output directory (default: paths.output)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Remove previously generated images first
        #[arg(short, long)]
        clean: bool,
    },

    /// List every pre-renderable image path
    #[command(visible_alias = "p")]
    Paths {
        /// Print JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Render a single title to a file
    #[command(visible_alias = "r")]
    Render {
        /// Post title
        title: String,

        /// Collection name; unknown names use the default colors
        #[arg(short, long, default_value = "writing", value_parser = parse_section)]
        section: Section,

        /// Color theme (dark, light)
        #[arg(short, long, default_value = "dark")]
        theme: Theme,

        /// Output file
        #[arg(short, long, default_value = "og.png", value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,

        /// Write the SVG document instead of a PNG
        #[arg(long)]
        svg: bool,
    },
}

fn parse_section(name: &str) -> Result<Section, std::convert::Infallible> {
    Ok(Section::from_name_or_default(name))
}
