//! ogcard - Open Graph preview images for a personal blog.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod core;
mod logger;
mod og;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};
use og::RenderRequest;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(),
        Commands::Build { clean, .. } => cli::build::build_images(&config, *clean),
        Commands::Paths { json } => cli::paths::list_paths(&cli::og_handler(&config), *json),
        Commands::Render {
            title,
            section,
            theme,
            output,
            svg,
        } => {
            let request = RenderRequest::new(title.clone(), *section, *theme);
            cli::render::render_title(&config, &request, output, *svg)
        }
    }
}
