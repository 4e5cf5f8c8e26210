//! Render a service page to standalone HTML.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use siddur_browser::engine::ServiceEngine;
use siddur_browser::model::ServiceKey;
use siddur_browser::net::open_site;
use siddur_browser::page::{FontScale, PageContext, PageOutcome};

/// Render a prayer service to an HTML page
#[derive(Parser, Debug)]
#[command(name = "render-page")]
#[command(version, about)]
struct Cli {
    /// Page URL (e.g. `https://host/service.html?service=shacharit`) or site directory
    #[arg(value_name = "LOCATION", env = "SIDDUR_SITE", default_value = ".")]
    location: String,

    /// Service to render, overriding the URL's `service` parameter
    #[arg(short, long)]
    service: Option<String>,

    /// Initial `--font-scale` value
    #[arg(long, default_value_t = 1.0)]
    font_scale: f32,

    /// Write the page here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut page = PageContext::from_url(&cli.location);
    if let Some(raw) = &cli.service {
        page.service = ServiceKey::parse(raw);
    }
    page.font_scale = FontScale::new(cli.font_scale);

    let outcome = if page.service.is_none() {
        log::warn!("No service given in {:?} or --service", cli.location);
        PageOutcome::MissingService
    } else {
        match open_site(&cli.location) {
            Ok(source) => page.load(&ServiceEngine::from_boxed(source)),
            Err(e) => {
                eprintln!("render-page: cannot open {}: {}", cli.location, e);
                return ExitCode::FAILURE;
            }
        }
    };

    let html = page.document(&outcome).to_html();
    let written = match &cli.output {
        Some(path) => std::fs::write(path, html),
        None => {
            print!("{}", html);
            Ok(())
        }
    };
    if let Err(e) = written {
        eprintln!("render-page: cannot write output: {}", e);
        return ExitCode::FAILURE;
    }

    match outcome {
        PageOutcome::Rendered(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
