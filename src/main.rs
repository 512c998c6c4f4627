//! CLI entry point: analyzes the rubrics of one or more Canvas courses.

use anyhow::{Context, Result};
use canvas_rubric_analyzer::output::render_course;
use canvas_rubric_analyzer::{CanvasClient, CanvasCredentials, RubricAnalyzer};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use log::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "canvas_rubric_analyzer")]
#[command(about = "Checks Canvas assignment rubrics against the Destacado/Habilitado/En desarrollo/No logrado scale", long_about = None)]
struct Cli {
    /// Course IDs, separated by commas or spaces. Prompted for when omitted.
    #[arg(value_name = "COURSE_ID")]
    ids: Vec<String>,

    /// Print the reports as JSON instead of tables
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Disable coloured output
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let credentials = match CanvasCredentials::credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let client = CanvasClient::new(credentials)?;

    let input = if cli.ids.is_empty() {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter one or more course IDs (separated by comma, space or newline)")
            .interact_text()
            .context("Failed to read course IDs")?
    } else {
        cli.ids.join(" ")
    };

    let analyzer = RubricAnalyzer::new(&client);
    if cli.json {
        let reports = analyzer.analyze_input(&input);
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        analyzer.analyze_input_with(&input, |report| println!("{}", render_course(&report)));
    }

    Ok(())
}
