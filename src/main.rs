use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use figma_tokens::error::envelope_for;
use figma_tokens::pipeline::{
    run_buttons, run_palette, ButtonsConfig, DocumentSource, PaletteConfig, BUTTONS_PAGE,
    PALETTE_PAGE,
};
use figma_tokens::walker::SectionFilter;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "figma-tokens")]
#[command(about = "Extract palette and button design tokens from a Figma file into CSS")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Palette page -> themes.css + themes.json
    Palette {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long = "page", default_value = PALETTE_PAGE)]
        page: String,
    },
    /// Buttons page -> buttons.css + buttons.json
    Buttons {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long = "page", default_value = BUTTONS_PAGE)]
        page: String,
        /// Ignore the cached buttons.json and fetch again.
        #[arg(long = "refresh", default_value_t = false)]
        refresh: bool,
        /// Accept sections that are not marked ready for development.
        #[arg(long = "lenient", default_value_t = false)]
        lenient: bool,
    },
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Figma file key or file/design URL.
    #[arg(long = "file-key", env = "FIGMA_FILE_KEY")]
    file_key: Option<String>,
    #[arg(long = "token", env = "FIGMA_API_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Base URL of the Figma REST API.
    #[arg(long = "api-base", env = "FIGMA_API_BASE", hide = true)]
    api_base: Option<String>,
    /// Read a saved `/files/{key}/nodes` response instead of calling the API.
    #[arg(long = "page-json")]
    page_json: Option<PathBuf>,
    #[arg(long = "output-dir", default_value = "./extracted")]
    output_dir: PathBuf,
    #[arg(long = "verbose", default_value_t = false)]
    verbose: bool,
    /// Print a machine-readable result or error envelope on stdout.
    #[arg(long = "json", default_value_t = false)]
    json: bool,
}

impl CommonArgs {
    fn source(&self) -> DocumentSource {
        match &self.page_json {
            Some(path) => DocumentSource::PageSnapshot(path.clone()),
            None => DocumentSource::Api {
                token: self.token.clone(),
                file_key: self.file_key.clone(),
                api_base: self.api_base.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let common = match &cli.command {
        Commands::Palette { common, .. } | Commands::Buttons { common, .. } => common,
    };
    init_tracing(common.verbose);
    if let Some(hash) = option_env!("FIGMA_TOKENS_GIT_HASH") {
        debug!(git_hash = hash, "build");
    }

    let json_output = common.json;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if json_output {
                match serde_json::to_string_pretty(&envelope_for(&error)) {
                    Ok(envelope) => println!("{envelope}"),
                    Err(_) => eprintln!("error: {error:#}"),
                }
            } else {
                eprintln!("error: {error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    match cli.command {
        Commands::Palette { common, page } => {
            let config = PaletteConfig {
                source: common.source(),
                output_dir: common.output_dir.clone(),
                page_name: page,
            };
            progress(&common, "1/2 Extracting palette from Figma...");
            let report = run_palette(&config).await?;
            if common.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "ok": true, "palette": report }))?
                );
                return Ok(());
            }
            println!(
                "2/2 Wrote {} colors in {} groups",
                report.total_colors,
                report.groups.len()
            );
            println!("CSS: {}", report.css_path.display());
            println!("JSON: {}", report.json_path.display());
        }
        Commands::Buttons {
            common,
            page,
            refresh,
            lenient,
        } => {
            let config = ButtonsConfig {
                source: common.source(),
                output_dir: common.output_dir.clone(),
                page_name: page,
                section_filter: if lenient {
                    SectionFilter::AllSections
                } else {
                    SectionFilter::ReadyForDev
                },
                refresh_cache: refresh,
            };
            progress(&common, "1/2 Extracting buttons from Figma...");
            let report = run_buttons(&config).await?;
            if common.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "ok": true, "buttons": report }))?
                );
                return Ok(());
            }
            let summary = &report.summary;
            println!(
                "2/2 Rendered {} variants, {} themes, {} unique states ({} combinations)",
                summary.variants, summary.themes, summary.unique_states, summary.combinations
            );
            println!(
                "Modifiers: {} unique, {} total",
                summary.unique_modifiers, summary.total_modifiers
            );
            if report.from_cache {
                println!("Source: cached snapshot");
            }
            println!("CSS: {}", report.css_path.display());
            if let Some(json_path) = &report.json_path {
                println!("JSON: {}", json_path.display());
            }
        }
    }
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn progress(common: &CommonArgs, line: &str) {
    if !common.json {
        println!("{line}");
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("figma_tokens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("figma_tokens=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
