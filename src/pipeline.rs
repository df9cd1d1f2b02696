//! End-to-end runs: obtain the page tree, build the model, write CSS and JSON.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::color::ColorVariableMap;
use crate::error::ExtractError;
use crate::figma::nodes::FigmaNodesResponse;
use crate::figma::{parse_figma_file_key, FigmaClient};
use crate::model::{ButtonSet, PaletteDocument};
use crate::render::{render_buttons, render_palette};
use crate::walker::{find_page, parse_buttons, parse_palette, SectionFilter};

pub const PALETTE_PAGE: &str = "Palette";
pub const BUTTONS_PAGE: &str = "Buttons";
pub const PALETTE_CSS_FILE: &str = "themes.css";
pub const PALETTE_JSON_FILE: &str = "themes.json";
pub const BUTTONS_CSS_FILE: &str = "buttons.css";
pub const BUTTONS_JSON_FILE: &str = "buttons.json";

const HTTP_TIMEOUT: Duration = Duration::from_secs(25);

/// Where the page tree comes from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Live Figma REST API. `file_key` is a raw key or a Figma URL. Both are
    /// checked only when a request is actually needed.
    Api {
        token: Option<String>,
        file_key: Option<String>,
        api_base: Option<String>,
    },
    /// A saved `/files/{key}/nodes` response.
    PageSnapshot(PathBuf),
}

#[derive(Debug, Clone)]
pub struct PaletteConfig {
    pub source: DocumentSource,
    pub output_dir: PathBuf,
    pub page_name: String,
}

#[derive(Debug, Clone)]
pub struct ButtonsConfig {
    pub source: DocumentSource,
    pub output_dir: PathBuf,
    pub page_name: String,
    pub section_filter: SectionFilter,
    /// Ignore an existing `buttons.json` and rebuild from the document.
    pub refresh_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaletteReport {
    pub css_path: PathBuf,
    pub json_path: PathBuf,
    pub groups: Vec<GroupCount>,
    pub total_colors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub colors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonsReport {
    pub css_path: PathBuf,
    /// Set when a fresh snapshot was written; `None` when the cache was used.
    pub json_path: Option<PathBuf>,
    pub from_cache: bool,
    pub color_variables: usize,
    pub summary: ButtonsSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ButtonsSummary {
    pub variants: usize,
    pub themes: usize,
    pub unique_modifiers: usize,
    pub total_modifiers: usize,
    pub unique_states: usize,
    /// variant x theme x state
    pub combinations: usize,
}

impl ButtonsSummary {
    pub fn from_buttons(buttons: &ButtonSet) -> Self {
        let mut summary = Self {
            variants: buttons.variants.len(),
            ..Self::default()
        };
        let mut modifiers = BTreeSet::new();
        let mut states = BTreeSet::new();

        for (name, variant) in &buttons.variants {
            summary.themes += variant.themes.len();
            summary.total_modifiers += variant.modifiers.len();
            modifiers.extend(variant.modifiers.keys().map(String::as_str));

            let mut variant_states = BTreeSet::new();
            for theme in variant.themes.values() {
                summary.combinations += theme.states.len();
                variant_states.extend(theme.states.keys().map(String::as_str));
            }
            info!(
                variant = %name,
                themes = variant.themes.len(),
                modifiers = variant.modifiers.len(),
                states = variant_states.len(),
                "button variant"
            );
            states.extend(variant_states);
        }

        summary.unique_modifiers = modifiers.len();
        summary.unique_states = states.len();
        summary
    }
}

pub async fn run_palette(config: &PaletteConfig) -> Result<PaletteReport> {
    ensure_dir(&config.output_dir)?;

    let content = load_page(&config.source, &config.page_name).await?;
    let palette = parse_palette(&content, &config.page_name)?;

    let css_path = config.output_dir.join(PALETTE_CSS_FILE);
    write_artifact(&css_path, &render_palette(&palette))?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let document = PaletteDocument::from_groups(&palette, Some(timestamp));
    let json_path = config.output_dir.join(PALETTE_JSON_FILE);
    write_artifact(&json_path, &serde_json::to_string_pretty(&document)?)?;

    let groups = palette
        .groups
        .iter()
        .map(|(name, colors)| {
            info!(group = %name, colors = colors.len(), "color group");
            GroupCount {
                name: name.clone(),
                colors: colors.len(),
            }
        })
        .collect::<Vec<_>>();
    let total_colors = palette.color_count();
    info!(total_colors, "palette extracted");

    Ok(PaletteReport {
        css_path,
        json_path,
        groups,
        total_colors,
    })
}

pub async fn run_buttons(config: &ButtonsConfig) -> Result<ButtonsReport> {
    ensure_dir(&config.output_dir)?;

    let snapshot_path = config.output_dir.join(BUTTONS_JSON_FILE);
    let cached = if config.refresh_cache {
        None
    } else {
        match load_cached_buttons(&snapshot_path) {
            Ok(cached) => cached,
            Err(error) => {
                warn!("{error:#}; fetching the document instead");
                None
            }
        }
    };

    let from_cache = cached.is_some();
    let buttons = match cached {
        Some(buttons) => {
            info!(path = %snapshot_path.display(), "using cached button snapshot");
            buttons
        }
        None => {
            let content = load_page(&config.source, &config.page_name).await?;
            parse_buttons(&content, &config.page_name, config.section_filter)?
        }
    };

    let colors = load_color_variables(&config.output_dir.join(PALETTE_JSON_FILE));
    let css_path = config.output_dir.join(BUTTONS_CSS_FILE);
    write_artifact(&css_path, &render_buttons(&buttons, &colors))?;

    let json_path = if from_cache {
        None
    } else {
        write_artifact(&snapshot_path, &serde_json::to_string_pretty(&buttons)?)?;
        Some(snapshot_path)
    };

    let summary = ButtonsSummary::from_buttons(&buttons);
    info!(
        variants = summary.variants,
        themes = summary.themes,
        unique_modifiers = summary.unique_modifiers,
        total_modifiers = summary.total_modifiers,
        unique_states = summary.unique_states,
        combinations = summary.combinations,
        "buttons extracted"
    );

    Ok(ButtonsReport {
        css_path,
        json_path,
        from_cache,
        color_variables: colors.len(),
        summary,
    })
}

/// Reads a previous `buttons.json`. A missing file is `Ok(None)`; an
/// unreadable one is an `E_CACHE_PARSE` error for the caller to recover from.
pub fn load_cached_buttons(path: &Path) -> Result<Option<ButtonSet>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|error| ExtractError::cache_parse(&path.display().to_string(), error).into())
}

/// Palette variables from `themes.json`. Missing or unreadable files yield an
/// empty map, so colors render as literals.
pub fn load_color_variables(path: &Path) -> ColorVariableMap {
    if !path.exists() {
        info!(path = %path.display(), "no palette variables found, colors stay literal");
        return ColorVariableMap::new();
    }
    let parsed = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| serde_json::from_str::<PaletteDocument>(&raw).map_err(anyhow::Error::from));
    match parsed {
        Ok(document) => {
            let colors = document.color_variables();
            info!(path = %path.display(), count = colors.len(), "loaded palette variables");
            colors
        }
        Err(error) => {
            warn!(path = %path.display(), "failed to load palette variables: {error:#}");
            ColorVariableMap::new()
        }
    }
}

async fn load_page(source: &DocumentSource, page_name: &str) -> Result<FigmaNodesResponse> {
    match source {
        DocumentSource::PageSnapshot(path) => {
            info!(path = %path.display(), "reading page snapshot");
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read page snapshot {}", path.display()))?;
            serde_json::from_str(&raw).map_err(|error| {
                ExtractError::malformed_document(format!(
                    "page snapshot {} is not a page-content response: {error}",
                    path.display()
                ))
                .into()
            })
        }
        DocumentSource::Api {
            token,
            file_key,
            api_base,
        } => {
            let token = token
                .clone()
                .context("FIGMA_API_TOKEN is required to fetch data from the Figma API")?;
            let file = file_key
                .as_deref()
                .context("a Figma file key is required (--file-key or FIGMA_FILE_KEY)")?;
            let file_key = parse_figma_file_key(file).ok_or_else(|| {
                anyhow!(
                    "could not parse Figma file key from '{}'; provide a valid Figma URL or raw file key",
                    file
                )
            })?;
            let http = Client::builder()
                .no_proxy()
                .timeout(HTTP_TIMEOUT)
                .build()
                .context("failed to create HTTP client")?;
            let mut client = FigmaClient::new(http, token);
            if let Some(api_base) = api_base {
                client = client.with_api_base(api_base.as_str());
            }

            let document = client.fetch_file(&file_key).await?;
            let page_id = find_page(&document, page_name)?;
            info!(page = page_name, page_id = %page_id, "found page");
            client.fetch_page(&file_key, &page_id).await
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output folder {}", dir.display()))
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote artifact");
    Ok(())
}
