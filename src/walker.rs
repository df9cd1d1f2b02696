use anyhow::Result;
use tracing::{debug, info, warn};

use crate::color::RgbaColor;
use crate::error::ExtractError;
use crate::extract::{paint_color, style_state};
use crate::figma::nodes::{FigmaFileResponse, FigmaNode, FigmaNodesResponse, FRAME, SECTION, SOLID};
use crate::model::{ButtonSet, PaletteColor, PaletteGroups};

/// Theme used for a section whose name has no `/scheme` part.
pub const FALLBACK_THEME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionFilter {
    /// Only sections tagged "Ready for dev"; none at all is an error.
    #[default]
    ReadyForDev,
    /// Every section on the page.
    AllSections,
}

/// Id of the top-level page called `page_name`.
pub fn find_page(file: &FigmaFileResponse, page_name: &str) -> Result<String> {
    file.document
        .as_ref()
        .and_then(|document| {
            document
                .children
                .iter()
                .find(|page| page.name == page_name)
        })
        .map(|page| page.id.clone())
        .ok_or_else(|| ExtractError::page_not_found(page_name).into())
}

/// The page node of a page-content response (its first entry).
pub fn page_root(content: &FigmaNodesResponse) -> Result<&FigmaNode> {
    let nodes = content
        .nodes
        .as_ref()
        .ok_or_else(|| ExtractError::malformed_document("page content has no `nodes` collection"))?;
    let (_, entry) = nodes
        .first()
        .ok_or_else(|| ExtractError::malformed_document("page content `nodes` collection is empty"))?;
    entry
        .as_ref()
        .map(|entry| &entry.document)
        .ok_or_else(|| ExtractError::malformed_document("requested page node was not returned").into())
}

fn select_sections<'a>(
    page: &'a FigmaNode,
    page_name: &str,
    filter: SectionFilter,
) -> Result<Vec<&'a FigmaNode>> {
    let sections = page
        .children_of_type(SECTION)
        .filter(|section| filter == SectionFilter::AllSections || section.is_ready_for_dev())
        .collect::<Vec<_>>();

    if sections.is_empty() && filter == SectionFilter::ReadyForDev {
        return Err(ExtractError::no_ready_sections(page_name).into());
    }
    info!(count = sections.len(), page = page_name, "selected sections");
    Ok(sections)
}

/// Splits `Variant / scheme` into trimmed parts.
pub fn split_section_name(name: &str) -> (String, String) {
    let mut parts = name.split('/').map(str::trim);
    let variant = parts.next().unwrap_or_default().to_owned();
    let theme = parts
        .next()
        .filter(|theme| !theme.is_empty())
        .unwrap_or(FALLBACK_THEME)
        .to_owned();
    (variant, theme)
}

/// Splits `state / modifier`; a bare name or an empty modifier part has no modifier.
pub fn split_frame_name(name: &str) -> (String, Option<String>) {
    let mut parts = name.split('/').map(str::trim);
    let state = parts.next().unwrap_or_default().to_owned();
    let modifier = parts
        .next()
        .filter(|modifier| !modifier.is_empty())
        .map(str::to_owned);
    (state, modifier)
}

/// Builds the variant -> theme -> state model from the Buttons page.
pub fn parse_buttons(
    content: &FigmaNodesResponse,
    page_name: &str,
    filter: SectionFilter,
) -> Result<ButtonSet> {
    let page = page_root(content)?;
    let mut buttons = ButtonSet::default();

    for section in select_sections(page, page_name, filter)? {
        let (variant_name, theme) = split_section_name(&section.name);
        if !section.name.contains('/') {
            warn!(
                section = %section.name,
                theme = FALLBACK_THEME,
                "section name has no color scheme part"
            );
        }
        let variant = buttons.variant_mut(&variant_name);
        variant.theme_mut(&theme);

        for frame in section.children_of_type(FRAME) {
            let (state, modifier) = split_frame_name(&frame.name);
            let style = style_state(frame);
            debug!(
                variant = %variant_name,
                theme = %theme,
                state = %state,
                modifier = modifier.as_deref().unwrap_or("-"),
                "extracted state"
            );
            match modifier {
                Some(modifier) => variant.insert_modifier_state(&modifier, &theme, &state, style),
                None => variant.insert_base_state(&theme, &state, style),
            }
        }
    }

    Ok(buttons)
}

/// Builds section -> swatch groups from the Palette page. A swatch's color is
/// its first fill, which must be solid.
pub fn parse_palette(content: &FigmaNodesResponse, page_name: &str) -> Result<PaletteGroups> {
    let page = page_root(content)?;
    let mut palette = PaletteGroups::default();

    for section in select_sections(page, page_name, SectionFilter::ReadyForDev)? {
        let group = palette.group_mut(&section.name);
        for frame in section.children_of_type(FRAME) {
            let Some(color) = swatch_color(frame) else {
                debug!(frame = %frame.name, group = %section.name, "frame has no solid fill");
                continue;
            };
            debug!(color = %frame.name, rgba = %color.css(), group = %section.name, "extracted color");
            group.push(PaletteColor {
                name: frame.name.clone(),
                color,
            });
        }
    }

    Ok(palette)
}

fn swatch_color(frame: &FigmaNode) -> Option<RgbaColor> {
    let fill = frame.fills.first()?;
    if fill.paint_type != SOLID {
        return None;
    }
    paint_color(fill)
}
