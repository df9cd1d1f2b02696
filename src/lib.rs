//! Extracts design tokens from a Figma file into CSS: a color palette as
//! custom properties and button components as themed, stateful rules.

pub mod color;
pub mod diff;
pub mod error;
pub mod extract;
pub mod figma;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod units;
pub mod walker;
