#![forbid(unsafe_code)]

//! Scene composition and SVG output for architecture diagrams.
//!
//! Two stages: [`build_scene`] resolves a definition (plus an optional
//! playback snapshot) into plain scene data, and [`write_svg`] serializes
//! that scene. Hosts that want another output format stop after the first
//! stage.

pub mod icons;
pub mod layout;
pub mod scene;
pub mod svg;

pub use layout::build_scene;
pub use scene::{EdgeLine, GroupBox, LegendEntry, NodeBox, Scene};
pub use svg::{sanitize_svg_id, write_svg};

use archflow_core::model::ArchitectureDefinition;
use archflow_core::playback::PlaybackState;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// How edges react to playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationMode {
    /// Every edge is active while playback is running.
    #[default]
    Global,
    /// Only edges whose step matches the current playback step are active.
    Staged,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    pub activation: ActivationMode,
}

#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub background: Option<String>,
    pub include_icons: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            background: None,
            include_icons: true,
        }
    }
}

/// One-call composition + serialization.
pub fn render_svg(
    definition: &ArchitectureDefinition,
    state: Option<&PlaybackState>,
    scene_options: &SceneOptions,
    svg_options: &SvgOptions,
) -> Result<String> {
    let scene = build_scene(definition, state, scene_options);
    write_svg(&scene, svg_options)
}
