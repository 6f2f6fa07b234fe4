//! Resolved scene model.
//!
//! A [`Scene`] is the output of composition: every id resolved, every path
//! computed, every color decided. It is plain data so hosts can serialize
//! it, diff it in tests, or feed it to a writer other than the SVG one.

use archflow_core::geom::Rect;
use archflow_core::model::{ConnectionKind, GroupStyle, PathType};
use archflow_core::paths::PathSpec;
use archflow_core::services::{ServiceCategory, ServiceKind};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub definition_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Back-to-front paint order (sorted by z-index).
    pub groups: Vec<GroupBox>,
    pub edges: Vec<EdgeLine>,
    pub nodes: Vec<NodeBox>,
    pub legend: Vec<LegendEntry>,
    pub total_steps: usize,
    pub current_step: usize,
    pub is_playing: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeBox {
    pub id: String,
    pub label: String,
    pub kind: ServiceKind,
    pub category: ServiceCategory,
    #[serde(skip)]
    pub bounds: Rect,
    /// Category accent color (hex).
    pub color: &'static str,
    pub icon: String,
    pub badge: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeLine {
    pub id: String,
    pub from: String,
    pub to: String,
    pub kind: ConnectionKind,
    pub path_type: PathType,
    #[serde(skip)]
    pub path: PathSpec,
    pub color: String,
    pub label: Option<String>,
    /// Animation step this edge belongs to.
    pub step: usize,
    pub active: bool,
    pub bidirectional: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupBox {
    pub id: String,
    pub label: String,
    pub style: GroupStyle,
    #[serde(skip)]
    pub bounds: Rect,
    pub background: String,
    pub border: String,
    pub border_style: String,
    pub label_background: String,
    pub z_index: i32,
    pub show_icon: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub kind: ConnectionKind,
    pub label: String,
    pub color: String,
}
