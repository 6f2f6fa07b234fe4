//! Declarative architecture schema.
//!
//! Definitions are authored externally (JSON or JSON5) and are read-only at
//! render time. Field names mirror the authored camelCase layout so existing
//! definition files load unchanged.

use crate::geom::{Point, Rect, Size, point, rect, size};
use crate::services::ServiceKind;
use serde::{Deserialize, Serialize};

/// Authored canvas coordinate. Converted to [`Point`] for geometry work.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        point(self.x, self.y)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Node footprint size. Each variant maps to fixed square pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl ServiceSize {
    pub fn dimensions(self) -> Size {
        match self {
            ServiceSize::Sm => size(60.0, 60.0),
            ServiceSize::Md => size(80.0, 80.0),
            ServiceSize::Lg => size(100.0, 100.0),
            ServiceSize::Xl => size(120.0, 120.0),
        }
    }
}

/// A positioned service node (an anchored box: top-left position + size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureService {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub size: ServiceSize,
    /// Short badge text rendered on the box corner (e.g. "HTTPS", "JWT").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon override; unknown ids fall back to the built-in category icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ArchitectureService {
    pub fn dims(&self) -> Size {
        self.size.dimensions()
    }

    pub fn bounds(&self) -> Rect {
        let d = self.dims();
        rect(self.position.x, self.position.y, d.width, d.height)
    }

    pub fn center(&self) -> Point {
        let d = self.dims();
        point(
            self.position.x + d.width / 2.0,
            self.position.y + d.height / 2.0,
        )
    }
}

/// Data-flow flavor of a connection; drives color, dash pattern and packet
/// styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Sync,
    Async,
    Stream,
    Batch,
    Error,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionKind::Sync => "sync",
            ConnectionKind::Async => "async",
            ConnectionKind::Stream => "stream",
            ConnectionKind::Batch => "batch",
            ConnectionKind::Error => "error",
        }
    }
}

/// Connector path shape between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Straight,
    #[default]
    Curved,
    Orthogonal,
}

/// Directed edge between two services, referenced by id.
///
/// Both endpoints must resolve to services in the same definition; a
/// connection that does not resolve is skipped at render time rather than
/// reported (malformed definitions degrade, they do not fail).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Animation step this connection belongs to; defaults to declaration
    /// order when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<usize>,
    #[serde(default)]
    pub path_type: PathType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curvature: Option<f64>,
    #[serde(default)]
    pub bidirectional: bool,
}

/// Visual preset for a group container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupStyle {
    #[serde(alias = "aws-cloud")]
    Cloud,
    Vpc,
    Az,
    Subnet,
    Region,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    #[default]
    Dashed,
}

/// Explicit rectangle for a group, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GroupBounds {
    pub fn to_rect(self) -> Rect {
        rect(self.x, self.y, self.width, self.height)
    }
}

/// Rectangular container grouping a subset of services (network boundary,
/// availability zone, ...). Bounds are either explicit or derived from the
/// member services; a group that yields neither is skipped at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GroupBounds>,
    #[serde(default)]
    pub style: GroupStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    /// Layering order; lower values render behind higher ones.
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub show_icon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Serverless,
    Containers,
    DataPipeline,
    MachineLearning,
    WebApplication,
    Microservices,
    EventDriven,
    Iot,
    Security,
    Devops,
    Hybrid,
    Other,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Serverless => "Serverless",
            Category::Containers => "Containers",
            Category::DataPipeline => "Data Pipeline",
            Category::MachineLearning => "Machine Learning",
            Category::WebApplication => "Web Application",
            Category::Microservices => "Microservices",
            Category::EventDriven => "Event-Driven",
            Category::Iot => "IoT",
            Category::Security => "Security",
            Category::Devops => "DevOps",
            Category::Hybrid => "Hybrid",
            Category::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::NaiveDate>,
    /// Upstream reference the diagram was traced from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The aggregate root: a complete, immutable architecture description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Canvas>,
    pub services: Vec<ArchitectureService>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<LegendItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ArchitectureDefinition {
    pub fn canvas(&self) -> Canvas {
        self.canvas.unwrap_or_default()
    }

    pub fn service(&self, id: &str) -> Option<&ArchitectureService> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Number of animation steps: the highest explicit `sequence` + 1, or the
    /// connection count when no connection declares one.
    pub fn total_steps(&self) -> usize {
        let explicit = self
            .connections
            .iter()
            .filter_map(|c| c.sequence)
            .max()
            .map(|s| s + 1);
        explicit.unwrap_or(self.connections.len())
    }
}
