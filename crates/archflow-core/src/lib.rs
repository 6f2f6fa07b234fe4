//! Declarative cloud-architecture diagrams (headless).
//!
//! Design goals:
//! - pure, deterministic geometry and playback (no timers, no host runtime)
//! - definitions authored as data (JSON/JSON5), validated on load
//! - runtime-agnostic async APIs (no specific executor required)
//!
//! The crate models a diagram as an [`ArchitectureDefinition`] (services,
//! connections, groups, legend), computes connector geometry in [`paths`],
//! and steps animations with the clock-free [`playback`] machine. Rendering
//! lives in a separate crate layered on top of this one.

#![forbid(unsafe_code)]

pub mod error;
pub mod geom;
pub mod model;
pub mod paths;
pub mod playback;
pub mod registry;
pub mod services;
pub mod theme;

pub use error::{Error, Result};
pub use model::{
    ArchitectureDefinition, ArchitectureService, BorderStyle, Canvas, Category, Connection,
    ConnectionKind, Group, GroupBounds, GroupStyle, LegendItem, Metadata, PathType, Position,
    ServiceSize,
};
pub use playback::{Playback, PlaybackOptions, PlaybackState, SPEED_PRESETS};
pub use registry::Registry;
pub use services::{ServiceCategory, ServiceInfo, ServiceKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// When set, dangling references (a connection endpoint or a group
    /// member naming no service) fail the load instead of being logged and
    /// left for the render layer to skip.
    pub strict_references: bool,
}

impl LoadOptions {
    /// Strict loading: reference problems are returned as errors.
    pub fn strict() -> Self {
        Self {
            strict_references: true,
        }
    }

    /// Lenient loading: reference problems are logged; render layers skip
    /// the affected elements.
    pub fn lenient() -> Self {
        Self {
            strict_references: false,
        }
    }
}

/// Entry point tying the catalog and the definition loader together.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// An engine preloaded with the built-in catalog.
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
        }
    }

    /// An engine with no built-in definitions.
    pub fn empty() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn architecture(&self, id: &str) -> Result<&ArchitectureDefinition> {
        self.registry.require(id)
    }

    /// Parses and validates a definition from JSON, falling back to JSON5
    /// for hand-authored files (comments, trailing commas, bare keys).
    pub fn load_definition_sync(
        &self,
        text: &str,
        options: LoadOptions,
    ) -> Result<ArchitectureDefinition> {
        let definition = match serde_json::from_str::<ArchitectureDefinition>(text) {
            Ok(def) => def,
            Err(json_err) => json5::from_str::<ArchitectureDefinition>(text).map_err(|_| {
                // The JSON error names a line/column; the json5 one rarely
                // does. Prefer the former for strict-JSON inputs.
                if text.trim_start().starts_with('{') {
                    Error::Json(json_err)
                } else {
                    Error::Json5 {
                        message: "input is neither valid JSON nor JSON5".to_string(),
                    }
                }
            })?,
        };
        validate(&definition, options)?;
        Ok(definition)
    }

    pub async fn load_definition(
        &self,
        text: &str,
        options: LoadOptions,
    ) -> Result<ArchitectureDefinition> {
        self.load_definition_sync(text, options)
    }

    /// Loads a definition and registers it in the catalog, replacing any
    /// existing entry with the same id.
    pub fn install_definition_sync(
        &mut self,
        text: &str,
        options: LoadOptions,
    ) -> Result<&ArchitectureDefinition> {
        let definition = self.load_definition_sync(text, options)?;
        let id = definition.id.clone();
        self.registry.register(definition);
        self.registry.require(&id)
    }

    pub async fn install_definition(
        &mut self,
        text: &str,
        options: LoadOptions,
    ) -> Result<&ArchitectureDefinition> {
        self.install_definition_sync(text, options)
    }
}

fn definition_error(definition_id: &str, message: impl Into<String>) -> Error {
    Error::Definition {
        definition_id: definition_id.to_string(),
        message: message.into(),
    }
}

/// Structural validation.
///
/// Problems that make a definition unusable (empty or duplicate ids,
/// non-finite coordinates) always fail. Dangling references only fail under
/// [`LoadOptions::strict`]; otherwise they are logged here and skipped by
/// render layers, so a partially broken definition still produces a diagram.
fn validate(def: &ArchitectureDefinition, options: LoadOptions) -> Result<()> {
    if def.id.is_empty() {
        return Err(definition_error("<unnamed>", "definition id is empty"));
    }

    let mut seen = rustc_hash::FxHashSet::default();
    for service in &def.services {
        if service.id.is_empty() {
            return Err(definition_error(&def.id, "service with empty id"));
        }
        if !seen.insert(service.id.as_str()) {
            return Err(definition_error(
                &def.id,
                format!("duplicate service id: {}", service.id),
            ));
        }
        if !service.position.x.is_finite() || !service.position.y.is_finite() {
            return Err(definition_error(
                &def.id,
                format!("service {} has a non-finite position", service.id),
            ));
        }
    }

    let mut conn_ids = rustc_hash::FxHashSet::default();
    for conn in &def.connections {
        if !conn_ids.insert(conn.id.as_str()) {
            return Err(definition_error(
                &def.id,
                format!("duplicate connection id: {}", conn.id),
            ));
        }
        for endpoint in [&conn.from, &conn.to] {
            if !seen.contains(endpoint.as_str()) {
                if options.strict_references {
                    return Err(definition_error(
                        &def.id,
                        format!("connection {} references unknown service {endpoint}", conn.id),
                    ));
                }
                tracing::warn!(
                    definition = %def.id,
                    connection = %conn.id,
                    service = %endpoint,
                    "connection references unknown service; it will not be rendered"
                );
            }
        }
    }

    for group in &def.groups {
        for member in &group.service_ids {
            if !seen.contains(member.as_str()) {
                if options.strict_references {
                    return Err(definition_error(
                        &def.id,
                        format!("group {} references unknown service {member}", group.id),
                    ));
                }
                tracing::warn!(
                    definition = %def.id,
                    group = %group.id,
                    service = %member,
                    "group references unknown service"
                );
            }
        }
    }

    Ok(())
}
