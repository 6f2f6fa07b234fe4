//! Catalog of architecture definitions.
//!
//! Ships with a small set of built-in diagrams (embedded at compile time)
//! and accepts runtime additions. Insertion order is preserved so catalog
//! listings are stable.

use crate::error::{Error, Result};
use crate::model::{ArchitectureDefinition, Category};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, ArchitectureDefinition>,
}

impl Registry {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog preloaded with the built-in definitions.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for source in [
            include_str!("../definitions/event-driven-orders.json"),
            include_str!("../definitions/microservices-ecommerce.json"),
            include_str!("../definitions/containerized-webapp.json"),
        ] {
            // Embedded definitions are validated by tests; a parse failure
            // here is a packaging bug, so it is reported loudly.
            match serde_json::from_str::<ArchitectureDefinition>(source) {
                Ok(def) => {
                    registry.register(def);
                }
                Err(err) => {
                    tracing::error!(error = %err, "skipping malformed built-in definition");
                }
            }
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchitectureDefinition> {
        self.entries.values()
    }

    pub fn get(&self, id: &str) -> Option<&ArchitectureDefinition> {
        self.entries.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&ArchitectureDefinition> {
        self.get(id).ok_or_else(|| Error::UnknownArchitecture {
            id: id.to_string(),
        })
    }

    /// Adds or replaces a definition keyed by its id. Replacement keeps the
    /// original catalog position. Returns the previous entry, if any.
    pub fn register(
        &mut self,
        definition: ArchitectureDefinition,
    ) -> Option<ArchitectureDefinition> {
        self.entries.insert(definition.id.clone(), definition)
    }

    pub fn by_category(&self, category: Category) -> Vec<&ArchitectureDefinition> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Definitions carrying `tag`, matched case-insensitively on both sides
    /// so runtime registrations with mixed-case tags stay findable.
    pub fn by_tag(&self, tag: &str) -> Vec<&ArchitectureDefinition> {
        let tag = tag.to_lowercase();
        self.iter()
            .filter(|d| d.tags.iter().any(|t| t.to_lowercase() == tag))
            .collect()
    }

    /// Case-insensitive substring search over name, description and tags.
    pub fn search(&self, query: &str) -> Vec<&ArchitectureDefinition> {
        let query = query.to_lowercase();
        self.iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&query)
                    || d.description.to_lowercase().contains(&query)
                    || d.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Every tag used by at least one definition, sorted and deduplicated.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .iter()
            .flat_map(|d| d.tags.iter().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }

    /// Categories with at least one definition, in catalog order.
    pub fn active_categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for def in self.iter() {
            if !seen.contains(&def.category) {
                seen.push(def.category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_load_and_are_listed_in_order() {
        let registry = Registry::builtin();
        let ids: Vec<&str> = registry.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "event-driven-orders",
                "microservices-ecommerce",
                "containerized-webapp"
            ]
        );
    }

    #[test]
    fn builtin_definitions_are_internally_consistent() {
        let registry = Registry::builtin();
        for def in registry.iter() {
            assert!(!def.services.is_empty(), "{} has no services", def.id);
            for conn in &def.connections {
                assert!(
                    def.service(&conn.from).is_some(),
                    "{}: {} has dangling from",
                    def.id,
                    conn.id
                );
                assert!(
                    def.service(&conn.to).is_some(),
                    "{}: {} has dangling to",
                    def.id,
                    conn.id
                );
            }
        }
    }

    #[test]
    fn require_reports_unknown_ids() {
        let registry = Registry::builtin();
        assert!(registry.require("event-driven-orders").is_ok());
        let err = registry.require("nope").unwrap_err();
        assert!(matches!(err, Error::UnknownArchitecture { .. }));
    }

    #[test]
    fn register_upserts_in_place() {
        let mut registry = Registry::builtin();
        let len = registry.len();
        let mut def = registry.get("event-driven-orders").cloned().unwrap();
        def.name = "Renamed".into();
        let previous = registry.register(def);
        assert!(previous.is_some());
        assert_eq!(registry.len(), len);
        assert_eq!(registry.get("event-driven-orders").unwrap().name, "Renamed");
        // Position unchanged.
        assert_eq!(
            registry.iter().next().map(|d| d.id.as_str()),
            Some("event-driven-orders")
        );
    }

    #[test]
    fn lookups_by_category_tag_and_text() {
        let registry = Registry::builtin();
        assert_eq!(registry.by_category(Category::Containers).len(), 1);
        assert_eq!(registry.by_tag("ECS").len(), 2);
        assert_eq!(registry.search("containerized").len(), 2);
        assert_eq!(registry.search("Order Processing").len(), 1);
        assert!(registry.all_tags().contains(&"eventbridge"));
        assert_eq!(registry.active_categories().len(), 3);
    }

    #[test]
    fn mixed_case_tags_stay_findable() {
        let mut registry = Registry::builtin();
        let mut def = registry.get("event-driven-orders").cloned().unwrap();
        def.id = "custom".into();
        def.tags = vec!["EventBridge".into(), "Fan-Out".into()];
        registry.register(def);

        assert_eq!(registry.by_tag("eventbridge").len(), 2);
        assert_eq!(registry.by_tag("FAN-OUT").len(), 1);
        assert!(
            registry
                .search("fan-out")
                .iter()
                .any(|d| d.id == "custom")
        );
    }
}
