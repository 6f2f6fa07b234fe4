//! Scene composition.
//!
//! Resolves the declarative definition against an optional playback
//! snapshot. Unresolvable pieces (a connection endpoint or group that names
//! no known service) are logged and dropped rather than failing the whole
//! render; loaders catch these problems earlier when strictness is wanted.

use crate::scene::{EdgeLine, GroupBox, LegendEntry, NodeBox, Scene};
use crate::{ActivationMode, SceneOptions};
use archflow_core::model::{ArchitectureDefinition, PathType};
use archflow_core::paths::{self, DEFAULT_CURVATURE, OrthogonalDirection, bounding_box};
use archflow_core::playback::PlaybackState;
use archflow_core::theme;
use archflow_core::ArchitectureService;
use rustc_hash::FxHashMap;

/// Extra room around member bounds when a group has no explicit rectangle.
/// The top margin is larger to leave space for the group label.
const GROUP_MARGIN: f64 = 30.0;
const GROUP_LABEL_MARGIN: f64 = 40.0;

pub fn build_scene(
    definition: &ArchitectureDefinition,
    state: Option<&PlaybackState>,
    options: &SceneOptions,
) -> Scene {
    let by_id: FxHashMap<&str, &ArchitectureService> = definition
        .services
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();

    let canvas = definition.canvas();
    let current_step = state.map(|s| s.current_step).unwrap_or(0);
    let is_playing = state.map(|s| s.is_playing).unwrap_or(false);

    let nodes = definition
        .services
        .iter()
        .map(|service| {
            let category = service.kind.category();
            NodeBox {
                id: service.id.clone(),
                label: service
                    .label
                    .clone()
                    .unwrap_or_else(|| service.kind.info().name.to_string()),
                kind: service.kind,
                category,
                bounds: service.bounds(),
                color: theme::category_palette(category).primary,
                icon: service
                    .icon
                    .clone()
                    .unwrap_or_else(|| service.kind.icon_id().to_string()),
                badge: service.badge.clone(),
                description: service.description.clone(),
            }
        })
        .collect();

    let mut edges = Vec::with_capacity(definition.connections.len());
    for (index, conn) in definition.connections.iter().enumerate() {
        let (Some(from), Some(to)) = (
            by_id.get(conn.from.as_str()),
            by_id.get(conn.to.as_str()),
        ) else {
            tracing::warn!(
                definition = %definition.id,
                connection = %conn.id,
                "skipping connection with unresolvable endpoint"
            );
            continue;
        };

        let endpoints = paths::connection_endpoints(from.bounds(), to.bounds());
        let path = match conn.path_type {
            PathType::Straight => paths::straight_path(endpoints.from, endpoints.to),
            PathType::Curved => paths::curved_path(
                endpoints.from,
                endpoints.to,
                conn.curvature.unwrap_or(DEFAULT_CURVATURE),
            ),
            PathType::Orthogonal => paths::orthogonal_path(
                endpoints.from,
                endpoints.to,
                OrthogonalDirection::default(),
            ),
        };

        let step = conn.sequence.unwrap_or(index);
        let active = match (options.activation, state) {
            (_, None) => false,
            (ActivationMode::Global, Some(s)) => s.is_playing,
            (ActivationMode::Staged, Some(s)) => step == s.current_step,
        };

        edges.push(EdgeLine {
            id: conn.id.clone(),
            from: conn.from.clone(),
            to: conn.to.clone(),
            kind: conn.kind,
            path_type: conn.path_type,
            path,
            color: theme::flow_color(conn.kind).to_string(),
            label: conn.label.clone(),
            step,
            active,
            bidirectional: conn.bidirectional,
        });
    }

    let mut groups = Vec::with_capacity(definition.groups.len());
    for group in &definition.groups {
        let bounds = match group.bounds {
            Some(b) => b.to_rect(),
            None => {
                let members: Vec<_> = group
                    .service_ids
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()))
                    .map(|s| s.bounds())
                    .collect();
                if members.is_empty() {
                    tracing::warn!(
                        definition = %definition.id,
                        group = %group.id,
                        "skipping group with no bounds and no resolvable members"
                    );
                    continue;
                }
                let inner = bounding_box(members);
                paths::rect_with_margins(inner, GROUP_MARGIN, GROUP_LABEL_MARGIN)
            }
        };

        let preset = theme::group_preset(group.style);
        groups.push(GroupBox {
            id: group.id.clone(),
            label: group.label.clone(),
            style: group.style,
            bounds,
            background: group
                .background_color
                .clone()
                .unwrap_or_else(|| preset.background.to_string()),
            border: group
                .color
                .clone()
                .unwrap_or_else(|| preset.border.to_string()),
            border_style: group
                .border_style
                .map(|b| match b {
                    archflow_core::BorderStyle::Solid => "solid".to_string(),
                    archflow_core::BorderStyle::Dashed => "dashed".to_string(),
                })
                .unwrap_or_else(|| preset.border_style.to_string()),
            label_background: preset.label_background.to_string(),
            z_index: group.z_index,
            show_icon: group.show_icon,
        });
    }
    groups.sort_by_key(|g| g.z_index);

    let legend = definition
        .legend
        .iter()
        .map(|item| LegendEntry {
            kind: item.kind,
            label: item.label.clone(),
            color: item
                .color
                .clone()
                .unwrap_or_else(|| theme::flow_color(item.kind).to_string()),
        })
        .collect();

    Scene {
        definition_id: definition.id.clone(),
        name: definition.name.clone(),
        width: canvas.width,
        height: canvas.height,
        groups,
        edges,
        nodes,
        legend,
        total_steps: definition.total_steps(),
        current_step,
        is_playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archflow_core::{Engine, LoadOptions};

    fn demo() -> ArchitectureDefinition {
        let text = r#"{
            "id": "demo", "name": "Demo", "category": "other",
            "services": [
                {"id": "a", "type": "lambda", "position": {"x": 0, "y": 0}},
                {"id": "b", "type": "sqs", "position": {"x": 200, "y": 0}},
                {"id": "c", "type": "dynamodb", "position": {"x": 400, "y": 0}}
            ],
            "connections": [
                {"id": "ab", "from": "a", "to": "b", "type": "async"},
                {"id": "bx", "from": "b", "to": "X", "type": "sync"},
                {"id": "bc", "from": "b", "to": "c", "type": "sync"}
            ],
            "groups": [
                {"id": "g1", "label": "Backend", "serviceIds": ["b", "c"]},
                {"id": "g2", "label": "Ghost", "serviceIds": ["nope"]}
            ]
        }"#;
        Engine::empty()
            .load_definition_sync(text, LoadOptions::lenient())
            .unwrap()
    }

    #[test]
    fn unresolvable_connections_and_groups_are_dropped() {
        let scene = build_scene(&demo(), None, &SceneOptions::default());
        let edge_ids: Vec<&str> = scene.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edge_ids, ["ab", "bc"]);
        assert_eq!(scene.groups.len(), 1);
        assert_eq!(scene.groups[0].id, "g1");
        assert_eq!(scene.nodes.len(), 3);
    }

    #[test]
    fn derived_group_bounds_cover_members_with_margins() {
        let scene = build_scene(&demo(), None, &SceneOptions::default());
        let g = &scene.groups[0];
        // Members at x 200..480 (md boxes are 80 wide), y 0..80.
        assert_eq!(g.bounds.origin.x, 200.0 - GROUP_MARGIN);
        assert_eq!(g.bounds.origin.y, -GROUP_LABEL_MARGIN);
        assert_eq!(g.bounds.size.width, 280.0 + 2.0 * GROUP_MARGIN);
        assert_eq!(g.bounds.size.height, 80.0 + GROUP_LABEL_MARGIN + GROUP_MARGIN);
    }

    #[test]
    fn staged_activation_highlights_the_current_step_only() {
        let mut state = PlaybackState {
            is_playing: true,
            is_paused: false,
            speed: 1.0,
            current_step: 2,
            total_steps: 3,
            progress: 100.0,
        };
        let options = SceneOptions {
            activation: ActivationMode::Staged,
        };
        // Steps default to declaration order; the dangling edge at index 1
        // is dropped but keeps its step number.
        let scene = build_scene(&demo(), Some(&state), &options);
        let active: Vec<&str> = scene
            .edges
            .iter()
            .filter(|e| e.active)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(active, ["bc"]);

        state.current_step = 0;
        let scene = build_scene(&demo(), Some(&state), &options);
        let active: Vec<&str> = scene
            .edges
            .iter()
            .filter(|e| e.active)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(active, ["ab"]);
    }

    #[test]
    fn global_activation_follows_is_playing() {
        let state = PlaybackState {
            is_playing: true,
            is_paused: false,
            speed: 1.0,
            current_step: 0,
            total_steps: 3,
            progress: 0.0,
        };
        let scene = build_scene(&demo(), Some(&state), &SceneOptions::default());
        assert!(scene.edges.iter().all(|e| e.active));
        let scene = build_scene(&demo(), None, &SceneOptions::default());
        assert!(scene.edges.iter().all(|e| !e.active));
    }

    #[test]
    fn groups_paint_back_to_front() {
        let text = r#"{
            "id": "z", "name": "Z", "category": "other",
            "services": [{"id": "a", "type": "lambda", "position": {"x": 0, "y": 0}}],
            "groups": [
                {"id": "inner", "label": "inner", "bounds": {"x": 10, "y": 10, "width": 50, "height": 50}, "zIndex": 2},
                {"id": "outer", "label": "outer", "bounds": {"x": 0, "y": 0, "width": 100, "height": 100}, "zIndex": 0}
            ]
        }"#;
        let def = Engine::empty()
            .load_definition_sync(text, LoadOptions::lenient())
            .unwrap();
        let scene = build_scene(&def, None, &SceneOptions::default());
        let order: Vec<&str> = scene.groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(order, ["outer", "inner"]);
    }
}
