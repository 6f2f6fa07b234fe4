//! SVG serialization of a composed [`Scene`].

use crate::scene::{EdgeLine, Scene};
use crate::{Error, Result, SvgOptions};
use archflow_core::geom::Point;
use archflow_core::model::ConnectionKind;
use archflow_core::paths::PathSpec;
use std::fmt::Write as _;

/// JS-style shortest round-trip float formatting, so numbers authored by
/// other tooling (e.g. `0.5`, `120`, not `120.0`) compare byte-for-byte.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v == 0.0 { 0.0 } else { v };
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reduces an arbitrary string to something usable as an XML id.
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "af-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_ok {
        out.insert_str(0, "af-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    out.trim_matches('-').to_string()
}

fn dash_array(kind: ConnectionKind) -> Option<&'static str> {
    match kind {
        ConnectionKind::Sync => None,
        ConnectionKind::Async => Some("8 4"),
        ConnectionKind::Stream => Some("2 4"),
        ConnectionKind::Batch => Some("12 6"),
        ConnectionKind::Error => Some("4 4"),
    }
}

fn path_d(path: &PathSpec) -> String {
    match path {
        PathSpec::Line { from, to } => format!(
            "M{},{} L{},{}",
            fmt(from.x),
            fmt(from.y),
            fmt(to.x),
            fmt(to.y)
        ),
        PathSpec::Cubic { from, c1, c2, to } => format!(
            "M{},{} C{},{} {},{} {},{}",
            fmt(from.x),
            fmt(from.y),
            fmt(c1.x),
            fmt(c1.y),
            fmt(c2.x),
            fmt(c2.y),
            fmt(to.x),
            fmt(to.y)
        ),
        PathSpec::Poly { points } => {
            let mut d = String::new();
            for (i, p) in points.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{},{}", cmd, fmt(p.x), fmt(p.y));
                if i + 1 < points.len() {
                    d.push(' ');
                }
            }
            d
        }
    }
}

fn edge_label_anchor(edge: &EdgeLine) -> Point {
    let from = edge.path.from_point();
    let to = edge.path.to_point();
    archflow_core::paths::point_along_line(from, to, 0.5)
}

pub fn write_svg(scene: &Scene, options: &SvgOptions) -> Result<String> {
    if !scene.width.is_finite()
        || !scene.height.is_finite()
        || scene.width <= 0.0
        || scene.height <= 0.0
    {
        return Err(Error::InvalidCanvas {
            width: scene.width,
            height: scene.height,
        });
    }

    let id = sanitize_svg_id(&scene.definition_id);
    let mut out = String::with_capacity(4096);

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{label}">"#,
        id = id,
        w = fmt(scene.width),
        h = fmt(scene.height),
        label = escape_xml(&scene.name)
    );
    let _ = write!(out, "<title>{}</title>", escape_xml(&scene.name));

    if let Some(background) = &options.background {
        let _ = write!(
            out,
            r#"<rect width="{w}" height="{h}" fill="{bg}"/>"#,
            w = fmt(scene.width),
            h = fmt(scene.height),
            bg = escape_xml(background)
        );
    }

    // One arrowhead per connection kind in use. `auto-start-reverse` lets
    // the same marker serve both ends of bidirectional edges.
    let mut kinds: Vec<ConnectionKind> = Vec::new();
    for edge in &scene.edges {
        if !kinds.contains(&edge.kind) {
            kinds.push(edge.kind);
        }
    }
    out.push_str("<defs>");
    for kind in &kinds {
        let color = archflow_core::theme::flow_color(*kind);
        let _ = write!(
            out,
            r#"<marker id="{id}-arrow-{kind}" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="7" markerHeight="7" orient="auto-start-reverse"><path d="M0,0 L10,5 L0,10 z" fill="{color}"/></marker>"#,
            id = id,
            kind = kind.as_str(),
            color = color
        );
    }
    out.push_str("</defs>");

    out.push_str(r#"<g class="groups">"#);
    for group in &scene.groups {
        let dash = if group.border_style == "dashed" {
            r#" stroke-dasharray="6 4""#
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<g class="group" data-group-id="{gid}"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="8" fill="{bg}" stroke="{border}" stroke-width="2"{dash}/>"#,
            gid = escape_xml(&group.id),
            x = fmt(group.bounds.origin.x),
            y = fmt(group.bounds.origin.y),
            w = fmt(group.bounds.size.width),
            h = fmt(group.bounds.size.height),
            bg = escape_xml(&group.background),
            border = escape_xml(&group.border),
            dash = dash
        );
        let label_fill = if group.label_background == "transparent" {
            group.border.as_str()
        } else {
            "#FFFFFF"
        };
        if group.label_background != "transparent" {
            let _ = write!(
                out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="18" rx="4" fill="{bg}"/>"#,
                x = fmt(group.bounds.origin.x + 8.0),
                y = fmt(group.bounds.origin.y + 6.0),
                w = fmt(8.0 + group.label.chars().count() as f64 * 7.0),
                bg = escape_xml(&group.label_background)
            );
        }
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" font-size="12" font-weight="500" fill="{fill}">{label}</text>"#,
            x = fmt(group.bounds.origin.x + 12.0),
            y = fmt(group.bounds.origin.y + 19.0),
            fill = escape_xml(label_fill),
            label = escape_xml(&group.label)
        );
        out.push_str("</g>");
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="edges">"#);
    for edge in &scene.edges {
        let dash = match dash_array(edge.kind) {
            Some(d) => format!(r#" stroke-dasharray="{d}""#),
            None => String::new(),
        };
        let marker_start = if edge.bidirectional {
            format!(r##" marker-start="url(#{id}-arrow-{kind})""##, id = id, kind = edge.kind.as_str())
        } else {
            String::new()
        };
        let (width, opacity, class) = if edge.active {
            ("2.5", "1", "edge active")
        } else {
            ("2", "0.45", "edge")
        };
        let _ = write!(
            out,
            r##"<path class="{class}" data-edge-id="{eid}" data-step="{step}" d="{d}" fill="none" stroke="{color}" stroke-width="{width}" opacity="{opacity}"{dash} marker-end="url(#{id}-arrow-{kind})"{marker_start}/>"##,
            class = class,
            eid = escape_xml(&edge.id),
            step = edge.step,
            d = path_d(&edge.path),
            color = escape_xml(&edge.color),
            width = width,
            opacity = opacity,
            dash = dash,
            id = id,
            kind = edge.kind.as_str(),
            marker_start = marker_start
        );
        if let Some(label) = &edge.label {
            let anchor = edge_label_anchor(edge);
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y}" font-size="11" text-anchor="middle" fill="{color}">{label}</text>"#,
                x = fmt(anchor.x),
                y = fmt(anchor.y - 6.0),
                color = escape_xml(&edge.color),
                label = escape_xml(label)
            );
        }
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &scene.nodes {
        let b = node.bounds;
        let _ = write!(
            out,
            r##"<g class="node" data-node-id="{nid}"><rect x="{x}" y="{y}" width="{w}" height="{h}" rx="10" fill="#FFFFFF" stroke="{color}" stroke-width="2"/>"##,
            nid = escape_xml(&node.id),
            x = fmt(b.origin.x),
            y = fmt(b.origin.y),
            w = fmt(b.size.width),
            h = fmt(b.size.height),
            color = node.color
        );
        if options.include_icons {
            let icon_size = b.size.width * 0.5;
            let _ = write!(
                out,
                r#"<svg x="{x}" y="{y}" width="{s}" height="{s}" viewBox="0 0 80 80">{body}</svg>"#,
                x = fmt(b.origin.x + (b.size.width - icon_size) / 2.0),
                y = fmt(b.origin.y + 8.0),
                s = fmt(icon_size),
                body = crate::icons::icon_body(&node.icon)
            );
        }
        let _ = write!(
            out,
            r##"<text x="{x}" y="{y}" font-size="12" font-weight="600" text-anchor="middle" fill="#1F2937">{label}</text>"##,
            x = fmt(b.origin.x + b.size.width / 2.0),
            y = fmt(b.origin.y + b.size.height - 10.0),
            label = escape_xml(&node.label)
        );
        if let Some(badge) = &node.badge {
            let _ = write!(
                out,
                r##"<g class="badge"><rect x="{x}" y="{y}" width="{w}" height="14" rx="7" fill="{color}"/><text x="{tx}" y="{ty}" font-size="9" text-anchor="middle" fill="#FFFFFF">{text}</text></g>"##,
                x = fmt(b.origin.x + b.size.width - 20.0),
                y = fmt(b.origin.y - 7.0),
                w = fmt(12.0 + badge.chars().count() as f64 * 5.0),
                color = node.color,
                tx = fmt(b.origin.x + b.size.width - 14.0 + badge.chars().count() as f64 * 2.5),
                ty = fmt(b.origin.y + 3.0),
                text = escape_xml(badge)
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");

    if !scene.legend.is_empty() {
        let row_height = 18.0;
        let base_y = scene.height - 12.0 - scene.legend.len() as f64 * row_height;
        out.push_str(r#"<g class="legend">"#);
        for (i, entry) in scene.legend.iter().enumerate() {
            let y = base_y + i as f64 * row_height;
            let dash = match dash_array(entry.kind) {
                Some(d) => format!(r#" stroke-dasharray="{d}""#),
                None => String::new(),
            };
            let _ = write!(
                out,
                r##"<line x1="16" y1="{y}" x2="44" y2="{y}" stroke="{color}" stroke-width="2.5"{dash}/><text x="52" y="{ty}" font-size="11" fill="#374151">{label}</text>"##,
                y = fmt(y),
                color = escape_xml(&entry.color),
                dash = dash,
                ty = fmt(y + 4.0),
                label = escape_xml(&entry.label)
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneOptions;
    use crate::layout::build_scene;
    use archflow_core::{Engine, LoadOptions};

    fn scene() -> Scene {
        let text = r#"{
            "id": "svg demo", "name": "SVG <Demo>", "category": "other",
            "canvas": {"width": 640, "height": 480},
            "services": [
                {"id": "a", "type": "lambda", "position": {"x": 40, "y": 40}, "badge": "v2"},
                {"id": "b", "type": "sqs", "position": {"x": 300, "y": 40}}
            ],
            "connections": [
                {"id": "ab", "from": "a", "to": "b", "type": "async", "label": "enqueue"}
            ],
            "legend": [{"type": "async", "label": "Async"}]
        }"#;
        let def = Engine::empty()
            .load_definition_sync(text, LoadOptions::strict())
            .unwrap();
        build_scene(&def, None, &SceneOptions::default())
    }

    #[test]
    fn produces_escaped_wellformed_document() {
        let svg = write_svg(&scene(), &SvgOptions::default()).unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("SVG &lt;Demo&gt;"));
        assert!(svg.contains(r#"viewBox="0 0 640 480""#));
        // Ids are sanitized for XML.
        assert!(svg.contains(r#"id="svg-demo""#));
    }

    #[test]
    fn edges_carry_kind_styling_and_markers() {
        let svg = write_svg(&scene(), &SvgOptions::default()).unwrap();
        assert!(svg.contains(r#"stroke-dasharray="8 4""#));
        assert!(svg.contains("-arrow-async"));
        assert!(svg.contains(">enqueue</text>"));
    }

    #[test]
    fn icons_can_be_disabled() {
        let options = SvgOptions {
            include_icons: false,
            ..SvgOptions::default()
        };
        let svg = write_svg(&scene(), &options).unwrap();
        assert!(!svg.contains(r#"viewBox="0 0 80 80""#));
    }

    #[test]
    fn rejects_degenerate_canvases() {
        let mut s = scene();
        s.width = 0.0;
        assert!(matches!(
            write_svg(&s, &SvgOptions::default()),
            Err(Error::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn sanitize_svg_id_normalizes_hostile_input() {
        assert_eq!(sanitize_svg_id("event-driven-orders"), "event-driven-orders");
        assert_eq!(sanitize_svg_id("  "), "af-untitled");
        assert_eq!(sanitize_svg_id("9lives"), "af-9lives");
        assert_eq!(sanitize_svg_id("a b//c"), "a-b-c");
    }

    #[test]
    fn js_number_formatting_drops_integral_suffix() {
        assert_eq!(fmt(120.0), "120");
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(f64::NAN), "0");
    }
}
