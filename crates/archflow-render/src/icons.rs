//! Built-in vector icon set.
//!
//! One 80x80 body per service category, tinted with the category accent.
//! Unknown icon ids resolve to the question-mark fallback so a definition
//! with a bad `icon` override still renders.

pub fn icon_body(name: &str) -> &'static str {
    match name {
        "compute" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #ED7100; stroke-width: 0px;"/><rect x="22" y="22" width="36" height="36" rx="3" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><rect x="32" y="32" width="16" height="16" style="fill: #fff; stroke-width: 0px;"/><line x1="30" y1="14" x2="30" y2="22" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="40" y1="14" x2="40" y2="22" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="50" y1="14" x2="50" y2="22" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="30" y1="58" x2="30" y2="66" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="40" y1="58" x2="40" y2="66" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="50" y1="58" x2="50" y2="66" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="14" y1="30" x2="22" y2="30" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="14" y1="40" x2="22" y2="40" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="14" y1="50" x2="22" y2="50" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="58" y1="30" x2="66" y2="30" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="58" y1="40" x2="66" y2="40" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="58" y1="50" x2="66" y2="50" style="stroke: #fff; stroke-width: 2.5px;"/></g>"#
        }
        "database" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #3B48CC; stroke-width: 0px;"/><ellipse cx="40" cy="22" rx="20" ry="7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><path d="m20,34c0,3.9,9,7,20,7s20-3.1,20-7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><path d="m20,46c0,3.9,9,7,20,7s20-3.1,20-7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><path d="m20,58c0,3.9,9,7,20,7s20-3.1,20-7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><line x1="20" y1="22" x2="20" y2="58" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="60" y1="22" x2="60" y2="58" style="stroke: #fff; stroke-width: 2.5px;"/></g>"#
        }
        "networking" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #8C4FFF; stroke-width: 0px;"/><circle cx="40" cy="22" r="7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><circle cx="20" cy="58" r="7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><circle cx="60" cy="58" r="7" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><line x1="36" y1="28" x2="24" y2="52" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="44" y1="28" x2="56" y2="52" style="stroke: #fff; stroke-width: 2.5px;"/><line x1="27" y1="58" x2="53" y2="58" style="stroke: #fff; stroke-width: 2.5px;"/></g>"#
        }
        "storage" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #3F8624; stroke-width: 0px;"/><rect x="18" y="18" width="44" height="14" rx="2" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><rect x="18" y="33" width="44" height="14" rx="2" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><rect x="18" y="48" width="44" height="14" rx="2" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><circle cx="25" cy="25" r="1.5" style="fill: #fff;"/><circle cx="25" cy="40" r="1.5" style="fill: #fff;"/><circle cx="25" cy="55" r="1.5" style="fill: #fff;"/></g>"#
        }
        "messaging" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #E7157B; stroke-width: 0px;"/><rect x="16" y="24" width="48" height="32" rx="3" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><polyline points="16,28 40,46 64,28" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/></g>"#
        }
        "security" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #DD344C; stroke-width: 0px;"/><path d="m40,14l22,8v16c0,13-9,24-22,28-13-4-22-15-22-28v-16l22-8Z" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><polyline points="30,40 37,47 51,32" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/></g>"#
        }
        "monitoring" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #E7157B; stroke-width: 0px;"/><polyline points="14,48 28,48 34,30 44,58 50,40 66,40" style="fill: none; stroke: #fff; stroke-miterlimit: 10; stroke-width: 2.5px;"/><circle cx="66" cy="40" r="3" style="fill: #fff;"/></g>"#
        }
        "blank" => r#"<g><rect width="80" height="80" rx="8" style="fill: #94A3B8; stroke-width: 0px;"/></g>"#,
        "unknown" => {
            r#"<g><rect width="80" height="80" rx="8" style="fill: #94A3B8; stroke-width: 0px;"/><text transform="translate(24 62)" style="fill: #fff; font-family: ArialMT, Arial; font-size: 58px;"><tspan x="0" y="0">?</tspan></text></g>"#
        }
        _ => icon_body("unknown"),
    }
}

pub fn icon_svg(name: &str, size_px: f64) -> String {
    let body = icon_body(name);
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 80 80">{body}</svg>"#,
        w = crate::svg::fmt(size_px),
        h = crate::svg::fmt(size_px),
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_the_question_mark() {
        assert_eq!(icon_body("no-such-icon"), icon_body("unknown"));
        assert_ne!(icon_body("compute"), icon_body("unknown"));
    }

    #[test]
    fn every_category_has_a_distinct_body() {
        let names = [
            "compute",
            "database",
            "networking",
            "storage",
            "messaging",
            "security",
            "monitoring",
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(icon_body(a), icon_body(b), "{a} vs {b}");
            }
        }
    }
}
