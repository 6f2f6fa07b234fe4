//! Color tables and group style presets.
//!
//! All values are static so the render layer never owns a mutable theme;
//! per-element overrides in the definition win over everything here.

use crate::model::{ConnectionKind, GroupStyle};
use crate::services::ServiceCategory;

/// Brand palette used by the default theme.
pub mod brand {
    pub const ORANGE: &str = "#FF9900";
    pub const ORANGE_DARK: &str = "#EC7211";
    pub const ORANGE_LIGHT: &str = "#FFBB00";
    pub const BLUE: &str = "#146EB4";
    pub const BLUE_DARK: &str = "#0F4A80";
    pub const BLUE_LIGHT: &str = "#1A8CDE";
    /// Dark background ("squid ink").
    pub const SQUID: &str = "#232F3E";
    pub const SMILE: &str = "#131A22";
    pub const WHITE: &str = "#FFFFFF";
}

/// Stroke color for a connection kind.
pub fn flow_color(kind: ConnectionKind) -> &'static str {
    match kind {
        ConnectionKind::Sync => "#3B82F6",
        ConnectionKind::Async => "#F59E0B",
        ConnectionKind::Stream => "#8B5CF6",
        ConnectionKind::Batch => "#10B981",
        ConnectionKind::Error => "#EF4444",
    }
}

/// Neutral stroke for connections that carry no kind information.
pub const FLOW_DEFAULT: &str = "#94A3B8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub dark: &'static str,
    pub background: &'static str,
}

pub fn category_palette(category: ServiceCategory) -> CategoryPalette {
    match category {
        ServiceCategory::Compute => CategoryPalette {
            primary: "#ED7100",
            secondary: "#F89A3C",
            dark: "#C85A00",
            background: "rgba(237, 113, 0, 0.1)",
        },
        ServiceCategory::Database => CategoryPalette {
            primary: "#3B48CC",
            secondary: "#5C6BD4",
            dark: "#2A35A0",
            background: "rgba(59, 72, 204, 0.1)",
        },
        ServiceCategory::Networking => CategoryPalette {
            primary: "#8C4FFF",
            secondary: "#A77BFF",
            dark: "#6B38CC",
            background: "rgba(140, 79, 255, 0.1)",
        },
        ServiceCategory::Storage => CategoryPalette {
            primary: "#3F8624",
            secondary: "#5FA642",
            dark: "#2D6618",
            background: "rgba(63, 134, 36, 0.1)",
        },
        ServiceCategory::Messaging | ServiceCategory::Monitoring => CategoryPalette {
            primary: "#E7157B",
            secondary: "#EE4A9B",
            dark: "#B80F60",
            background: "rgba(231, 21, 123, 0.1)",
        },
        ServiceCategory::Security => CategoryPalette {
            primary: "#DD344C",
            secondary: "#E55D71",
            dark: "#B02A3E",
            background: "rgba(221, 52, 76, 0.1)",
        },
    }
}

/// Default look for a group box; definition-level `color`,
/// `backgroundColor` and `borderStyle` override individual fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPreset {
    pub background: &'static str,
    pub border: &'static str,
    pub border_style: &'static str,
    pub label_background: &'static str,
}

pub fn group_preset(style: GroupStyle) -> GroupPreset {
    match style {
        GroupStyle::Cloud => GroupPreset {
            background: "transparent",
            border: "#232F3E",
            border_style: "solid",
            label_background: "#232F3E",
        },
        GroupStyle::Vpc => GroupPreset {
            background: "transparent",
            border: "#8C4FFF",
            border_style: "solid",
            label_background: "transparent",
        },
        GroupStyle::Az => GroupPreset {
            background: "rgba(232, 244, 248, 0.5)",
            border: "#147EB4",
            border_style: "dashed",
            label_background: "transparent",
        },
        GroupStyle::Subnet => GroupPreset {
            background: "rgba(232, 244, 248, 0.7)",
            border: "#00A4A6",
            border_style: "dashed",
            label_background: "transparent",
        },
        GroupStyle::Region => GroupPreset {
            background: "#F5F5F5",
            border: "#147EB4",
            border_style: "dashed",
            label_background: "transparent",
        },
        GroupStyle::Custom => GroupPreset {
            background: "transparent",
            border: "#6B7280",
            border_style: "dashed",
            label_background: "transparent",
        },
    }
}

/// Status indicator colors (badges, health dots).
pub mod status {
    pub const HEALTHY: &str = "#22C55E";
    pub const WARNING: &str = "#F59E0B";
    pub const ERROR: &str = "#EF4444";
    pub const UNKNOWN: &str = "#94A3B8";
    pub const PROCESSING: &str = "#3B82F6";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_colors_distinguish_the_three_main_kinds() {
        let sync = flow_color(ConnectionKind::Sync);
        let asy = flow_color(ConnectionKind::Async);
        let stream = flow_color(ConnectionKind::Stream);
        assert_ne!(sync, asy);
        assert_ne!(asy, stream);
        assert_ne!(sync, stream);
    }

    #[test]
    fn cloud_preset_uses_the_dark_brand_border() {
        let p = group_preset(GroupStyle::Cloud);
        assert_eq!(p.border, brand::SQUID);
        assert_eq!(p.border_style, "solid");
    }
}
