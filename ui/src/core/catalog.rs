//! Leaderboard categories, their colours and icons.

pub const OVERVIEW: &str = "Overview";

/// Navigation tabs in sidebar order. The first entry is the landing view.
pub const TABS: &[&str] = &[
    OVERVIEW,
    "Hay",
    "Hay Single",
    "Wood",
    "Wood Single",
    "Carrots",
    "Carrots Single",
    "Pumpkins",
    "Pumpkins Single",
    "Cactus",
    "Cactus Single",
    "Maze",
    "Maze Single",
    "Sunflowers",
    "Sunflowers Single",
    "Dinosaur",
    "Fastest Reset",
];

pub const DEFAULT_COLOR: &str = "#1f77b4";
const DEFAULT_ICON: &str = "👨‍🌾";

/// Keyed by the first word of the category name.
const COLORS: &[(&str, &str)] = &[
    ("Hay", "#DAA520"),
    ("Wood", "#8B4513"),
    ("Carrots", "#FFB347"),
    ("Pumpkins", "#FFA500"),
    ("Cactus", "#2E8B57"),
    ("Maze", "#006400"),
    ("Sunflowers", "#FFD700"),
    ("Dinosaur", "#808080"),
    ("Fastest", "#DC143C"),
];

const ICONS: &[(&str, &str)] = &[
    ("Hay", "🌾"),
    ("Wood", "🌲"),
    ("Carrots", "🥕"),
    ("Pumpkins", "🎃"),
    ("Cactus", "🌵"),
    ("Maze", "🧩"),
    ("Sunflowers", "🌻"),
    ("Dinosaur", "🦴"),
    ("Fastest", "⏩"),
];

fn family(leaderboard: &str) -> &str {
    leaderboard.split_whitespace().next().unwrap_or("")
}

fn lookup(table: &[(&str, &'static str)], leaderboard: &str) -> Option<&'static str> {
    let key = family(leaderboard);
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn leaderboard_color(leaderboard: &str) -> &'static str {
    lookup(COLORS, leaderboard).unwrap_or(DEFAULT_COLOR)
}

pub fn leaderboard_icon(leaderboard: &str) -> &'static str {
    lookup(ICONS, leaderboard).unwrap_or(DEFAULT_ICON)
}

/// Categories shown on the overview page (every tab except Overview itself).
pub fn categories() -> impl Iterator<Item = &'static str> {
    TABS.iter().copied().filter(|tab| *tab != OVERVIEW)
}

/// Map a navigation value (e.g. the `leaderboard` query parameter) to a known
/// tab. Unknown or missing values fall back to the overview.
pub fn resolve_leaderboard(requested: Option<&str>) -> &'static str {
    let Some(raw) = requested else {
        return OVERVIEW;
    };
    let wanted = raw.replace("%20", " ").replace('+', " ");
    let wanted = wanted.trim();
    TABS.iter()
        .copied()
        .find(|tab| *tab == wanted)
        .unwrap_or(OVERVIEW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tabs_resolve_to_themselves() {
        assert_eq!(resolve_leaderboard(Some("Hay Single")), "Hay Single");
        assert_eq!(resolve_leaderboard(Some("Hay+Single")), "Hay Single");
        assert_eq!(resolve_leaderboard(Some("Hay%20Single")), "Hay Single");
        assert_eq!(resolve_leaderboard(Some("Fastest Reset")), "Fastest Reset");
    }

    #[test]
    fn unknown_or_missing_tabs_fall_back_to_overview() {
        assert_eq!(resolve_leaderboard(None), OVERVIEW);
        assert_eq!(resolve_leaderboard(Some("")), OVERVIEW);
        assert_eq!(resolve_leaderboard(Some("hay")), OVERVIEW);
        assert_eq!(resolve_leaderboard(Some("Potatoes")), OVERVIEW);
    }

    #[test]
    fn colors_and_icons_follow_category_family() {
        assert_eq!(leaderboard_color("Hay Single"), "#DAA520");
        assert_eq!(leaderboard_color("Fastest Reset"), "#DC143C");
        assert_eq!(leaderboard_color("Overview"), DEFAULT_COLOR);
        assert_eq!(leaderboard_icon("Maze Single"), "🧩");
        assert_eq!(leaderboard_icon("Unknown"), DEFAULT_ICON);
    }

    #[test]
    fn overview_is_not_a_category() {
        assert!(categories().all(|c| c != OVERVIEW));
        assert_eq!(categories().count(), TABS.len() - 1);
    }
}
