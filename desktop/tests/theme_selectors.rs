#![cfg(test)]
/*!
Selector lint for the shared theme embedded in the desktop build.

Components in `ui` rely on these classes; a rename in the stylesheet without
the matching markup change would silently unstyle the packaged app. When a
selector is renamed on purpose, update the component and this list together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const SIDEBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Layout
    ":root",
    "body {",
    ".app-shell",
    ".app-main",
    ".page {",
    ".divider",
    // Cards
    ".dashboard-card",
    ".dashboard-card--error",
    ".dashboard-card__placeholder",
    // Podium & percentiles
    ".podium",
    ".podium__card",
    ".podium__medal",
    ".percentiles",
    ".percentiles__card",
    ".percentiles__value",
    // Leaderboard table
    ".leaderboard-table",
    ".leaderboard-table__scroll",
    ".leaderboard-table__gap",
    ".last-updated",
    // History chart
    ".history-chart",
    ".history-chart__legend",
    ".history-chart__swatch--dashed",
    ".history-chart__reset",
    ".history-chart__guide",
    ".history-chart__overlay",
    ".history-chart__tooltip",
    // Responsive block
    "@media (max-width: 720px)",
];

const REQUIRED_SIDEBAR_SELECTORS: &[&str] = &[
    ".sidebar {",
    ".sidebar__tabs",
    ".sidebar__tab {",
    ".sidebar__tab--active",
    ".sidebar__refresh",
    ".sidebar__locale",
];

fn missing<'a>(css: &str, selectors: &[&'a str]) -> Vec<&'a str> {
    selectors
        .iter()
        .copied()
        .filter(|sel| !css.contains(sel))
        .collect()
}

#[test]
fn unified_theme_contains_required_selectors() {
    let gone = missing(THEME_CSS, REQUIRED_SELECTORS);
    assert!(gone.is_empty(), "theme is missing selectors:\n{}", gone.join("\n"));
}

#[test]
fn sidebar_stylesheet_contains_required_selectors() {
    let gone = missing(SIDEBAR_CSS, REQUIRED_SIDEBAR_SELECTORS);
    assert!(gone.is_empty(), "sidebar css is missing selectors:\n{}", gone.join("\n"));
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "embedded theme is unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}
