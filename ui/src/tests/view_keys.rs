//! Components holding per-category interaction state must be keyed by the
//! category, or Dioxus reuses them (and their signals) across navigation.

const CATEGORY_VIEW: &str = include_str!("../views/category.rs");

#[test]
fn history_chart_is_keyed_by_leaderboard() {
    let compact: String = CATEGORY_VIEW.split_whitespace().collect();
    assert!(
        compact.contains("HistoryChartView{key:\"{leaderboard}\","),
        "HistoryChartView in CategoryPage must carry key: \"{{leaderboard}}\""
    );
}
