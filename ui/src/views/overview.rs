use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::components::app_navbar::tab_label;
use crate::core::catalog::categories;
use crate::leaderboard::{DashboardData, LastUpdated, LeaderboardTable, OVERVIEW_TOP_N};
use crate::t;

/// Top 10 of every category, one section each.
#[component]
pub fn Overview(data: DashboardData) -> Element {
    let now = OffsetDateTime::now_utc();

    rsx! {
        for leaderboard in categories() {
            section { key: "{leaderboard}", class: "dashboard-card overview-section",
                h2 { {t!("overview-section-title", board = tab_label(leaderboard))} }
                LeaderboardTable { rows: data.top_n(leaderboard, OVERVIEW_TOP_N), now }
                LastUpdated { at: data.last_updated(leaderboard), now }
            }
        }
    }
}
