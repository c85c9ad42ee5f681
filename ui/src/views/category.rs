use dioxus::prelude::*;
use time::{Duration, OffsetDateTime};

use crate::components::app_navbar::tab_label;
use crate::history::view::HistoryPlaceholder;
use crate::history::{build_history_chart, ChartOutcome, HistoryChartView, HistoryOptions};
use crate::leaderboard::{
    DashboardData, LastUpdated, LeaderboardTable, PercentileCards, Podium, CATEGORY_TOP_N,
    PODIUM_SIZE,
};
use crate::t;

#[component]
pub fn CategoryPage(
    leaderboard: String,
    data: DashboardData,
    hide_top_100: bool,
    history_window: Duration,
) -> Element {
    let now = OffsetDateTime::now_utc();
    let options = HistoryOptions {
        hide_top_100,
        window: history_window,
    };

    let history = build_history_chart(&data.over_time, &leaderboard, &options, now);

    rsx! {
        h1 { class: "page-dashboard__title",
            {t!("category-title", board = tab_label(&leaderboard))}
        }

        Podium { entries: data.top_n(&leaderboard, PODIUM_SIZE) }
        hr { class: "divider" }

        PercentileCards { summary: data.percentiles_for(&leaderboard).cloned() }
        hr { class: "divider" }

        section { class: "dashboard-card",
            h2 { {t!("history-title")} }
            match history {
                // Keyed so zoom and hover state reset when the category changes.
                ChartOutcome::Ready(chart) => rsx! { HistoryChartView { key: "{leaderboard}", chart } },
                ChartOutcome::Placeholder(notice) => rsx! { HistoryPlaceholder { notice } },
            }
        }

        section { class: "dashboard-card",
            h2 { {t!("leaderboard-title")} }
            LeaderboardTable { rows: data.top_n(&leaderboard, CATEGORY_TOP_N), now }
            LastUpdated { at: data.last_updated(&leaderboard), now }
        }
    }
}
