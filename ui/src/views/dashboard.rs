use dioxus::prelude::*;

use crate::core::catalog::{resolve_leaderboard, OVERVIEW};
use crate::core::config::DashboardConfig;
use crate::leaderboard::{DashboardState, RefreshToken};
use crate::t;
use crate::views::{CategoryPage, Overview};

/// Routed page: the overview or one category, chosen by the `leaderboard`
/// query value. Unknown values show the overview.
#[component]
pub fn Dashboard(leaderboard: String) -> Element {
    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    if let Some(token) = try_use_context::<RefreshToken>() {
        token.track();
    }

    let selected = resolve_leaderboard(Some(leaderboard.as_str()));
    let state = DashboardState::load(&config);

    let Some(data) = state.data else {
        let detail = state.error.unwrap_or_default();
        return rsx! {
            section { class: "page page-dashboard",
                div { class: "dashboard-card dashboard-card--error",
                    h2 { {t!("load-error-title")} }
                    p { class: "dashboard-card__placeholder", "{detail}" }
                }
            }
        };
    };

    rsx! {
        section { class: "page page-dashboard",
            if selected == OVERVIEW {
                Overview { data }
            } else {
                CategoryPage {
                    leaderboard: selected.to_string(),
                    data,
                    hide_top_100: config.hide_top_100,
                    history_window: config.history_window(),
                }
            }
        }
    }
}
