use dioxus::prelude::*;

use crate::core::format::format_percentile_ms;
use crate::core::snapshot::PercentileSummary;
use crate::t;

#[component]
pub fn PercentileCards(summary: Option<PercentileSummary>) -> Element {
    let Some(summary) = summary else {
        return rsx! {
            p { class: "dashboard-card__placeholder", {t!("percentiles-missing")} }
        };
    };

    let entries = summary
        .entry_count
        .map(|count| count.to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "percentiles",
            for (percent, value) in summary.tiers.iter() {
                div { key: "{percent}", class: "percentiles__card",
                    span { class: "percentiles__label", {t!("percentile-tier", percent = (*percent))} }
                    strong { class: "percentiles__value", "{format_percentile_ms(*value)}" }
                }
            }
            div { class: "percentiles__card",
                span { class: "percentiles__label", {t!("percentile-entries")} }
                strong { class: "percentiles__value", "{entries}" }
            }
        }
    }
}
