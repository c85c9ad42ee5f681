use dioxus::prelude::*;

use crate::core::format::ms_to_str;
use crate::core::snapshot::GapRow;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Top three entries of a category, one card per medal.
#[component]
pub fn Podium(entries: Vec<GapRow>) -> Element {
    rsx! {
        div { class: "podium",
            for (entry, medal) in entries.iter().zip(MEDALS) {
                div { key: "{entry.rank}", class: "podium__card",
                    span { class: "podium__medal", "{medal}" }
                    span { class: "podium__name", "{entry.steam_name}" }
                    span { class: "podium__time", "{ms_to_str(entry.duration_ms)}" }
                }
            }
        }
    }
}
