use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::core::format::{gap_ms_to_str, human_friendly_time, ms_to_str};
use crate::core::snapshot::GapRow;
use crate::t;

/// One display-ready line of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
struct TableRow {
    rank: u32,
    player: String,
    time: String,
    gap: String,
    gap_to_leader: String,
    date: String,
}

impl TableRow {
    fn from_gap(row: &GapRow, now: OffsetDateTime) -> Self {
        Self {
            rank: row.rank,
            player: row.steam_name.clone(),
            time: ms_to_str(row.duration_ms),
            gap: gap_ms_to_str(row.gap_prev_ms),
            gap_to_leader: gap_ms_to_str(row.gap_leader_ms),
            date: human_friendly_time(row.achieved_at, now),
        }
    }
}

#[component]
pub fn LeaderboardTable(rows: Vec<GapRow>, now: OffsetDateTime) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "dashboard-card__placeholder", {t!("leaderboard-empty")} }
        };
    }

    let lines: Vec<TableRow> = rows.iter().map(|row| TableRow::from_gap(row, now)).collect();

    rsx! {
        div { class: "leaderboard-table__scroll",
            table { class: "leaderboard-table",
                thead {
                    tr {
                        th { {t!("column-rank")} }
                        th { {t!("column-player")} }
                        th { {t!("column-time")} }
                        th { {t!("column-gap")} }
                        th { {t!("column-gap-to-leader")} }
                        th { {t!("column-date")} }
                    }
                }
                tbody {
                    for line in lines.into_iter() {
                        tr { key: "{line.rank}-{line.player}",
                            td { class: "leaderboard-table__rank", "{line.rank}" }
                            td { "{line.player}" }
                            td { class: "leaderboard-table__time", "{line.time}" }
                            td { class: "leaderboard-table__gap", "{line.gap}" }
                            td { class: "leaderboard-table__gap", "{line.gap_to_leader}" }
                            td { class: "leaderboard-table__date", "{line.date}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LastUpdated(at: Option<OffsetDateTime>, now: OffsetDateTime) -> Element {
    let text = human_friendly_time(at, now);
    rsx! {
        p { class: "last-updated",
            {t!("last-updated", when = text)}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn rows_format_times_gaps_and_dates() {
        let gap = GapRow {
            leaderboard_name: "Hay".into(),
            rank: 2,
            steam_name: "bob".into(),
            duration_ms: Some(60_500.0),
            gap_prev_ms: Some(1_500.0),
            gap_leader_ms: Some(0.0),
            achieved_at: Some(datetime!(2025-10-01 12:00 UTC)),
        };
        let line = TableRow::from_gap(&gap, datetime!(2025-10-03 12:00 UTC));
        assert_eq!(line.time, "01:00.500");
        assert_eq!(line.gap, "+00:01.500");
        assert_eq!(line.gap_to_leader, "");
        assert_eq!(line.date, "2025-10-01 12:00:00 (2 day(s) ago)");
    }
}
