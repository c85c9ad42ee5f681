use dioxus::prelude::*;

use super::chart::HistoryChart;
use super::geometry::{
    line_path, nearest_index, pixels_to_seconds, plot_bounds, project_x, unproject_x, x_ticks,
    y_ticks, TimeWindow, MARGIN_LEFT, VIEW_HEIGHT, VIEW_WIDTH,
};
use super::ChartNotice;
use crate::core::format::format_minute;
use crate::core::timing::unix_seconds;
use crate::t;

const ZOOM_STEP: f64 = 1.15;
const CLIP_ID: &str = "history-plot-clip";

/// Localised text for a placeholder notice.
pub fn notice_text(notice: ChartNotice) -> String {
    match notice {
        ChartNotice::NoLeaderboardColumn => t!("history-no-leaderboard-column"),
        ChartNotice::NoDataForCategory => t!("history-no-data"),
        ChartNotice::NoTimeColumn => t!("history-no-time-column"),
        ChartNotice::NoValidTimestamps => t!("history-no-valid-timestamps"),
        ChartNotice::EmptyWindow => t!("history-empty-window"),
        ChartNotice::NoDurationColumns => t!("history-no-duration-columns"),
        ChartNotice::NothingAfterFilter => t!("history-nothing-after-filter"),
    }
}

#[component]
pub fn HistoryPlaceholder(notice: ChartNotice) -> Element {
    rsx! {
        p { class: "dashboard-card__placeholder", "{notice_text(notice)}" }
    }
}

/// Interactive SVG line chart. The time axis pans (drag) and zooms (wheel);
/// the value axis stays fixed at the chart's default domain.
#[component]
pub fn HistoryChartView(chart: HistoryChart) -> Element {
    let default_window = TimeWindow::from_domain(chart.x_domain);
    let mut zoomed = use_signal(|| None::<TimeWindow>);
    let mut hover_x = use_signal(|| None::<f64>);
    let mut drag = use_signal(|| None::<(f64, TimeWindow)>);

    let window = zoomed().unwrap_or(default_window);
    let y_max = chart.y_domain.1;
    let (left, top, right, bottom) = plot_bounds();
    let plot_w = right - left;
    let plot_h = bottom - top;

    let lines: Vec<(String, String, String, String)> = chart
        .series
        .iter()
        .filter_map(|series| {
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|p| (unix_seconds(p.time), p.value_ms))
                .collect();
            line_path(&points, window, y_max).map(|d| {
                (
                    series.label.clone(),
                    series.color.clone(),
                    format!("{},{}", series.dash[0], series.dash[1]),
                    d,
                )
            })
        })
        .collect();

    let y_axis = y_ticks(y_max);
    let x_axis = x_ticks(window);

    let tooltip_times: Vec<f64> = chart.tooltip.iter().map(|row| unix_seconds(row.time)).collect();
    let hovered = hover_x()
        .and_then(|x| nearest_index(&tooltip_times, unproject_x(x, window)))
        .and_then(|idx| chart.tooltip.get(idx).map(|row| (idx, row.clone())));

    let guide = hovered
        .as_ref()
        .map(|(idx, _)| project_x(tooltip_times[*idx], window))
        .filter(|x| (left..=right).contains(x));

    let tooltip_lines: Vec<(String, String, String)> = hovered
        .as_ref()
        .map(|(_, row)| {
            chart
                .series
                .iter()
                .zip(row.values.iter())
                .map(|(s, v)| (s.label.clone(), s.color.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();
    let tooltip_time = hovered
        .as_ref()
        .map(|(_, row)| format_minute(row.time))
        .unwrap_or_default();
    let tooltip_left = guide.map(|x| if x > VIEW_WIDTH / 2.0 { x - 190.0 } else { x + 12.0 });

    let is_zoomed = zoomed().is_some();
    let reset_label = t!("history-reset-zoom");
    let time_label = t!("history-tooltip-time");

    rsx! {
        div { class: "history-chart",
            div { class: "history-chart__toolbar",
                div { class: "history-chart__legend",
                    for series in chart.series.iter() {
                        span { key: "{series.label}", class: "history-chart__legend-item",
                            span {
                                class: if series.dash[1] > 0 { "history-chart__swatch history-chart__swatch--dashed" } else { "history-chart__swatch" },
                                style: "border-color: {series.color}",
                            }
                            "{series.label}"
                        }
                    }
                }
                button {
                    class: "history-chart__reset",
                    disabled: !is_zoomed,
                    onclick: move |_| zoomed.set(None),
                    "{reset_label}"
                }
            }
            div { class: "history-chart__canvas",
                svg {
                    width: "{VIEW_WIDTH}",
                    height: "{VIEW_HEIGHT}",
                    view_box: "0 0 {VIEW_WIDTH} {VIEW_HEIGHT}",
                    defs {
                        clipPath { id: CLIP_ID,
                            rect { x: "{left}", y: "{top}", width: "{plot_w}", height: "{plot_h}" }
                        }
                    }
                    g { class: "history-chart__grid",
                        for tick in y_axis.iter() {
                            line { key: "y-{tick.label}", x1: "{left}", x2: "{right}", y1: "{tick.position}", y2: "{tick.position}" }
                            text { key: "yl-{tick.label}", class: "history-chart__tick", x: "{left - 8.0}", y: "{tick.position}", text_anchor: "end", dominant_baseline: "middle", "{tick.label}" }
                        }
                        for tick in x_axis.iter() {
                            text { key: "x-{tick.label}", class: "history-chart__tick", x: "{tick.position}", y: "{bottom + 20.0}", text_anchor: "middle", "{tick.label}" }
                        }
                    }
                    line { class: "history-chart__axis", x1: "{left}", x2: "{right}", y1: "{bottom}", y2: "{bottom}" }
                    g { clip_path: "url(#{CLIP_ID})",
                        for (label, color, dash, d) in lines.iter() {
                            path {
                                key: "{label}",
                                d: "{d}",
                                fill: "none",
                                stroke: "{color}",
                                stroke_width: "2",
                                stroke_dasharray: "{dash}",
                            }
                        }
                    }
                    if let Some(x) = guide {
                        line {
                            class: "history-chart__guide",
                            x1: "{x}", x2: "{x}", y1: "{top}", y2: "{bottom}",
                            stroke: "gray",
                            stroke_opacity: "0.5",
                        }
                    }
                    rect {
                        class: "history-chart__overlay",
                        x: "{left}",
                        y: "{top}",
                        width: "{plot_w}",
                        height: "{plot_h}",
                        fill: "transparent",
                        onmousemove: move |evt: MouseEvent| {
                            let x = MARGIN_LEFT + evt.element_coordinates().x;
                            if let Some((start_x, origin)) = drag() {
                                zoomed.set(Some(origin.pan(-pixels_to_seconds(x - start_x, origin))));
                            }
                            hover_x.set(Some(x));
                        },
                        onmousedown: move |evt: MouseEvent| {
                            let x = MARGIN_LEFT + evt.element_coordinates().x;
                            drag.set(Some((x, window)));
                        },
                        onmouseup: move |_| drag.set(None),
                        onmouseleave: move |_| {
                            drag.set(None);
                            hover_x.set(None);
                        },
                        onwheel: move |evt: WheelEvent| {
                            evt.prevent_default();
                            let delta = evt.delta().strip_units().y;
                            if delta == 0.0 {
                                return;
                            }
                            let factor = if delta > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                            let anchor = hover_x()
                                .map(|x| unproject_x(x, window))
                                .unwrap_or((window.start + window.end) / 2.0);
                            zoomed.set(Some(window.zoom(factor, anchor)));
                        },
                    }
                }
                if let Some(tip_left) = tooltip_left {
                    div {
                        class: "history-chart__tooltip",
                        style: "left: {tip_left}px; top: {top}px;",
                        div { class: "history-chart__tooltip-row",
                            span { "{time_label}" }
                            strong { "{tooltip_time}" }
                        }
                        for (label, color, value) in tooltip_lines.iter() {
                            div { key: "{label}", class: "history-chart__tooltip-row",
                                span { style: "color: {color}", "{label}" }
                                strong { "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
