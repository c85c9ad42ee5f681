use crate::core::catalog::{leaderboard_icon, TABS};
use crate::i18n::{self};
use crate::leaderboard;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Sidebar stylesheet, inlined as well for release native builds.
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` so the sidebar can emit their own
/// `Link`s without `ui` knowing each platform's `Route` enum.
///
/// ```ignore
/// use ui::components::app_navbar::{NavBuilder, register_nav};
/// fn install_nav() {
///     register_nav(NavBuilder {
///         tab: |tab, label, active| rsx!(Link {
///             class: if active { "sidebar__tab sidebar__tab--active" } else { "sidebar__tab" },
///             to: Route::Dashboard { leaderboard: tab.to_string() },
///             "{label}"
///         }),
///     });
/// }
/// ```
///
/// Without a builder the sidebar falls back to the `children` it was given.
pub struct NavBuilder {
    /// Receives the tab name, its display label (icon + name) and whether it
    /// is the current page; returns a link containing exactly that label.
    pub tab: fn(tab: &'static str, label: &str, active: bool) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// `🌾 Hay`
pub fn tab_label(tab: &str) -> String {
    format!("{} {}", leaderboard_icon(tab), tab)
}

#[component]
pub fn AppNavbar(active: String, children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    // Re-render when the global language changes.
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let refresh_ctx: Option<leaderboard::RefreshToken> = try_use_context();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            current_lang.set(val.clone());
            if let Some(mut code) = lang_code_ctx {
                code.set(val);
            }
        }
    };

    let tabs: Option<Vec<Element>> = NAV_BUILDER.get().map(|b| {
        TABS.iter()
            .map(|tab| (b.tab)(tab, &tab_label(tab), *tab == active))
            .collect()
    });

    let title = t!("sidebar-title");
    let refresh_label = t!("sidebar-refresh");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(not(debug_assertions)) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        aside {
            id: "sidebar",
            class: "sidebar",
            div { style: "display:none", "{lang_marker}" }
            div { class: "sidebar__brand",
                span { class: "sidebar__brand-mark", "🏆" }
                span { class: "sidebar__title", "{title}" }
            }

            if let Some(tabs) = tabs {
                nav { class: "sidebar__tabs",
                    for tab in tabs.into_iter() {
                        {tab}
                    }
                }
            } else {
                nav { class: "sidebar__tabs", {children} }
            }

            div { class: "sidebar__footer",
                button {
                    r#type: "button",
                    class: "sidebar__refresh",
                    onclick: move |_| {
                        leaderboard::refresh();
                        if let Some(mut token) = refresh_ctx {
                            token.bump();
                        }
                    },
                    "{refresh_label}"
                }
                if show_switcher {
                    div { class: "sidebar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                rsx!{
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_labels_carry_icons() {
        assert_eq!(tab_label("Hay Single"), "🌾 Hay Single");
        assert_eq!(tab_label("Overview"), "👨‍🌾 Overview");
    }
}
