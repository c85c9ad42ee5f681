#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;
use tracing::{info, warn};

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::catalog::resolve_leaderboard;
use ui::core::config::{load_config, DashboardConfig};
use ui::core::logging;
use ui::leaderboard::RefreshToken;

use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopShell)]
    #[route("/?:leaderboard")]
    Dashboard { leaderboard: String },
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    };
    logging::init(&config.log);
    if let Some(err) = config_error {
        warn!(error = %err, "falling back to default configuration");
    }
    info!(
        over_time = %config.sources.over_time.display(),
        gaps_latest = %config.sources.gaps_latest.display(),
        percentiles = %config.sources.percentiles.display(),
        cache_ttl_secs = config.cache_ttl_secs,
        "starting leaderboards dashboard"
    );

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("TFWR Leaderboards – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resolve_resource_dir()),
        )
        .with_context(config)
        .launch(App);
}

fn nav_tab(tab: &'static str, label: &str, active: bool) -> Element {
    rsx!(Link {
        class: if active { "sidebar__tab sidebar__tab--active" } else { "sidebar__tab" },
        to: Route::Dashboard { leaderboard: tab.to_string() },
        "{label}"
    })
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // The sidebar's language picker writes here; keyed remount below picks it up.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    let refresh = use_signal(|| 0u32);
    use_context_provider(|| RefreshToken(refresh));

    register_nav(NavBuilder { tab: nav_tab });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> { }
        }
    }
}

fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

/// Sidebar plus the routed page; the sidebar needs the desktop `Route` to
/// know which tab is active.
#[component]
fn DesktopShell() -> Element {
    let active = match use_route::<Route>() {
        Route::Dashboard { leaderboard } => resolve_leaderboard(Some(&leaderboard)),
    };

    rsx! {
        div { class: "app-shell",
            AppNavbar { active: active.to_string() }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
