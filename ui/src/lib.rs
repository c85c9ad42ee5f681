//! Shared UI crate for the TFWR leaderboards dashboard: snapshot loading,
//! the history chart pipeline and every Dioxus component the launchers mount.

pub mod core;
pub mod history;
pub mod i18n;
pub mod leaderboard;
pub mod views;

pub mod components {
    // Localized sidebar navigation (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

#[cfg(test)]
mod tests;
