//! Shared UI crate for Tonelog: storage, statistics, the player, and the
//! dashboard views used by every platform launcher.

pub mod analytics;
pub mod core;
pub mod i18n;
pub mod player;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::{nav, profile_link, register_nav, text_direction, AppNavbar, NavBuilder};
}
