#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::components::{register_nav, text_direction, AppNavbar, NavBuilder};
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/?:user")]
    Dashboard { user: String },
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop stylesheet.

fn main() {
    dioxus::logger::initialize_default();
    let resource_dir = resolve_resource_dir();
    tracing::info!(path = %resource_dir.display(), "serving track audio from resource dir");

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Tonelog – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Dashboard { user: String::new() }, "{label}" })
}

fn nav_profile(user: &str, label: &str) -> Element {
    rsx!(Link { class: "button button--ghost", to: Route::Dashboard { user: user.to_string() }, "{label}" })
}

fn go_home() {
    navigator().push(Route::Dashboard { user: String::new() });
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // AppNavbar updates this via context on language selection.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        profile: nav_profile,
        go_home,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        // Keyed by language so the routed subtree remounts with fresh strings.
        div {
            key: "{lang_code()}",
            dir: text_direction(&lang_code()),
            Router::<Route> { }
        }
    }
}

fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        // During `cargo run` / `dx serve` load directly from the crate.
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }

        Outlet::<Route> {}
    }
}
