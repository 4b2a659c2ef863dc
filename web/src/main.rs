use dioxus::prelude::*;

use ui::components::{register_nav, text_direction, AppNavbar, NavBuilder};
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/?:user")]
    Dashboard { user: String },
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard { user: String::new() },
        "{label}"
    })
}

fn nav_profile(user: &str, label: &str) -> Element {
    rsx!(Link {
        class: "button button--ghost",
        to: Route::Dashboard { user: user.to_string() },
        "{label}"
    })
}

fn go_home() {
    navigator().push(Route::Dashboard {
        user: String::new(),
    });
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        profile: nav_profile,
        go_home,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            dir: text_direction(&lang_code()),
            Router::<Route> {}
        }
    }
}

/// Web layout: shared navbar above the routed page.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
