use crate::i18n::{self};
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Route glue supplied by each platform crate, so `ui` never names a `Route` enum.
///
/// Every builder receives the already-localized label and returns a `Link`
/// containing exactly that label.
///
/// ```ignore
/// register_nav(NavBuilder {
///     dashboard: |label| rsx!(Link { class: "navbar__link", to: Route::Dashboard { user: String::new() }, "{label}" }),
///     profile: |user, label| rsx!(Link { class: "button button--ghost", to: Route::Dashboard { user: user.to_string() }, "{label}" }),
///     go_home: || { navigator().push(Route::Dashboard { user: String::new() }); },
/// });
/// ```
pub struct NavBuilder {
    /// Link to the unscoped dashboard.
    pub dashboard: fn(label: &str) -> Element,
    /// Link to the dashboard scoped to `user`.
    pub profile: fn(user: &str, label: &str) -> Element,
    /// Programmatic navigation back to the unscoped dashboard.
    pub go_home: fn(),
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

pub fn nav() -> Option<&'static NavBuilder> {
    NAV_BUILDER.get()
}

/// Scoped-dashboard link; nothing until a platform crate registers its routes.
pub fn profile_link(user: &str, label: &str) -> Option<Element> {
    nav().map(|builder| (builder.profile)(user, label))
}

#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(%err, lang = %val, "language switch failed"),
        }
    };

    let links = nav().map(|b| (b.dashboard)(&t!("nav-dashboard")));
    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", {t!("brand")} }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                nav { class: "navbar__links", {links} }

                if show_switcher {
                    div { class: "navbar__locale",
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
                                let selected = c == current_lang();
                                rsx!{
                                    option { key: "{c}", value: "{c}", selected, "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}

/// `rtl` for Arabic locales, `ltr` otherwise.
pub fn text_direction(lang: &str) -> &'static str {
    if lang.starts_with("ar") {
        "rtl"
    } else {
        "ltr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_link_needs_registered_routes() {
        assert!(nav().is_none());
        assert!(profile_link("Alice", "Open profile").is_none());
    }

    #[test]
    fn arabic_locales_read_right_to_left() {
        assert_eq!(text_direction("ar-SA"), "rtl");
        assert_eq!(text_direction("en-US"), "ltr");
    }
}
