use dioxus::prelude::*;
use tracing::warn;

use crate::{
    analytics::{
        AnalyticsSnapshot, ExportPanel, Highlights, ImprovementChart, ReportCard, SessionsTable,
    },
    components::{nav, profile_link},
    core::{
        catalog::TrackCatalog,
        scope::Scope,
        storage::SessionStore,
    },
    i18n,
    player::PlayerCard,
    t,
};

/// The single page: user picker, player, statistics, report and session table.
///
/// `user` is the route's query parameter; blank means every user.
#[component]
pub fn Dashboard(user: String) -> Element {
    // Re-render on language switches made in the navbar.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code.as_ref().map(|c| c()).unwrap_or_default();

    let catalog = use_hook(TrackCatalog::builtin);
    let mut revision = use_signal(|| 0u64);
    let mut selected_user = use_signal(|| Option::<String>::None);
    let mut confirming_clear = use_signal(|| false);
    let mut notice = use_signal(|| Option::<String>::None);

    // Every storage write bumps `revision`; reading it here ties the snapshot to it.
    let _revision = revision();

    let scope = Scope::from_query(Some(&user));
    let scope_user = scope.user_name().map(str::to_string);
    let scope_label = scope_user
        .clone()
        .unwrap_or_else(|| t!("scope-all-users"));
    let snapshot = AnalyticsSnapshot::load(
        &SessionStore::open(),
        &catalog,
        &scope,
        &scope_label,
        &i18n::LOADER,
    );

    let title = match &scope_user {
        Some(name) => t!("dashboard-title-user", user = name.clone()),
        None => t!("dashboard-title-all"),
    };

    let selected = selected_user()
        .filter(|name| snapshot.users.contains(name))
        .or_else(|| scope_user.clone())
        .or_else(|| snapshot.users.first().cloned());

    let refresh = move |_: ()| revision += 1;

    let clear_all = move |_| {
        if !confirming_clear() {
            confirming_clear.set(true);
            return;
        }
        confirming_clear.set(false);
        match SessionStore::open().clear_all() {
            Ok(()) => {
                notice.set(None);
                selected_user.set(None);
                revision += 1;
                if let Some(builder) = nav() {
                    (builder.go_home)();
                }
            }
            Err(err) => {
                warn!(%err, "clear all failed");
                notice.set(Some(t!("notice-storage-failed", error = err.to_string())));
            }
        }
    };

    let AnalyticsSnapshot {
        users,
        sessions,
        stats,
        report,
        chart_svg,
        ..
    } = snapshot;

    rsx! {
        section { class: "page page-dashboard",
            header { class: "dashboard__header",
                h1 { "{title}" }
                if scope_user.is_some() {
                    {nav().map(|builder| (builder.dashboard)(&t!("dashboard-show-all")))}
                }
            }

            if let Some(message) = notice() {
                p { class: "notice notice--error", role: "alert", "{message}" }
            }

            div { class: "dashboard__grid",
                UserPanel {
                    users: users.clone(),
                    selected: selected.clone(),
                    scoped: scope_user.is_some(),
                    on_select: move |name: String| selected_user.set(Some(name)),
                    on_added: move |name: String| {
                        selected_user.set(Some(name));
                        revision += 1;
                    },
                }
                PlayerCard {
                    catalog: catalog.clone(),
                    scope_user: scope_user.clone(),
                    selected_user: selected.clone(),
                    on_saved: refresh,
                }
            }

            Highlights { stats: stats.clone(), catalog: catalog.clone() }
            ImprovementChart { svg: chart_svg }
            ReportCard { report }
            SessionsTable { sessions: sessions.clone(), catalog: catalog.clone(), on_change: refresh }
            ExportPanel { sessions, catalog: catalog.clone() }

            section { class: "dash-card danger-zone",
                div { class: "dash-card__header",
                    h2 { {t!("danger-title")} }
                }
                p { class: "dash-card__meta", {t!("danger-clear-help")} }
                div { class: "danger-zone__actions",
                    button {
                        r#type: "button",
                        class: if confirming_clear() { "button button--danger" } else { "button button--ghost" },
                        onclick: clear_all,
                        if confirming_clear() {
                            {t!("danger-clear-confirm")}
                        } else {
                            {t!("danger-clear")}
                        }
                    }
                    if confirming_clear() {
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| confirming_clear.set(false),
                            {t!("danger-clear-cancel")}
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UserPanel(
    users: Vec<String>,
    selected: Option<String>,
    scoped: bool,
    on_select: EventHandler<String>,
    on_added: EventHandler<String>,
) -> Element {
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let add_user = move |_| {
        let name = draft().trim().to_string();
        if name.is_empty() {
            return;
        }
        match SessionStore::open().add_user_if_absent(&name) {
            Ok(_) => {
                draft.set(String::new());
                error.set(None);
                on_added.call(name);
            }
            Err(err) => {
                warn!(%err, "could not add user");
                error.set(Some(t!("notice-storage-failed", error = err.to_string())));
            }
        }
    };

    let current = selected.clone().unwrap_or_default();

    rsx! {
        section { class: "dash-card users",
            div { class: "dash-card__header",
                h2 { {t!("users-title")} }
                if scoped {
                    span { class: "dash-card__meta", {t!("users-scoped-hint")} }
                }
            }

            label { class: "field",
                span { class: "field__label", {t!("users-select-label")} }
                select {
                    class: "field__input",
                    value: "{current}",
                    disabled: users.is_empty(),
                    onchange: move |evt: FormEvent| on_select.call(evt.value()),
                    if users.is_empty() {
                        option { value: "", {t!("users-none")} }
                    }
                    for name in users.iter() {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: *name == current,
                            "{name}"
                        }
                    }
                }
            }

            div { class: "users__add",
                input {
                    class: "field__input",
                    r#type: "text",
                    placeholder: t!("users-new-placeholder"),
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    r#type: "button",
                    class: "button",
                    onclick: add_user,
                    {t!("users-add")}
                }
            }

            if let Some(name) = selected {
                div { class: "users__profile",
                    {profile_link(&name, &t!("users-open-profile"))}
                }
            }

            if let Some(message) = error() {
                p { class: "notice notice--error", role: "alert", "{message}" }
            }
        }
    }
}
