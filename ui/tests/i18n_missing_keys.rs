use std::collections::{BTreeMap, BTreeSet};

const EN_US: &str = include_str!("../i18n/en-US/tonelog-ui.ftl");
const TR_TR: &str = include_str!("../i18n/tr-TR/tonelog-ui.ftl");
const AR_SA: &str = include_str!("../i18n/ar-SA/tonelog-ui.ftl");

/// Translated locales checked against en-US. Register new locales here.
const TRANSLATIONS: &[(&str, &str)] = &[("tr-TR", TR_TR), ("ar-SA", AR_SA)];

/// Message id -> the `$variables` its value references.
type Messages = BTreeMap<String, BTreeSet<String>>;

/// Every message lives on one line, so `id = value` per line is enough.
/// Panics on duplicate ids.
fn parse(locale: &str, src: &str) -> Messages {
    let mut messages = Messages::new();
    for (number, line) in src.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            panic!("{locale}:{}: expected `id = value`, got {line:?}", number + 1);
        };
        let id = id.trim().to_string();
        let previous = messages.insert(id.clone(), variables(value));
        assert!(previous.is_none(), "{locale}:{}: duplicate id `{id}`", number + 1);
    }
    messages
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .map(|tail| {
            tail.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[test]
fn translations_define_every_fallback_message() {
    let fallback = parse("en-US", EN_US);
    assert!(!fallback.is_empty(), "en-US defines no messages");

    let mut failures = Vec::new();
    for (locale, src) in TRANSLATIONS {
        let messages = parse(locale, src);
        let missing: Vec<_> = fallback.keys().filter(|id| !messages.contains_key(*id)).collect();
        let extra: Vec<_> = messages.keys().filter(|id| !fallback.contains_key(*id)).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {missing:?}"));
        }
        if !extra.is_empty() {
            failures.push(format!("{locale} defines unknown ids: {extra:?}"));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn translations_keep_the_same_variables() {
    let fallback = parse("en-US", EN_US);

    let mut failures = Vec::new();
    for (locale, src) in TRANSLATIONS {
        for (id, vars) in parse(locale, src) {
            let Some(expected) = fallback.get(&id) else {
                continue;
            };
            if &vars != expected {
                failures.push(format!("{locale} `{id}`: expected {expected:?}, found {vars:?}"));
            }
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn report_messages_carry_their_arguments() {
    let fallback = parse("en-US", EN_US);
    let breakdown = &fallback["report-breakdown-item"];
    for name in ["label", "improvement", "count", "seconds"] {
        assert!(breakdown.contains(name), "report-breakdown-item lacks ${name}");
    }
    assert!(fallback["report-title"].contains("scope"));
    assert!(fallback["report-empty"].is_empty());
}
