use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "tonelog-ui.ftl";
const FALLBACK: &str = "en-US";

/// Message ids defined in one FTL file. Terms, comments and attributes are skipped.
fn defined_ids(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with('-') && !line.starts_with('.'))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| is_message_id(id))
        .map(str::to_string)
        .collect()
}

fn is_message_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
}

/// Literal message ids given as the first `t!` argument or the second `fl!` one.
fn referenced_ids(source: &str) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for (needle, skips_loader) in [("t!(", false), ("fl!(", true)] {
        let mut offset = 0;
        while let Some(pos) = source[offset..].find(needle) {
            let start = offset + pos;
            offset = start + needle.len();

            let preceded_by_ident = source[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
            if preceded_by_ident {
                continue;
            }

            let mut rest = source[offset..].trim_start();
            if skips_loader {
                match rest.split_once(',') {
                    Some((_, after)) => rest = after.trim_start(),
                    None => continue,
                }
            }
            let Some(literal) = rest.strip_prefix('"') else {
                continue;
            };
            if let Some((id, _)) = literal.split_once('"') {
                if is_message_id(id) {
                    ids.insert(id.to_string());
                }
            }
        }
    }
    ids
}

/// Application sources under `dir`; the `tests` folder holds scanner fixtures
/// and is left out.
fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == "tests") {
                continue;
            }
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

fn locale_files(i18n_root: &Path) -> BTreeMap<String, String> {
    let mut locales = BTreeMap::new();
    for entry in fs::read_dir(i18n_root).expect("i18n directory").flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        if path.is_dir() {
            let file = path.join(FTL_FILENAME);
            let content = fs::read_to_string(&file)
                .unwrap_or_else(|err| panic!("{name} has no {FTL_FILENAME}: {err}"));
            locales.insert(name, content);
        }
    }
    locales
}

#[test]
fn referenced_ids_exist_in_every_locale_and_nothing_is_stale() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let locales = locale_files(&crate_root.join("i18n"));
    assert!(locales.contains_key(FALLBACK), "fallback locale missing");

    let mut sources = Vec::new();
    rust_sources(&crate_root.join("src"), &mut sources);
    let referenced: BTreeSet<String> = sources
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .flat_map(|source| referenced_ids(&source))
        .collect();
    assert!(!referenced.is_empty(), "no message ids found in sources");

    let mut problems = Vec::new();
    for (locale, content) in &locales {
        let defined = defined_ids(content);
        for id in referenced.difference(&defined) {
            problems.push(format!("{locale}: `{id}` is used but not defined"));
        }
    }

    let fallback = defined_ids(&locales[FALLBACK]);
    for id in fallback.difference(&referenced) {
        problems.push(format!("{FALLBACK}: `{id}` is defined but never used"));
    }

    assert!(problems.is_empty(), "{}", problems.join("\n"));
}

#[test]
fn scanner_reads_both_macro_forms() {
    let source = r#"
        let a = t!("brand");
        let b = fl!(loader, "report-title", scope = label);
        let c = fl!(
            &en,
            "report-none"
        );
        print!("not-a-key");
    "#;
    let ids: Vec<_> = referenced_ids(source).into_iter().collect();
    assert_eq!(ids, ["brand", "report-none", "report-title"]);
}

#[test]
fn scan_skips_its_own_fixtures() {
    let src = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut sources = Vec::new();
    rust_sources(&src, &mut sources);

    assert!(sources.iter().any(|path| path.ends_with("i18n.rs")));
    assert!(!sources.iter().any(|path| path.starts_with(src.join("tests"))));
    assert!(!referenced_ids(r#"`t!("id", ..)`"#).is_empty());
}
