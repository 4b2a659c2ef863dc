//! Track catalog: the preset categories and their display metadata.
//!
//! The catalog order is the fixed iteration order for statistics, chart bars,
//! and report bullets, and it decides ties ("first listed wins").

use serde::Deserialize;
use thiserror::Error;

use super::storage::Category;

const BUILTIN_TRACKS: &str = include_str!("../../assets/tracks.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid track catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("track catalog lists no tracks")]
    Empty,
    #[error("track `{0}` is listed more than once")]
    Duplicate(Category),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackMeta {
    pub category: Category,
    pub label: String,
    /// Audio source path, relative to the app's asset root.
    pub audio: String,
    /// Frequency band (Hz) highlighted on the spectrum while this track plays.
    pub band_hz: [f32; 2],
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackCatalog {
    tracks: Vec<TrackMeta>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(rename = "track", default)]
    tracks: Vec<TrackMeta>,
}

impl TrackCatalog {
    /// Catalog shipped with the app (432 / 852 / 963 Hz).
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_TRACKS).expect("embedded tracks.toml is valid")
    }

    pub fn from_toml(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::from_tracks(file.tracks)
    }

    pub fn from_tracks(tracks: Vec<TrackMeta>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (idx, track) in tracks.iter().enumerate() {
            if tracks[..idx].iter().any(|t| t.category == track.category) {
                return Err(CatalogError::Duplicate(track.category.clone()));
            }
        }
        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[TrackMeta] {
        &self.tracks
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.tracks.iter().map(|track| &track.category)
    }

    pub fn get(&self, category: &Category) -> Option<&TrackMeta> {
        self.tracks.iter().find(|track| &track.category == category)
    }

    pub fn first(&self) -> &TrackMeta {
        &self.tracks[0]
    }

    /// Display label; unknown numeric categories read as "<n> Hz".
    pub fn label_for(&self, category: &Category) -> String {
        match self.get(category) {
            Some(track) => track.label.clone(),
            None if category.as_str().parse::<f64>().is_ok() => format!("{category} Hz"),
            None => category.to_string(),
        }
    }
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_lists_presets_in_order() {
        let catalog = TrackCatalog::builtin();
        let ids: Vec<&str> = catalog.categories().map(Category::as_str).collect();
        assert_eq!(ids, vec!["432", "852", "963"]);
        assert_eq!(catalog.first().audio, "audio/432.mp3");
    }

    #[test]
    fn labels_fall_back_for_unknown_categories() {
        let catalog = TrackCatalog::builtin();
        assert_eq!(catalog.label_for(&Category::from(852)), "852 Hz");
        assert_eq!(catalog.label_for(&Category::from(528)), "528 Hz");
        assert_eq!(catalog.label_for(&Category::new("rain")), "rain");
    }

    #[test]
    fn string_categories_are_accepted() {
        let catalog = TrackCatalog::from_toml(
            r#"
            [[track]]
            category = "rain"
            label = "Rain"
            audio = "audio/rain.mp3"
            band_hz = [100.0, 400.0]
            "#,
        )
        .unwrap();
        assert_eq!(catalog.first().category.as_str(), "rain");
        assert!(catalog.first().note.is_empty());
    }

    #[test]
    fn rejects_empty_and_duplicate_catalogs() {
        assert!(matches!(
            TrackCatalog::from_toml(""),
            Err(CatalogError::Empty)
        ));

        let dup = r#"
            [[track]]
            category = 432
            label = "A"
            audio = "a.mp3"
            band_hz = [1.0, 2.0]

            [[track]]
            category = "432"
            label = "B"
            audio = "b.mp3"
            band_hz = [1.0, 2.0]
        "#;
        assert!(matches!(
            TrackCatalog::from_toml(dup),
            Err(CatalogError::Duplicate(_))
        ));

        assert!(matches!(
            TrackCatalog::from_toml("track = 3"),
            Err(CatalogError::Parse(_))
        ));
    }
}
