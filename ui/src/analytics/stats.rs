//! Aggregate statistics over a set of session records.

use crate::core::{
    catalog::TrackCatalog,
    storage::{Category, SessionRecord},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: Category,
    /// `false` for categories only found in stored data.
    pub in_catalog: bool,
    pub count: usize,
    pub average_improvement: f64,
    pub average_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionStats {
    pub total_count: usize,
    pub overall_average_improvement: f64,
    pub overall_average_duration: f64,
    /// `None` when no category has a session.
    pub most_frequent_category: Option<Category>,
    /// Catalog categories in catalog order, then unknown ones in first-seen order.
    pub per_category: Vec<CategoryStats>,
}

#[derive(Default)]
struct Tally {
    count: usize,
    improvement: f64,
    duration: f64,
}

impl SessionStats {
    pub fn compute(sessions: &[SessionRecord], catalog: &TrackCatalog) -> Self {
        let mut table: Vec<(Category, bool, Tally)> = catalog
            .categories()
            .map(|category| (category.clone(), true, Tally::default()))
            .collect();

        let mut improvement_sum = 0.0;
        let mut duration_sum = 0.0;

        for session in sessions {
            improvement_sum += session.improvement;
            duration_sum += f64::from(session.duration_seconds);

            let idx = match table.iter().position(|(c, _, _)| c == &session.category) {
                Some(idx) => idx,
                None => {
                    table.push((session.category.clone(), false, Tally::default()));
                    table.len() - 1
                }
            };
            let tally = &mut table[idx].2;
            tally.count += 1;
            tally.improvement += session.improvement;
            tally.duration += f64::from(session.duration_seconds);
        }

        let total_count = sessions.len();
        let per_category: Vec<CategoryStats> = table
            .into_iter()
            .map(|(category, in_catalog, tally)| CategoryStats {
                category,
                in_catalog,
                count: tally.count,
                average_improvement: mean(tally.improvement, tally.count),
                average_duration: mean(tally.duration, tally.count),
            })
            .collect();

        let most_frequent_category = first_strict_max(
            per_category
                .iter()
                .filter(|stats| stats.count > 0)
                .map(|stats| (stats, stats.count as f64)),
        )
        .map(|stats| stats.category.clone());

        Self {
            total_count,
            overall_average_improvement: mean(improvement_sum, total_count),
            overall_average_duration: mean(duration_sum, total_count),
            most_frequent_category,
            per_category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn category(&self, category: &Category) -> Option<&CategoryStats> {
        self.per_category
            .iter()
            .find(|stats| &stats.category == category)
    }

    /// Average improvement for `category`, 0 when it has no sessions.
    pub fn average_improvement(&self, category: &Category) -> f64 {
        self.category(category)
            .map(|stats| stats.average_improvement)
            .unwrap_or(0.0)
    }

    /// Catalog category with the strictly highest average improvement among those
    /// with sessions. Independent of `most_frequent_category`.
    pub fn best_category(&self) -> Option<&Category> {
        first_strict_max(
            self.per_category
                .iter()
                .filter(|stats| stats.in_catalog && stats.count > 0)
                .map(|stats| (stats, stats.average_improvement)),
        )
        .map(|stats| &stats.category)
    }

    /// Catalog categories only, in catalog order (what the chart and report list).
    pub fn catalog_categories(&self) -> impl Iterator<Item = &CategoryStats> + '_ {
        self.per_category.iter().filter(|stats| stats.in_catalog)
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// First item whose key is strictly greater than every earlier key.
fn first_strict_max<T>(items: impl Iterator<Item = (T, f64)>) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for (item, key) in items {
        let replace = match &best {
            Some((_, best_key)) => key > *best_key,
            None => true,
        };
        if replace {
            best = Some((item, key));
        }
    }
    best.map(|(item, _)| item)
}
