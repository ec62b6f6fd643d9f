use std::cmp::Ordering;

use tracing::warn;

use crate::model::{Category, Topic};
use crate::sheet::SheetRecord;
use crate::slug::slugify;

/// Topics without an explicit order sort after every ordered topic.
pub const ORDER_SENTINEL: i64 = 9999;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: usize,
    pub skipped: usize,
}

/// Folds supplemental records into the base category tree, in input order.
///
/// Each record resolves its category by exact slug first, then by
/// case-insensitive display name; records that resolve neither way are
/// skipped with a warning and counted, never fatal. Merging assumes a
/// pristine base tree: re-running over an already-merged tree duplicates
/// topics under fresh collision slugs.
pub fn merge_records(categories: &mut [Category], records: &[SheetRecord]) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for record in records {
        match resolve_category(categories, &record.category) {
            Some(idx) => {
                insert_topic(&mut categories[idx], record);
                outcome.merged += 1;
            }
            None => {
                warn!(
                    category = %record.category,
                    title = %record.title,
                    "no matching category for sheet entry"
                );
                outcome.skipped += 1;
            }
        }
    }
    outcome
}

fn resolve_category(categories: &[Category], reference: &str) -> Option<usize> {
    if reference.is_empty() {
        return None;
    }
    categories
        .iter()
        .position(|category| category.slug == reference)
        .or_else(|| {
            let lowered = reference.to_lowercase();
            categories
                .iter()
                .position(|category| category.category.to_lowercase() == lowered)
        })
}

fn insert_topic(category: &mut Category, record: &SheetRecord) {
    let slug = unique_topic_slug(&category.topics, &record.title);
    category.topics.push(Topic {
        slug,
        title: record.title.clone(),
        intro: record.intro.clone(),
        order: record.order,
        highlight: record.highlight,
        steps: record.steps.clone(),
    });
    category.topics.sort_by(compare_topics);
}

fn unique_topic_slug(topics: &[Topic], title: &str) -> String {
    let base = slugify(title);
    let mut candidate = base.clone();
    let mut counter = 2;
    while topics.iter().any(|topic| topic.slug == candidate) {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }
    candidate
}

/// Highlighted topics first, then ascending order, then title. The sort is
/// stable, so equal keys keep their insertion order.
fn compare_topics(a: &Topic, b: &Topic) -> Ordering {
    b.highlight
        .cmp(&a.highlight)
        .then_with(|| {
            a.order
                .unwrap_or(ORDER_SENTINEL)
                .cmp(&b.order.unwrap_or(ORDER_SENTINEL))
        })
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}
