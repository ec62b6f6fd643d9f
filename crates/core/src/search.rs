use crate::model::Category;

/// Hard cap applied after collection; scan order is the only ranking.
pub const MAX_SEARCH_RESULTS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Category,
    Topic,
    Step,
}

/// One search match with enough addressing to navigate to it. `context` is a
/// short display label for where the hit lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: HitKind,
    pub category_slug: String,
    pub topic_slug: Option<String>,
    pub step_index: Option<usize>,
    pub title: String,
    pub context: String,
}

/// Case-insensitive substring scan over the merged tree, in tree order:
/// category names, then topic titles and intros, then step titles and
/// descriptions. The caller trims the term and suppresses empty queries.
pub fn search(term: &str, categories: &[Category]) -> Vec<SearchHit> {
    let needle = term.to_lowercase();
    let mut hits = Vec::new();
    for category in categories {
        if contains(&category.category, &needle) {
            hits.push(SearchHit {
                kind: HitKind::Category,
                category_slug: category.slug.clone(),
                topic_slug: None,
                step_index: None,
                title: category.category.clone(),
                context: "Kategorie".to_string(),
            });
        }
        for topic in &category.topics {
            let in_title = contains(&topic.title, &needle);
            let in_intro = topic
                .intro
                .as_deref()
                .is_some_and(|intro| contains(intro, &needle));
            if in_title || in_intro {
                hits.push(SearchHit {
                    kind: HitKind::Topic,
                    category_slug: category.slug.clone(),
                    topic_slug: Some(topic.slug.clone()),
                    step_index: None,
                    title: topic.title.clone(),
                    context: category.category.clone(),
                });
            }
            for (index, step) in topic.steps.iter().enumerate() {
                let in_step_title = contains(&step.title, &needle);
                let in_description = step
                    .description
                    .as_deref()
                    .is_some_and(|description| contains(description, &needle));
                if in_step_title || in_description {
                    hits.push(SearchHit {
                        kind: HitKind::Step,
                        category_slug: category.slug.clone(),
                        topic_slug: Some(topic.slug.clone()),
                        step_index: Some(index),
                        title: step.title.clone(),
                        context: format!("{} · {}", topic.title, category.category),
                    });
                }
            }
        }
    }
    hits.truncate(MAX_SEARCH_RESULTS);
    hits
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
