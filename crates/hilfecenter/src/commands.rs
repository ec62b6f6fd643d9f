use std::path::PathBuf;

use anyhow::{anyhow, Result};
use hilfecenter_core::{
    find_category, find_topic, search as search_tree, shorten_text, Category, HitKind, Step,
    Topic,
};
use hilfecenter_store::{step_key, CompletionStore};

use crate::cli::ContentArgs;
use crate::config;
use crate::fetch::Source;
use crate::load::load_content;
use crate::logging;

/// Preview budget for topic intros in list output.
const TOPIC_PREVIEW_LEN: usize = 110;

fn load_tree(content: &ContentArgs) -> Result<Vec<Category>> {
    let base = Source::parse(&content.base);
    let sheet = config::sheet_source(content.sheet.clone()).map(|raw| Source::parse(&raw));
    match load_content(&base, sheet.as_ref()) {
        Ok(categories) => Ok(categories),
        Err(err) => {
            logging::info(
                "Die Inhalte konnten nicht geladen werden. Bitte später erneut versuchen.",
            );
            Err(err)
        }
    }
}

pub fn load(content: &ContentArgs, json: bool) -> Result<()> {
    let categories = load_tree(content)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }
    for category in &categories {
        let subtitle = category
            .subtitle
            .clone()
            .unwrap_or_else(|| format!("{} Themen", category.topics.len()));
        println!("{:<28} {} · {}", category.slug, category.category, subtitle);
    }
    Ok(())
}

pub fn topics(category_slug: &str, content: &ContentArgs) -> Result<()> {
    let categories = load_tree(content)?;
    let category = find_category(&categories, category_slug)
        .ok_or_else(|| anyhow!("unknown category {category_slug}"))?;
    for topic in &category.topics {
        println!("{:<24} {}", topic.slug, topic_line(topic));
    }
    Ok(())
}

fn topic_line(topic: &Topic) -> String {
    let marker = if topic.highlight { "⭐ " } else { "" };
    let preview = topic
        .intro
        .as_deref()
        .map(|intro| shorten_text(intro, TOPIC_PREVIEW_LEN))
        .unwrap_or_else(|| "Details öffnen".to_string());
    format!("{marker}{} · {preview}", topic.title)
}

pub fn steps(
    category_slug: &str,
    topic_slug: &str,
    content: &ContentArgs,
    state: Option<PathBuf>,
) -> Result<()> {
    let categories = load_tree(content)?;
    let topic = resolve_topic(&categories, category_slug, topic_slug)?;
    if topic.steps.is_empty() {
        println!("Für dieses Thema sind noch keine Schritte hinterlegt.");
        return Ok(());
    }
    if let Some(intro) = &topic.intro {
        println!("{intro}");
        println!();
    }
    let store = CompletionStore::open(config::state_path(state));
    for (index, step) in topic.steps.iter().enumerate() {
        print_step(&store, category_slug, topic_slug, index, step);
    }
    Ok(())
}

fn print_step(
    store: &CompletionStore,
    category_slug: &str,
    topic_slug: &str,
    index: usize,
    step: &Step,
) {
    let key = step_key(category_slug, topic_slug, index);
    let marker = if store.is_done(&key) { "[x]" } else { "[ ]" };
    let critical = if step.is_critical { " !" } else { "" };
    println!(
        "{marker} {index}: {} ({}){critical}",
        step.title,
        step.action_type.as_str()
    );
    if let Some(description) = &step.description {
        println!("      {description}");
    }
    if let Some(contact) = &step.contact {
        if let Some(phone) = &contact.phone {
            println!("      Telefon: {phone}");
        }
        if let Some(email) = &contact.email {
            println!("      E-Mail: {email}");
        }
    }
    if let Some(link) = &step.link {
        println!(
            "      Link: {} ({})",
            link.href,
            link.label.as_deref().unwrap_or("Öffnen")
        );
    }
}

pub fn toggle(
    category_slug: &str,
    topic_slug: &str,
    index: usize,
    content: &ContentArgs,
    state: Option<PathBuf>,
) -> Result<()> {
    let categories = load_tree(content)?;
    let topic = resolve_topic(&categories, category_slug, topic_slug)?;
    if index >= topic.steps.len() {
        return Err(anyhow!(
            "topic {topic_slug} has {} steps, index {index} is out of range",
            topic.steps.len()
        ));
    }
    let mut store = CompletionStore::open(config::state_path(state));
    let key = step_key(category_slug, topic_slug, index);
    let now_done = store.toggle(&key);
    println!(
        "{} {} · {}",
        if now_done { "[x]" } else { "[ ]" },
        topic.steps[index].title,
        if now_done { "erledigt" } else { "offen" }
    );
    Ok(())
}

pub fn search(term: &str, content: &ContentArgs) -> Result<()> {
    // the search layer expects a pre-trimmed term and no empty queries
    let term = term.trim();
    if term.is_empty() {
        println!("Keine Treffer");
        return Ok(());
    }
    let categories = load_tree(content)?;
    let hits = search_tree(term, &categories);
    if hits.is_empty() {
        println!("Keine Treffer");
        return Ok(());
    }
    for hit in &hits {
        let kind = match hit.kind {
            HitKind::Category => "kategorie",
            HitKind::Topic => "thema",
            HitKind::Step => "schritt",
        };
        let address = match (&hit.topic_slug, hit.step_index) {
            (Some(topic), Some(step)) => format!("{}/{topic}#{step}", hit.category_slug),
            (Some(topic), None) => format!("{}/{topic}", hit.category_slug),
            _ => hit.category_slug.clone(),
        };
        println!("{kind:<10} {:<36} {} ({address})", hit.title, hit.context);
    }
    Ok(())
}

pub fn run_from_config(path: &str) -> Result<()> {
    let cfg = config::read_run_config(path)?;
    let content = ContentArgs {
        base: cfg.base,
        sheet: cfg.sheet,
    };
    let categories = load_tree(&content)?;
    let store = CompletionStore::open(config::state_path(cfg.state.map(PathBuf::from)));
    let topic_count: usize = categories.iter().map(|c| c.topics.len()).sum();
    let step_count: usize = categories
        .iter()
        .flat_map(|c| &c.topics)
        .map(|t| t.steps.len())
        .sum();
    println!(
        "{} Kategorien, {topic_count} Themen, {step_count} Schritte, {} erledigt",
        categories.len(),
        store.done_count()
    );
    Ok(())
}

fn resolve_topic<'a>(
    categories: &'a [Category],
    category_slug: &str,
    topic_slug: &str,
) -> Result<&'a Topic> {
    let category = find_category(categories, category_slug)
        .ok_or_else(|| anyhow!("unknown category {category_slug}"))?;
    find_topic(category, topic_slug)
        .ok_or_else(|| anyhow!("unknown topic {topic_slug} in {category_slug}"))
}
