use crate::model::{ActionType, Step};
use crate::text::shorten_text;

/// Step columns are enumerated `schritt1` … `schritt20`.
pub const MAX_SHEET_STEPS: usize = 20;

/// Display budget for merged topic intros.
pub const INTRO_MAX_LEN: usize = 220;

const YES: &str = "ja";

/// One sheet row, normalized and ready to become a topic. `category` carries
/// the raw reference (slug or display name) and is resolved during merge.
#[derive(Debug, Clone)]
pub struct SheetRecord {
    pub category: String,
    pub title: String,
    pub intro: Option<String>,
    pub order: Option<i64>,
    pub highlight: bool,
    pub steps: Vec<Step>,
}

/// Recognized columns, resolved once from the header row. Unknown columns
/// have no slot here and are ignored by construction; duplicate headers keep
/// the last occurrence.
#[derive(Debug, Default)]
struct HeaderMap {
    category: Option<usize>,
    title: Option<usize>,
    content: Option<usize>,
    order: Option<usize>,
    active: Option<usize>,
    highlight: Option<usize>,
    steps: [Option<usize>; MAX_SHEET_STEPS],
}

impl HeaderMap {
    fn from_header(header: &[String]) -> Self {
        let mut map = Self::default();
        for (idx, raw) in header.iter().enumerate() {
            match raw.trim().to_lowercase().as_str() {
                "kategorie" => map.category = Some(idx),
                "titel" => map.title = Some(idx),
                "inhalt" => map.content = Some(idx),
                "reihenfolge" => map.order = Some(idx),
                "aktiv" => map.active = Some(idx),
                "highlight" => map.highlight = Some(idx),
                key => {
                    if let Some(position) = parse_step_key(key) {
                        map.steps[position - 1] = Some(idx);
                    }
                }
            }
        }
        map
    }

    /// Reads a trimmed field; missing columns and short rows read as empty.
    fn field<'a>(&self, row: &'a [String], slot: Option<usize>) -> &'a str {
        slot.and_then(|idx| row.get(idx))
            .map(|value| value.trim())
            .unwrap_or("")
    }
}

fn parse_step_key(key: &str) -> Option<usize> {
    let position = key.strip_prefix("schritt")?.parse::<usize>().ok()?;
    (1..=MAX_SHEET_STEPS).contains(&position).then_some(position)
}

/// Maps data rows against the header row into supplemental records.
///
/// Rows without a title are dropped; rows with a non-empty `aktiv` field are
/// kept only when it reads "ja" (case-insensitive). An unparseable
/// `reihenfolge` means "no order", which is distinct from an explicit 0.
pub fn normalize(header: &[String], rows: &[Vec<String>]) -> Vec<SheetRecord> {
    let map = HeaderMap::from_header(header);
    rows.iter()
        .filter_map(|row| normalize_row(&map, row))
        .collect()
}

fn normalize_row(map: &HeaderMap, row: &[String]) -> Option<SheetRecord> {
    let title = map.field(row, map.title);
    if title.is_empty() {
        return None;
    }
    let active = map.field(row, map.active);
    if !active.is_empty() && active.to_lowercase() != YES {
        return None;
    }

    let content = map.field(row, map.content);
    let order = map.field(row, map.order).parse::<i64>().ok();
    let highlight = map.field(row, map.highlight).to_lowercase() == YES;

    let mut steps = Vec::new();
    for (position, slot) in (1..).zip(map.steps.iter()) {
        let value = map.field(row, *slot);
        if value.is_empty() {
            continue;
        }
        steps.push(checklist_step(format!("Schritt {position}"), value));
    }
    // A row may carry prose only: fold the content field into a single step.
    if steps.is_empty() && !content.is_empty() {
        steps.push(checklist_step(title.to_string(), content));
    }

    Some(SheetRecord {
        category: map.field(row, map.category).to_string(),
        title: title.to_string(),
        intro: (!content.is_empty()).then(|| shorten_text(content, INTRO_MAX_LEN)),
        order,
        highlight,
        steps,
    })
}

fn checklist_step(title: String, description: &str) -> Step {
    Step {
        title,
        description: Some(description.to_string()),
        action_type: ActionType::Checklist,
        is_critical: false,
        contact: None,
        link: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["kategorie", "titel", "inhalt", "schritt1", "schritt2", "reihenfolge", "aktiv", "highlight"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_steps_from_step_columns() {
        let records = normalize(
            &header(),
            &[row(&["wartung", "Ölwechsel", "Alle 10.000 km", "Öl ablassen", "Öl auffüllen", "2", "ja", "ja"])],
        );
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.category, "wartung");
        assert_eq!(record.title, "Ölwechsel");
        assert_eq!(record.order, Some(2));
        assert!(record.highlight);
        assert_eq!(record.steps.len(), 2);
        assert_eq!(record.steps[0].title, "Schritt 1");
        assert_eq!(record.steps[0].description.as_deref(), Some("Öl ablassen"));
        assert_eq!(record.steps[0].action_type, ActionType::Checklist);
        assert_eq!(record.intro.as_deref(), Some("Alle 10.000 km"));
    }

    #[test]
    fn step_titles_keep_their_column_number() {
        let records = normalize(
            &header(),
            &[row(&["wartung", "Licht prüfen", "", "", "Fernlicht testen", "", "", ""])],
        );
        let steps = &records[0].steps;
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "Schritt 2");
    }

    #[test]
    fn rows_without_title_are_dropped() {
        let records = normalize(
            &header(),
            &[
                row(&["wartung", "", "Inhalt", "x", "", "", "nein", ""]),
                row(&["wartung", "   ", "Inhalt", "x", "", "", "ja", ""]),
            ],
        );
        assert!(records.is_empty());
    }

    #[test]
    fn active_filter_keeps_only_yes_or_empty() {
        let rows = [
            row(&["wartung", "Bleibt", "", "x", "", "", "", ""]),
            row(&["wartung", "Bleibt auch", "", "x", "", "", "JA", ""]),
            row(&["wartung", "Fliegt raus", "", "x", "", "", "Nein", ""]),
            row(&["wartung", "Fliegt auch raus", "", "x", "", "", "archiviert", ""]),
        ];
        let records = normalize(&header(), &rows);
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Bleibt", "Bleibt auch"]);
    }

    #[test]
    fn order_parse_failure_means_no_order() {
        let rows = [
            row(&["wartung", "Ohne", "", "x", "", "bald", "", ""]),
            row(&["wartung", "Null", "", "x", "", "0", "", ""]),
        ];
        let records = normalize(&header(), &rows);
        assert_eq!(records[0].order, None);
        assert_eq!(records[1].order, Some(0));
    }

    #[test]
    fn content_becomes_fallback_step() {
        let records = normalize(
            &header(),
            &[row(&["wartung", "Frostschutz", "Vor dem Winter Frostschutz kontrollieren.", "", "", "", "", ""])],
        );
        let record = &records[0];
        assert_eq!(record.steps.len(), 1);
        assert_eq!(record.steps[0].title, "Frostschutz");
        assert_eq!(
            record.steps[0].description.as_deref(),
            Some("Vor dem Winter Frostschutz kontrollieren.")
        );
    }

    #[test]
    fn empty_content_means_no_intro_and_no_fallback() {
        let records = normalize(&header(), &[row(&["wartung", "Leer", "", "", "", "", "", ""])]);
        let record = &records[0];
        assert!(record.intro.is_none());
        assert!(record.steps.is_empty());
    }

    #[test]
    fn long_content_is_shortened_but_fallback_keeps_full_text() {
        let long = "x".repeat(INTRO_MAX_LEN + 50);
        let records = normalize(&header(), &[row(&["wartung", "Lang", &long, "", "", "", "", ""])]);
        let record = &records[0];
        let intro = record.intro.as_deref().unwrap();
        assert_eq!(intro.chars().count(), INTRO_MAX_LEN);
        assert!(intro.ends_with('…'));
        assert_eq!(record.steps[0].description.as_deref(), Some(long.as_str()));
    }

    #[test]
    fn header_keys_are_case_insensitive_and_unknown_columns_ignored() {
        let header = row(&["Kategorie", " TITEL ", "notizen", "Schritt1"]);
        let records = normalize(&header, &[row(&["wartung", "Titel", "geheim", "Los"])]);
        let record = &records[0];
        assert_eq!(record.title, "Titel");
        // "notizen" is not part of the schema
        assert!(record.intro.is_none());
        assert_eq!(record.steps.len(), 1);
    }

    #[test]
    fn short_rows_read_missing_fields_as_empty() {
        let records = normalize(&header(), &[row(&["wartung", "Kurz"])]);
        let record = &records[0];
        assert!(record.intro.is_none());
        assert!(record.steps.is_empty());
        assert_eq!(record.order, None);
        assert!(!record.highlight);
    }

    #[test]
    fn step_key_range_is_bounded() {
        assert_eq!(parse_step_key("schritt1"), Some(1));
        assert_eq!(parse_step_key("schritt20"), Some(20));
        assert_eq!(parse_step_key("schritt21"), None);
        assert_eq!(parse_step_key("schritt0"), None);
        assert_eq!(parse_step_key("schrittx"), None);
    }
}
