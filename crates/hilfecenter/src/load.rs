use anyhow::{Context, Result};
use hilfecenter_core::{decode, merge_records, normalize, parse_categories, Category, SheetRecord};

use crate::fetch::{self, Source};
use crate::logging;

/// Loads the base tree and folds the supplemental sheet into it.
///
/// The base fetch and parse are fatal; the sheet is best effort, any
/// failure there is logged and the load proceeds with base content only.
pub fn load_content(base: &Source, sheet: Option<&Source>) -> Result<Vec<Category>> {
    load_with(base, sheet, fetch::fetch_text)
}

fn load_with<F>(base: &Source, sheet: Option<&Source>, fetch_fn: F) -> Result<Vec<Category>>
where
    F: Fn(&Source) -> Result<String>,
{
    let raw = fetch_fn(base).with_context(|| format!("failed to load {}", base.describe()))?;
    let mut categories = parse_categories(&raw)
        .with_context(|| format!("invalid base content in {}", base.describe()))?;
    logging::verbose(format!("loaded {} categories", categories.len()));

    let Some(sheet) = sheet else {
        return Ok(categories);
    };
    match sheet_records(sheet, &fetch_fn) {
        Ok(records) if records.is_empty() => {
            logging::verbose("sheet contained no usable rows");
        }
        Ok(records) => {
            let outcome = merge_records(&mut categories, &records);
            logging::stage(
                "sheet",
                format!("merged {} topics, {} skipped", outcome.merged, outcome.skipped),
            );
        }
        Err(err) => {
            logging::stage("sheet", format!("supplemental content unavailable: {err:#}"));
        }
    }
    Ok(categories)
}

fn sheet_records<F>(source: &Source, fetch_fn: &F) -> Result<Vec<SheetRecord>>
where
    F: Fn(&Source) -> Result<String>,
{
    let text = fetch_fn(source)?;
    let rows = decode(&text);
    // first row is the header; a header-only sheet carries nothing
    match rows.split_first() {
        Some((header, data)) if !data.is_empty() => Ok(normalize(header, data)),
        _ => Ok(Vec::new()),
    }
}
