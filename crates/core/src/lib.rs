mod error;
mod merge;
mod model;
mod search;
mod sheet;
mod slug;
mod text;

pub use error::{HelpError, Result};
pub use merge::{merge_records, MergeOutcome, ORDER_SENTINEL};
pub use model::{
    find_category, find_topic, parse_categories, ActionType, Category, ContactInfo, LinkInfo,
    Step, Topic,
};
pub use search::{search, HitKind, SearchHit, MAX_SEARCH_RESULTS};
pub use sheet::{decode, normalize, SheetRecord, INTRO_MAX_LEN, MAX_SHEET_STEPS};
pub use slug::slugify;
pub use text::shorten_text;
