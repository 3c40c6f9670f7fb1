//! Listing query parameters.
//!
//! The content listing accepts flat string parameters:
//!
//! | Key | Example | Effect |
//! |-----|---------|--------|
//! | `title` | `alp` | title substring |
//! | `file_name` | `.pdf` | file name substring |
//! | `copyright` | `cc-by` | copyright substring |
//! | `active` | `true` | `true` (any case) is true, anything else false |
//! | `metadata` | `1,2` | required value ids |
//! | `published_date` / `years` | `1990,2005` | year range (first two items) |
//! | `sort` | `-title` | sort key |
//! | `page`, `page_size` | `2`, `50` | pagination |
//!
//! Malformed `metadata`, `published_date` and pagination values are dropped
//! with a warning instead of failing the request. A single year is kept as a
//! lower bound only, which the predicate compiler then rejects. Unknown keys
//! are ignored.

use tracing::warn;

use super::{FilterDescriptor, YearBounds};
use crate::model::MetadataId;
use crate::query::PageRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub descriptor: FilterDescriptor,
    pub page: PageRequest,
    /// One line per dropped parameter.
    pub warnings: Vec<String>,
}

impl ParsedQuery {
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

pub fn parse_query_params<I, K, V>(params: I) -> ParsedQuery
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parsed = ParsedQuery::default();

    for (key, value) in params {
        let value = value.as_ref();
        match key.as_ref() {
            "title" => parsed.descriptor.title = Some(value.to_string()),
            "file_name" | "filename" => parsed.descriptor.file_name = Some(value.to_string()),
            "copyright" => parsed.descriptor.copyright = Some(value.to_string()),
            "active" => parsed.descriptor.active = Some(value.eq_ignore_ascii_case("true")),
            "metadata" => match parse_id_list(value) {
                Ok(ids) => parsed.descriptor.metadata = Some(ids),
                Err(bad) => {
                    parsed.descriptor.metadata = None;
                    parsed.warn(format!("ignoring metadata filter: '{}' is not an id", bad));
                }
            },
            "published_date" | "years" => match parse_years(value) {
                Ok(bounds) => parsed.descriptor.years = Some(bounds),
                Err(bad) => {
                    parsed.descriptor.years = None;
                    parsed.warn(format!("ignoring year range: '{}' is not a year", bad));
                }
            },
            "sort" => parsed.descriptor.sort = Some(value.to_string()),
            "page" => match parse_count(value) {
                Some(page) => parsed.page.page = Some(page),
                None => parsed.warn(format!("ignoring page: '{}' is not a number", value)),
            },
            "page_size" => match parse_count(value) {
                Some(size) => parsed.page.page_size = Some(size),
                None => parsed.warn(format!("ignoring page_size: '{}' is not a number", value)),
            },
            _ => {}
        }
    }

    parsed
}

fn parse_id_list(raw: &str) -> Result<Vec<MetadataId>, String> {
    raw.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<MetadataId>().map_err(|_| item.to_string())
        })
        .collect()
}

fn parse_years(raw: &str) -> Result<YearBounds, String> {
    let mut years = raw.split(',').take(2).map(|item| {
        let item = item.trim();
        item.parse::<i32>().map_err(|_| item.to_string())
    });
    let lo = years.next().transpose()?;
    let hi = years.next().transpose()?;
    Ok(YearBounds { lo, hi })
}

fn parse_count(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}
