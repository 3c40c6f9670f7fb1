//! Page-number pagination.
//!
//! Pages are 1-based. An empty collection still has one (empty) page, so page 1
//! is always valid; asking for any page past the last one is an error.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{ContentError, Result};

/// Requested page and page size. `None` means "use the default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Pick `page` and `page_size` out of listing parameters. Malformed values
    /// are ignored, see [`crate::filter::parse_query_params`].
    pub fn from_query_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        crate::filter::parse_query_params(params).page
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    /// Number of items across all pages
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest, config: &EngineConfig) -> Result<Page<T>> {
    let page_size = config.page_size(request.page_size);
    let page = request.page.unwrap_or(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);

    if page == 0 || page > total_pages {
        return Err(ContentError::PageOutOfRange {
            page,
            last: total_pages,
        });
    }

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(Page {
        items,
        page,
        page_size,
        total,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_first_page() {
        let page = paginate((1..=30).collect::<Vec<i32>>(), PageRequest::default(), &EngineConfig::default())
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 25);
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.total, 30);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(
            (1..=30).collect::<Vec<i32>>(),
            PageRequest::new(2, 25),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(page.items, (26..=30).collect::<Vec<_>>());
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let page = paginate(Vec::<i32>::new(), PageRequest::default(), &EngineConfig::default())
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_out_of_range_pages() {
        let config = EngineConfig::default();
        assert!(matches!(
            paginate(vec![1, 2, 3], PageRequest::new(2, 3), &config),
            Err(ContentError::PageOutOfRange { page: 2, last: 1 })
        ));
        assert!(matches!(
            paginate(vec![1, 2, 3], PageRequest::new(0, 3), &config),
            Err(ContentError::PageOutOfRange { page: 0, .. })
        ));
    }

    #[test]
    fn test_request_from_query_params() {
        let request = PageRequest::from_query_params([("title", "x"), ("page", "3"), ("page_size", "ten")]);
        assert_eq!(
            request,
            PageRequest {
                page: Some(3),
                page_size: None
            }
        );
    }

    #[test]
    fn test_page_size_is_clamped() {
        let config = EngineConfig {
            max_page_size: 4,
            ..EngineConfig::default()
        };
        let page = paginate((1..=10).collect::<Vec<i32>>(), PageRequest::new(1, 50), &config)
            .unwrap();
        assert_eq!(page.page_size, 4);
        assert_eq!(page.total_pages, 3);
    }
}
