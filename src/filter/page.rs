use serde::Deserialize;

use super::error::FilterError;

/// Fixed window size for every paginated listing
pub const PAGE_SIZE: usize = 10;

/// `?page=N` query string. Kept as text so a non-numeric value is reported
/// as a validation error rather than a framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Result<usize, FilterError> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => {
                let page: i64 = raw
                    .parse()
                    .map_err(|_| FilterError::InvalidPage(format!("'{}' is not a number", raw)))?;
                if page < 1 {
                    return Err(FilterError::InvalidPage("page numbers start at 1".to_string()));
                }
                usize::try_from(page).map_err(|_| FilterError::PageOutOfRange(usize::MAX))
            }
        }
    }
}

/// One window over an ordered collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole collection, not of this window
    pub total: usize,
}

/// Slice `items` to the 1-based `page`. An empty window is `PageOutOfRange`,
/// including page 1 of an empty collection.
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Result<Page<T>, FilterError> {
    if page < 1 {
        return Err(FilterError::InvalidPage("page numbers start at 1".to_string()));
    }
    let start = (page - 1)
        .checked_mul(PAGE_SIZE)
        .ok_or(FilterError::PageOutOfRange(page))?;
    if start >= items.len() {
        return Err(FilterError::PageOutOfRange(page));
    }
    let end = (start + PAGE_SIZE).min(items.len());
    Ok(Page {
        items: items[start..end].to_vec(),
        total: items.len(),
    })
}
