use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sizes offered by the table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const OFFERED: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::OFFERED
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("Page size must be one of 10, 25, 50 (got {})", value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// One page of a derived list with the "Showing X-Y of Z" figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    /// Current page (1-indexed), after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; 0 for an empty list.
    pub total_pages: usize,
    /// 1-based index of the first row shown. Absent when the list is empty.
    pub start_item: Option<usize>,
    /// 1-based index of the last row shown. Absent when the list is empty.
    pub end_item: Option<usize>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: usize, page_size: PageSize, total_items: usize) -> Self {
        let size = page_size.get();
        let total_pages = total_items.div_ceil(size);
        let (start_item, end_item) = if total_items == 0 {
            (None, None)
        } else {
            (Some((page - 1) * size + 1), Some((page * size).min(total_items)))
        };

        Self {
            data,
            page,
            page_size: size,
            total_items,
            total_pages,
            start_item,
            end_item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_offered_sizes_convert() {
        assert_eq!(PageSize::try_from(25), Ok(PageSize::TwentyFive));
        assert!(PageSize::try_from(20).is_err());
        assert!(PageSize::try_from(0).is_err());
    }

    #[test]
    fn page_size_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PageSize::Fifty).unwrap(), "50");
        assert_eq!(serde_json::from_str::<PageSize>("10").unwrap(), PageSize::Ten);
        assert!(serde_json::from_str::<PageSize>("11").is_err());
    }

    #[test]
    fn empty_list_hides_item_range() {
        let page: PaginatedResponse<u8> = PaginatedResponse::new(vec![], 1, PageSize::Ten, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.start_item, None);
        assert_eq!(page.end_item, None);
    }

    #[test]
    fn last_page_end_item_is_clipped() {
        let page = PaginatedResponse::new(vec![1, 2], 3, PageSize::Ten, 22);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.start_item, Some(21));
        assert_eq!(page.end_item, Some(22));
    }
}
