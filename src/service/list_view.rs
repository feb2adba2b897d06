use crate::error::app_error::AppError;
use crate::models::budget::BudgetSummary;
use crate::models::campaign::{Campaign, CampaignStatus};
use crate::models::pagination::{PageSize, PaginatedResponse};
use crate::service::budget::budget_summary;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Status choices offered above the campaign table.
///
/// Each label maps to exactly one upstream status, except `All States`.
/// `Alerts` and `Warning` are display names for `Pending` and `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    AllStates,
    Active,
    InReview,
    Paused,
    Alerts,
    Warning,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 6] = [
        StatusFilter::AllStates,
        StatusFilter::Active,
        StatusFilter::InReview,
        StatusFilter::Paused,
        StatusFilter::Alerts,
        StatusFilter::Warning,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::AllStates => "All States",
            StatusFilter::Active => "Active",
            StatusFilter::InReview => "In Review",
            StatusFilter::Paused => "Paused",
            StatusFilter::Alerts => "Alerts",
            StatusFilter::Warning => "Warning",
        }
    }

    /// The upstream status selected by this filter; `None` selects everything.
    pub fn status(self) -> Option<CampaignStatus> {
        match self {
            StatusFilter::AllStates => None,
            StatusFilter::Active => Some(CampaignStatus::Active),
            StatusFilter::InReview => Some(CampaignStatus::Review),
            StatusFilter::Paused => Some(CampaignStatus::Paused),
            StatusFilter::Alerts => Some(CampaignStatus::Pending),
            StatusFilter::Warning => Some(CampaignStatus::Completed),
        }
    }

    pub fn matches(self, status: CampaignStatus) -> bool {
        self.status().is_none_or(|wanted| wanted == status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    /// Accepts a label ("In Review") or the upstream status it stands for ("Review"),
    /// ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_filter(s);
        if wanted.is_empty() || wanted == "all" {
            return Ok(StatusFilter::AllStates);
        }

        StatusFilter::ALL
            .into_iter()
            .find(|filter| {
                normalize_filter(filter.label()) == wanted || filter.status().is_some_and(|status| normalize_filter(status.as_str()) == wanted)
            })
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status filter '{}'", s)))
    }
}

fn normalize_filter(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Search, status and pagination state behind one campaign table.
///
/// Changing the search text, the status filter or the page size sends the
/// view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    search: String,
    status: StatusFilter,
    page: usize,
    page_size: PageSize,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::AllStates,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl ListViewState {
    /// Applies the filters first, then the requested page.
    pub fn new(search: impl Into<String>, status: StatusFilter, page: usize, page_size: PageSize) -> Self {
        let mut state = Self::default();
        state.set_search(search);
        state.set_status(status);
        state.set_page_size(page_size);
        state.set_page(page);
        state
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// Campaign row as shown in the table: the campaign plus its derived figures.
#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRow {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub status_label: &'static str,
    pub budget_summary: BudgetSummary,
}

impl From<&Campaign> for CampaignRow {
    fn from(campaign: &Campaign) -> Self {
        Self {
            campaign: campaign.clone(),
            status_label: campaign.status.label(),
            budget_summary: budget_summary(campaign),
        }
    }
}

pub type CampaignPage = PaginatedResponse<CampaignRow>;

/// Case-insensitive substring match on the campaign or client name.
/// Only an empty query matches everything; whitespace is part of the needle.
pub fn matches_search(campaign: &Campaign, query: &str) -> bool {
    let needle = query.to_lowercase();
    needle.is_empty() || campaign.name.to_lowercase().contains(&needle) || campaign.client_name.to_lowercase().contains(&needle)
}

/// Search then status filter, preserving the input order.
pub fn filter_campaigns<'a>(campaigns: &'a [Campaign], search: &str, status: StatusFilter) -> Vec<&'a Campaign> {
    campaigns
        .iter()
        .filter(|campaign| matches_search(campaign, search))
        .filter(|campaign| status.matches(campaign.status))
        .collect()
}

/// Pulls an out-of-range page back to the last page (page 1 for an empty list).
pub fn clamp_page(page: usize, total_items: usize, page_size: PageSize) -> usize {
    let last_page = total_items.div_ceil(page_size.get()).max(1);
    page.clamp(1, last_page)
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: PageSize) -> PaginatedResponse<T> {
    let page = clamp_page(page, items.len(), page_size);
    let data = items.iter().skip((page - 1) * page_size.get()).take(page_size.get()).cloned().collect();
    PaginatedResponse::new(data, page, page_size, items.len())
}

/// Derives the visible page of the campaign table from the full collection.
pub fn derive_page(campaigns: &[Campaign], state: &ListViewState) -> CampaignPage {
    let filtered = filter_campaigns(campaigns, state.search(), state.status());
    let page = paginate(&filtered, state.page(), state.page_size());

    PaginatedResponse {
        data: page.data.into_iter().map(CampaignRow::from).collect(),
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        start_item: page.start_item,
        end_item: page.end_item,
    }
}
