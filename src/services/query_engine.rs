use chrono::NaiveDate;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::models::talent::{CandidateRecord, RecruitmentChannel, TalentId, TalentStatus};

/// Inclusive entry-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Conjunction of the list filters. `None` (or an empty keyword) disables a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalentFilter {
    pub id: Option<TalentId>,
    pub keyword: Option<String>,
    pub status: Option<TalentStatus>,
    pub channel: Option<RecruitmentChannel>,
    pub date_range: Option<DateRange>,
}

impl TalentFilter {
    pub fn matches(&self, record: &CandidateRecord) -> bool {
        if let Some(id) = &self.id {
            if &record.id != id {
                return false;
            }
        }

        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            let keyword = keyword.to_lowercase();
            let hit = record.name.to_lowercase().contains(&keyword)
                || record.phone.contains(&keyword)
                || record.position.to_lowercase().contains(&keyword);
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }

        if let Some(channel) = self.channel {
            if record.recruitment_channel != channel {
                return false;
            }
        }

        if let Some(range) = &self.date_range {
            match record.entry_time {
                Some(entry) if range.contains(entry) => {}
                _ => return false,
            }
        }

        true
    }
}

/// 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Index range of this page inside a filtered set of `total` items.
    /// Non-positive page numbers or sizes select nothing.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        if self.page <= 0 || self.page_size <= 0 {
            return 0..0;
        }
        let size = self.page_size as u128;
        let start = (self.page as u128 - 1) * size;
        let total_wide = total as u128;
        if start >= total_wide {
            return 0..0;
        }
        let end = (start + size).min(total_wide);
        start as usize..end as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub items: Vec<CandidateRecord>,
    /// Size of the filtered set before pagination.
    pub total: i64,
}

pub fn query<'a, I>(collection: I, filter: &TalentFilter, page: PageRequest) -> QueryResult
where
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    let matching: Vec<&CandidateRecord> = collection
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect();
    let total = matching.len();
    let items = matching[page.bounds(total)]
        .iter()
        .map(|record| (*record).clone())
        .collect();

    QueryResult {
        items,
        total: total as i64,
    }
}

/// Whether status changes must follow the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may be set from any other status.
    #[default]
    Unchecked,
    Enforced,
}

impl TransitionPolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            TransitionPolicy::Enforced
        } else {
            TransitionPolicy::Unchecked
        }
    }

    pub fn check(self, id: &TalentId, from: TalentStatus, to: TalentStatus) -> Result<()> {
        if self == TransitionPolicy::Enforced && !from.can_transition_to(to) {
            return Err(Error::validation(format!(
                "Talent {} cannot move from {} to {}",
                id, from, to
            )));
        }
        Ok(())
    }
}
