//! Dashboard-side views over a full complaint listing.
//!
//! Stores return everything; narrowing and counting happen here so the
//! storage contract stays free of query predicates.

use crate::features::complaints::dtos::ComplaintSummaryDto;
use crate::features::complaints::models::{Complaint, ComplaintCategory, ComplaintStatus};

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub category: Option<ComplaintCategory>,
    /// Case-insensitive substring of `location`. Blank means no filter.
    pub location: Option<String>,
}

impl ComplaintFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.category.is_none() && self.location_needle().is_none()
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        if self.status.is_some_and(|s| s != complaint.status) {
            return false;
        }
        if self.category.is_some_and(|c| c != complaint.category) {
            return false;
        }
        match self.location_needle() {
            Some(needle) => complaint
                .location
                .as_deref()
                .is_some_and(|loc| loc.to_lowercase().contains(&needle)),
            None => true,
        }
    }

    /// Keep matching complaints, preserving order
    pub fn apply(&self, complaints: Vec<Complaint>) -> Vec<Complaint> {
        if self.is_empty() {
            return complaints;
        }
        complaints.into_iter().filter(|c| self.matches(c)).collect()
    }

    fn location_needle(&self) -> Option<String> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Count complaints per status
pub fn summarize(complaints: &[Complaint]) -> ComplaintSummaryDto {
    complaints.iter().fold(
        ComplaintSummaryDto {
            total: complaints.len() as i64,
            ..Default::default()
        },
        |mut summary, complaint| {
            match complaint.status {
                ComplaintStatus::Pending => summary.pending += 1,
                ComplaintStatus::InProgress => summary.in_progress += 1,
                ComplaintStatus::Resolved => summary.resolved += 1,
            }
            summary
        },
    )
}
