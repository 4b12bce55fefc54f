//! Campaign lifecycle gating
//!
//! A campaign accepts orders iff its status is `open` AND the as-of date
//! falls inside its (optional) start/end window. Status and window are
//! independent: the organizer toggles status manually, and an elapsed
//! window never flips the status on its own. Management views therefore
//! list by status alone, while the customer-facing "accepting" view
//! applies both conditions.

use chrono::NaiveDate;
use shared::models::{Campaign, CampaignStatus};

/// Parse a stored `YYYY-MM-DD` bound. A malformed value is treated as
/// unset (unbounded on that side) rather than failing the whole check.
fn parse_bound(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(value = raw, error = %e, "Malformed campaign date, treating as unset");
            None
        }
    }
}

/// Whether the campaign accepts new or revised orders as of `as_of`.
pub fn is_accepting_orders(campaign: &Campaign, as_of: NaiveDate) -> bool {
    if campaign.status != CampaignStatus::Open {
        return false;
    }
    if let Some(start) = parse_bound(campaign.start_date.as_deref())
        && start > as_of
    {
        return false;
    }
    if let Some(end) = parse_bound(campaign.end_date.as_deref())
        && end < as_of
    {
        return false;
    }
    true
}

/// Today's date (UTC), the as-of value used by the HTTP surface.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
