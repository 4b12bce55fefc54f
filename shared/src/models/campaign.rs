//! Campaign Model

use serde::{Deserialize, Serialize};

use super::item::ItemCreate;

/// Campaign status — two states only, toggled by explicit organizer action.
///
/// The start/end date window gates order acceptance independently of this
/// flag; elapsing the window never flips the status by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CampaignStatus {
    Open,
    Closed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Open => "open",
            CampaignStatus::Closed => "closed",
        }
    }
}

/// Campaign entity — one group-purchase round with its own catalog
/// and order window.
///
/// `start_date` / `end_date` are `YYYY-MM-DD` strings; either bound may
/// be unset, meaning unbounded on that side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: i64,
}

/// Create campaign payload — a campaign is created together with its
/// initial item set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub items: Vec<ItemCreate>,
}

/// Update campaign payload (full update of the editable fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
