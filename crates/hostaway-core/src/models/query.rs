use serde::{Deserialize, Serialize};

/// Sort order accepted by the listings search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Name,
    NameReversed,
    Order,
    OrderReversed,
    ContactName,
    ContactNameReversed,
    LatestActivity,
    LatestActivityDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 8] = [
        SortOrder::Name,
        SortOrder::NameReversed,
        SortOrder::Order,
        SortOrder::OrderReversed,
        SortOrder::ContactName,
        SortOrder::ContactNameReversed,
        SortOrder::LatestActivity,
        SortOrder::LatestActivityDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Name => "name",
            SortOrder::NameReversed => "nameReversed",
            SortOrder::Order => "order",
            SortOrder::OrderReversed => "orderReversed",
            SortOrder::ContactName => "contactName",
            SortOrder::ContactNameReversed => "contactNameReversed",
            SortOrder::LatestActivity => "latestActivity",
            SortOrder::LatestActivityDesc => "latestActivityDesc",
        }
    }
}

/// Filters for `GET /listings`. Unset filters are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Search by listing name
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "match")]
    pub name_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type_id: Option<i64>,
    /// 1 to include supplementary resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_resources: Option<u8>,
    /// Check-in date, YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_date_start: Option<String>,
    /// Check-out date, YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_date_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_guest_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_activity_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_activity_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_booking_engine_active: Option<bool>,
}

impl ListingsQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}
