use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A property listing.
///
/// Only the identity and descriptive text fields are named. Numeric,
/// pricing and nested fields arrive with inconsistent wire types, so they
/// stay in `extra` exactly as the API sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_listing_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Listing {
    /// Display name, falling back to the internal name.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.internal_listing_name.as_deref())
            .unwrap_or("(unnamed)")
    }

    /// "City, Country" style location, skipping missing parts.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_keeps_unknown_fields() {
        let raw = json!({
            "id": 40160,
            "name": "Beach House",
            "city": "Lisbon",
            "countryCode": "PT",
            "personCapacity": 6,
            "listingAmenities": [{"id": 1, "amenityId": 2, "amenityName": "Wifi"}],
            "customFieldValues": [{"customFieldId": 5, "value": "x"}]
        });
        let listing: Listing = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(listing.id, 40160);
        assert_eq!(listing.display_name(), "Beach House");
        assert_eq!(listing.extra["personCapacity"], 6);
        assert_eq!(listing.extra["countryCode"], "PT");

        let back = serde_json::to_value(&listing).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_null_collections_and_name() {
        let raw = json!({
            "id": 3,
            "name": null,
            "internalListingName": "Unit 3B",
            "listingImages": null,
            "listingAmenities": null
        });
        let listing: Listing = serde_json::from_value(raw).unwrap();
        assert_eq!(listing.name, None);
        assert_eq!(listing.display_name(), "Unit 3B");
        assert!(listing.extra["listingImages"].is_null());
        assert!(listing.extra["listingAmenities"].is_null());
    }

    #[test]
    fn test_partial_amenities_and_string_numbers() {
        let raw = json!({
            "id": 4,
            "price": "120.00",
            "cleaningFee": "35",
            "bathroomsNumber": 1.5,
            "listingAmenities": [{"amenityName": "Pool"}],
            "listingImages": [{"caption": "Front"}]
        });
        let listing: Listing = serde_json::from_value(raw).unwrap();
        assert_eq!(listing.display_name(), "(unnamed)");
        assert_eq!(listing.extra["price"], "120.00");
        assert_eq!(listing.extra["cleaningFee"], "35");
        assert_eq!(listing.extra["bathroomsNumber"], 1.5);
        assert_eq!(listing.extra["listingAmenities"][0]["amenityName"], "Pool");
        assert_eq!(listing.extra["listingImages"][0]["caption"], "Front");
    }

    #[test]
    fn test_listing_location() {
        let mut listing: Listing = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(listing.location(), None);
        listing.city = Some("Porto".to_string());
        assert_eq!(listing.location().as_deref(), Some("Porto"));
        listing.country = Some("Portugal".to_string());
        assert_eq!(listing.location().as_deref(), Some("Porto, Portugal"));
    }
}
