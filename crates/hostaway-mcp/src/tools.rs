//! Tool definitions and dispatch for the calling agent.
//!
//! Each tool validates its arguments, calls the `ApiClient`, and returns the
//! result as pretty-printed JSON text. Failures of any kind (unknown tool,
//! bad arguments, auth or API errors) become an `isError` result.

use anyhow::{bail, Context, Result};
use hostaway_core::models::{ListingsQuery, SortOrder};
use hostaway_core::ApiClient;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const SEARCH_LISTINGS: &str = "search-listings";
pub const GET_LISTING_DETAILS: &str = "get-listing-details";
pub const GET_PRICING_SETTINGS: &str = "get-pricing-settings";
pub const GET_BED_TYPES: &str = "get-bed-types";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    fn text(text: String) -> Self {
        Self {
            content: vec![TextContent { kind: "text", text }],
            is_error: false,
        }
    }

    fn error(message: String) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: format!("Error: {}", message),
            }],
            is_error: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListingIdArgs {
    #[serde(rename = "listingId", deserialize_with = "whole_number")]
    listing_id: i64,
}

/// Accept any JSON number with no fractional part, so `5` and `5.0` both work.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected a whole number, got {}", number))),
    }
}

fn listing_id_schema() -> Value {
    json!({
        "type": "object",
        "required": ["listingId"],
        "properties": {
            "listingId": { "type": "number", "description": "ID of the listing" }
        }
    })
}

/// Tool list advertised to the calling agent
pub fn tool_definitions() -> Value {
    let sort_orders: Vec<&str> = SortOrder::ALL.iter().map(SortOrder::as_str).collect();

    json!([
        {
            "name": SEARCH_LISTINGS,
            "description": "Search for property listings with various filters",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "limit": { "type": "number", "description": "Maximum number of items in the list" },
                    "offset": { "type": "number", "description": "Number of items to skip from beginning of the list" },
                    "sortOrder": { "type": "string", "enum": sort_orders, "description": "Sort order for results" },
                    "city": { "type": "string", "description": "Filter by city" },
                    "match": { "type": "string", "description": "Search a listing by listing name" },
                    "country": { "type": "string", "description": "Filter by country" },
                    "contactName": { "type": "string", "description": "Filter by contact name" },
                    "propertyTypeId": { "type": "number", "description": "Filter by property type ID" },
                    "includeResources": { "type": "number", "description": "If 1, response includes supplementary resources (default 0)" },
                    "availabilityDateStart": { "type": "string", "description": "Check-in date (YYYY-MM-DD format)" },
                    "availabilityDateEnd": { "type": "string", "description": "Check-out date (YYYY-MM-DD format)" },
                    "availabilityGuestNumber": { "type": "number", "description": "Listing person capacity" },
                    "userId": { "type": "number", "description": "Limit listings to those the user has access to" },
                    "latestActivityStart": { "type": "string", "description": "Filter by latest activity start date" },
                    "latestActivityEnd": { "type": "string", "description": "Filter by latest activity end date" },
                    "isBookingEngineActive": { "type": "boolean", "description": "Filter by active on booking engine status" }
                }
            }
        },
        {
            "name": GET_LISTING_DETAILS,
            "description": "Get detailed information about a specific listing",
            "inputSchema": listing_id_schema()
        },
        {
            "name": GET_PRICING_SETTINGS,
            "description": "Get pricing settings for a specific listing",
            "inputSchema": listing_id_schema()
        },
        {
            "name": GET_BED_TYPES,
            "description": "Get all available bed types for mapping",
            "inputSchema": { "type": "object", "properties": {} }
        }
    ])
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    // A tool called without arguments gets an empty object
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

async fn run_tool(api: &ApiClient, name: &str, arguments: Value) -> Result<Value> {
    let value = match name {
        SEARCH_LISTINGS => {
            let query: ListingsQuery = parse_args(name, arguments)?;
            serde_json::to_value(api.fetch_listings(&query).await?)?
        }
        GET_LISTING_DETAILS => {
            let args: ListingIdArgs = parse_args(name, arguments)?;
            serde_json::to_value(api.fetch_listing(args.listing_id).await?)?
        }
        GET_PRICING_SETTINGS => {
            let args: ListingIdArgs = parse_args(name, arguments)?;
            api.fetch_pricing_settings(args.listing_id).await?
        }
        GET_BED_TYPES => Value::Array(api.fetch_bed_types().await?),
        other => bail!("Unknown tool: {}", other),
    };
    Ok(value)
}

/// Run a tool and format its outcome for the calling agent.
pub async fn call_tool(api: &ApiClient, name: &str, arguments: Value) -> ToolResult {
    debug!(tool = name, "Calling tool");
    let outcome = run_tool(api, name, arguments)
        .await
        .and_then(|value| serde_json::to_string_pretty(&value).map_err(Into::into));

    match outcome {
        Ok(text) => ToolResult::text(text),
        Err(e) => {
            warn!(tool = name, error = %format!("{:#}", e), "Tool call failed");
            ToolResult::error(format!("{:#}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostaway_core::{Config, Credentials};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(base_url: &str, dir: &TempDir) -> ApiClient {
        let config = Config {
            api_base_url: base_url.to_string(),
            cache_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        ApiClient::new(&config, Credentials::new("abc", "xyz")).unwrap()
    }

    #[test]
    fn test_tool_definitions_list_four_tools() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![SEARCH_LISTINGS, GET_LISTING_DETAILS, GET_PRICING_SETTINGS, GET_BED_TYPES]
        );
        assert_eq!(tools[0]["inputSchema"]["properties"]["sortOrder"]["enum"][1], "nameReversed");
        assert_eq!(tools[1]["inputSchema"]["required"][0], "listingId");
    }

    #[test]
    fn test_error_result_serialization() {
        let value = serde_json::to_value(ToolResult::error("boom".to_string())).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Error: boom");

        let ok = serde_json::to_value(ToolResult::text("[]".to_string())).unwrap();
        assert!(ok.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let dir = TempDir::new().unwrap();
        let api = api_for("http://127.0.0.1:1", &dir);
        let result = call_tool(&api, "delete-everything", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.content[0].text, "Error: Unknown tool: delete-everything");
    }

    #[tokio::test]
    async fn test_missing_listing_id_is_error_result() {
        let dir = TempDir::new().unwrap();
        let api = api_for("http://127.0.0.1:1", &dir);
        let result = call_tool(&api, GET_LISTING_DETAILS, json!({})).await;
        assert!(result.is_error);
        assert!(result.content[0].text.contains("Invalid arguments for get-listing-details"));
        assert!(result.content[0].text.contains("listingId"));
    }

    #[test]
    fn test_listing_id_accepts_whole_floats() {
        let args: ListingIdArgs = parse_args(GET_LISTING_DETAILS, json!({"listingId": 5.0})).unwrap();
        assert_eq!(args.listing_id, 5);
        let args: ListingIdArgs = parse_args(GET_LISTING_DETAILS, json!({"listingId": 40160})).unwrap();
        assert_eq!(args.listing_id, 40160);

        assert!(parse_args::<ListingIdArgs>(GET_LISTING_DETAILS, json!({"listingId": 5.5})).is_err());
        assert!(parse_args::<ListingIdArgs>(GET_LISTING_DETAILS, json!({"listingId": "5"})).is_err());
    }

    #[tokio::test]
    async fn test_bad_sort_order_is_error_result() {
        let dir = TempDir::new().unwrap();
        let api = api_for("http://127.0.0.1:1", &dir);
        let result = call_tool(&api, SEARCH_LISTINGS, json!({"sortOrder": "price"})).await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_bed_types_returned_as_pretty_json() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/accessTokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "expires_in": 3600,
                "access_token": "tok1",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bedTypes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "result": [{"id": 1, "name": "King"}]
            })))
            .mount(&server)
            .await;

        let api = api_for(&server.uri(), &dir);
        let result = call_tool(&api, GET_BED_TYPES, Value::Null).await;
        assert!(!result.is_error);

        let parsed: Value = serde_json::from_str(&result.content[0].text).unwrap();
        assert_eq!(parsed, json!([{"id": 1, "name": "King"}]));
        assert!(result.content[0].text.contains('\n'));
    }

    #[tokio::test]
    async fn test_auth_failure_is_error_result() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/accessTokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Invalid client"
            })))
            .mount(&server)
            .await;

        let api = api_for(&server.uri(), &dir);
        let result = call_tool(&api, GET_PRICING_SETTINGS, json!({"listingId": 5})).await;
        assert!(result.is_error);
        assert_eq!(
            result.content[0].text,
            "Error: Failed to get access token: Invalid client"
        );
    }
}
