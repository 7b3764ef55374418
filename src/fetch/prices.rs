use reqwest::Client;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::fetch::{classify_transport, json_headers, FetchError, MISSING_PRICE};

const PRICE_LIST_OPTION: &str = "PriceListToday";

/// Normalized daily price snapshot; every field is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSnapshot {
    pub gold_price_1g: String,
    pub gold_price_8g: String,
    pub silver_price_1g: String,
}

/// What triggered a fetch; decides which busy indicator the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Auto,
    Manual,
}

/// Completion notice delivered back to the dashboard loop.
#[derive(Debug)]
pub struct FetchOutcome {
    pub kind: FetchKind,
    pub result: Result<PriceSnapshot, FetchError>,
}

pub async fn fetch_price_list(
    client: &Client,
    config: &AppConfig,
) -> Result<PriceSnapshot, FetchError> {
    let response = client
        .get(config.endpoint_url())
        .query(&[("option", PRICE_LIST_OPTION)])
        .headers(json_headers())
        .send()
        .await
        .map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status.as_u16()));
    }

    let body: Value = response.json().await.map_err(classify_transport)?;
    Ok(normalize_snapshot(&body))
}

/// Run the price fetch on a background task and report through `tx`.
///
/// The receiver lives in the dashboard loop. Once the screen is left the
/// send fails and the outcome is dropped, so no update can land on an
/// unmounted screen. Screen loops let the returned handle detach; the
/// channel is their only link back to the task.
pub fn spawn_price_fetch(
    client: Client,
    config: AppConfig,
    kind: FetchKind,
    tx: UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = fetch_price_list(&client, &config).await;
        if let Err(err) = &result {
            log::warn!("price fetch failed: {err}");
        }
        let _ = tx.send(FetchOutcome { kind, result });
    })
}

/// Collapse the endpoint's two field spellings into the fixed snapshot shape.
pub fn normalize_snapshot(body: &Value) -> PriceSnapshot {
    PriceSnapshot {
        gold_price_1g: price_field(body, &["goldPrice1g", "gold_price_1g"]),
        gold_price_8g: price_field(body, &["goldPrice8g", "gold_price_8g"]),
        silver_price_1g: price_field(body, &["silverPrice1g", "silver_price_1g"]),
    }
}

fn price_field(body: &Value, spellings: &[&str]) -> String {
    spellings
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(display_value)
        .unwrap_or_else(|| MISSING_PRICE.to_string())
}

// The endpoint is loosely typed: prices arrive as strings or bare numbers.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_case_body_normalizes_like_camel_case() {
        let camel = normalize_snapshot(&json!({
            "goldPrice1g": "6200",
            "goldPrice8g": "49600",
            "silverPrice1g": "75"
        }));
        let snake = normalize_snapshot(&json!({
            "gold_price_1g": "6200",
            "gold_price_8g": "49600",
            "silver_price_1g": "75"
        }));
        assert_eq!(camel, snake);
        assert_eq!(camel.gold_price_1g, "6200");
    }

    #[test]
    fn missing_fields_become_placeholder() {
        let snapshot = normalize_snapshot(&json!({
            "gold_price_1g": "6200",
            "goldPrice8g": "49600"
        }));
        assert_eq!(
            snapshot,
            PriceSnapshot {
                gold_price_1g: "6200".to_string(),
                gold_price_8g: "49600".to_string(),
                silver_price_1g: MISSING_PRICE.to_string(),
            }
        );
    }

    #[test]
    fn empty_body_yields_all_placeholders() {
        let snapshot = normalize_snapshot(&json!({}));
        assert_eq!(snapshot.gold_price_1g, MISSING_PRICE);
        assert_eq!(snapshot.gold_price_8g, MISSING_PRICE);
        assert_eq!(snapshot.silver_price_1g, MISSING_PRICE);
    }

    #[test]
    fn numeric_prices_render_as_text() {
        let snapshot = normalize_snapshot(&json!({ "goldPrice1g": 6200 }));
        assert_eq!(snapshot.gold_price_1g, "6200");
    }

    #[test]
    fn null_and_structured_values_count_as_missing() {
        let snapshot = normalize_snapshot(&json!({
            "goldPrice1g": null,
            "goldPrice8g": ["49600"]
        }));
        assert_eq!(snapshot.gold_price_1g, MISSING_PRICE);
        assert_eq!(snapshot.gold_price_8g, MISSING_PRICE);
    }

    #[tokio::test]
    async fn outcome_after_screen_unmount_is_discarded() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<FetchOutcome>();
        // Leaving the dashboard drops the receiver.
        drop(rx);

        let client = Client::new();
        let config = AppConfig::with_base_url("http://127.0.0.1:1");
        let handle = spawn_price_fetch(client, config, FetchKind::Auto, tx);

        handle
            .await
            .expect("fetch task finishes cleanly with no receiver to deliver to");
    }
}
