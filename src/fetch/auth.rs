use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::AppConfig;
use crate::fetch::{classify_transport, json_headers, FetchError};

const LOGIN_OPTION: &str = "LoginVerifyCustomer";
const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
const MIN_MOBILE_LEN: usize = 10;

pub const GENERIC_LOGIN_FAILURE: &str = "Invalid mobile number or password.";

/// Transient login form contents; serialized straight into the query string.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    pub password: String,
}

pub type LoginResult = Result<(), FetchError>;

/// Local pre-network checks; returns the trimmed credentials to submit.
pub fn validate_credentials(mobile_number: &str, password: &str) -> Result<Credentials, FetchError> {
    let mobile = mobile_number.trim();
    if mobile.is_empty() {
        return Err(FetchError::Validation(
            "Please enter your mobile number.".to_string(),
        ));
    }
    // Characters, not bytes; digits outside ASCII must not slip through.
    if mobile.chars().count() < MIN_MOBILE_LEN {
        return Err(FetchError::Validation(format!(
            "Mobile number must be at least {MIN_MOBILE_LEN} characters."
        )));
    }
    if password.is_empty() {
        return Err(FetchError::Validation(
            "Please enter your password.".to_string(),
        ));
    }

    Ok(Credentials {
        mobile_number: mobile.to_string(),
        password: password.to_string(),
    })
}

/// Verify a customer against the legacy endpoint.
pub async fn verify_customer(
    client: &Client,
    config: &AppConfig,
    credentials: &Credentials,
) -> LoginResult {
    let response = client
        .get(config.endpoint_url())
        .query(&[("option", LOGIN_OPTION)])
        .query(credentials)
        .headers(json_headers())
        .send()
        .await
        .map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status.as_u16()));
    }

    let body: Value = response.json().await.map_err(classify_transport)?;
    if login_succeeded(&body) {
        Ok(())
    } else {
        Err(FetchError::Credential(failure_message(&body)))
    }
}

/// Run the verification on a background task and report through `tx`, so the
/// login screen keeps redrawing while the request is out.
pub fn spawn_login(
    client: Client,
    config: AppConfig,
    credentials: Credentials,
    tx: UnboundedSender<LoginResult>,
) {
    tokio::spawn(async move {
        let result = verify_customer(&client, &config, &credentials).await;
        if let Err(err) = &result {
            log::warn!("login attempt failed: {err}");
        }
        let _ = tx.send(result);
    });
}

/// The backend has no tagged result contract; any of three fields may carry
/// the success signal and all of them must keep working.
pub fn login_succeeded(body: &Value) -> bool {
    field_equals(body, "status", "success")
        || field_equals(body, "result", "success")
        || field_equals(body, "message", LOGIN_SUCCESS_MESSAGE)
}

fn field_equals(body: &Value, key: &str, expected: &str) -> bool {
    body.get(key).and_then(Value::as_str) == Some(expected)
}

fn failure_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_short_mobile_before_any_network_call() {
        let err = validate_credentials("98765", "secret").expect_err("should fail");
        assert!(matches!(err, FetchError::Validation(_)));
        assert!(err.to_string().contains("Mobile number"));
    }

    #[test]
    fn mobile_length_counts_characters_not_bytes() {
        // Five Arabic-Indic digits occupy ten bytes; still too short.
        let err = validate_credentials("٩٨٧٦٥", "secret").expect_err("should fail");
        assert!(matches!(err, FetchError::Validation(_)));
        assert!(err.to_string().contains("Mobile number"));

        let ten_digits = "٩٨٧٦٥٤٣٢١٠";
        validate_credentials(ten_digits, "secret").expect("ten characters is long enough");
    }

    #[test]
    fn trims_mobile_before_length_check() {
        let err = validate_credentials("  987654321  ", "secret").expect_err("should fail");
        assert!(matches!(err, FetchError::Validation(_)));

        let credentials =
            validate_credentials("  9876543210  ", "secret").expect("padded number is long enough");
        assert_eq!(credentials.mobile_number, "9876543210");
    }

    #[test]
    fn rejects_empty_mobile_with_mobile_message() {
        let err = validate_credentials("   ", "secret").expect_err("should fail");
        assert_eq!(err.to_string(), "Please enter your mobile number.");
    }

    #[test]
    fn rejects_empty_password_with_password_message() {
        let err = validate_credentials("9876543210", "").expect_err("should fail");
        assert_eq!(err.to_string(), "Please enter your password.");
    }

    #[test]
    fn any_of_three_legacy_fields_signals_success() {
        assert!(login_succeeded(&json!({ "status": "success" })));
        assert!(login_succeeded(&json!({ "result": "success" })));
        assert!(login_succeeded(&json!({ "message": "Login successful" })));
    }

    #[test]
    fn other_shapes_are_not_success() {
        assert!(!login_succeeded(&json!({ "status": "ok" })));
        assert!(!login_succeeded(&json!({ "message": "Invalid password" })));
        assert!(!login_succeeded(&json!({})));
        assert!(!login_succeeded(&json!({ "status": 1 })));
    }

    #[test]
    fn failure_surfaces_server_message_when_present() {
        assert_eq!(
            failure_message(&json!({ "message": "Invalid password" })),
            "Invalid password"
        );
    }

    #[test]
    fn failure_falls_back_to_generic_message() {
        assert_eq!(failure_message(&json!({})), GENERIC_LOGIN_FAILURE);
        assert_eq!(
            failure_message(&json!({ "message": "   " })),
            GENERIC_LOGIN_FAILURE
        );
    }
}
