// Helper functions for safe logging

use serde_json::Value;

/// JSON fields that carry credentials and must never be logged verbatim
const CREDENTIAL_FIELDS: &[&str] = &["idToken", "accessToken", "token"];

/// Masks email addresses for safe logging
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***.***".to_string(),
    }
}

/// Masks tokens for safe logging. Shows only the first and last 4 characters.
pub fn safe_token_log(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

/// Replaces credential fields of a JSON document with their masked form
pub fn redact_credentials(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if CREDENTIAL_FIELDS.contains(&key.as_str()) {
                    if let Value::String(raw) = field {
                        *field = Value::String(safe_token_log(raw));
                    }
                } else {
                    redact_credentials(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_credentials),
        _ => {}
    }
}
