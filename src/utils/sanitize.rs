use serde_json::Value;

use crate::domain::payment::last_four;

/// Redacts card data and credentials in JSON payloads for logging
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sanitized = serde_json::Map::new();
            for (key, val) in map {
                let sanitized_val = match key.to_lowercase().as_str() {
                    "card_number" | "pan" => mask_card_number(val),
                    k if is_secret_field(k) => Value::String("****".to_string()),
                    _ => sanitize_json(val),
                };
                sanitized.insert(key.clone(), sanitized_val);
            }
            Value::Object(sanitized)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sanitize_json).collect()),
        _ => value.clone(),
    }
}

fn is_secret_field(key: &str) -> bool {
    matches!(
        key,
        "cvv" | "password" | "secret" | "token" | "api_key" | "authorization" | "authorization_code"
    )
}

fn mask_card_number(value: &Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > 4 => {
            Value::String(format!("****{}", last_four(s)))
        }
        _ => Value::String("****".to_string()),
    }
}
