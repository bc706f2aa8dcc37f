use serde_json::{Map, Value};

/// Keys clients have been seen using for the login id.
pub const LOGIN_ID_KEYS: &[&str] = &["email", "id", "userId", "username", "login", "user", "loginId"];
pub const PASSWORD_KEYS: &[&str] = &["password", "pwd", "pass"];
pub const SIGNUP_EMAIL_KEYS: &[&str] = &["email", "id", "username"];
pub const NICKNAME_KEYS: &[&str] = &["nickname", "name", "nick", "displayName"];

/// Common wrapper keys frontends put around the actual payload.
const WRAPPER_KEYS: &[&str] = &["data", "payload", "formData", "body"];

/// Merges a request's JSON or urlencoded-form body with its query string
/// into one flat map; query parameters overwrite body keys. A JSON body
/// wrapped one level (`{"data": {...}}` and friends) is unwrapped as well.
/// Malformed bodies are treated as absent, not as errors.
pub fn merge_sources(
    content_type: Option<&str>,
    body: &[u8],
    query: Option<&str>,
) -> Map<String, Value> {
    let mut merged = Map::new();
    let content_type = content_type.unwrap_or("");

    if content_type.contains("application/json") {
        if let Ok(Value::Object(object)) = serde_json::from_slice::<Value>(body) {
            for (key, value) in &object {
                merged.insert(key.clone(), value.clone());
            }
            if object.len() == 1 {
                if let Some(Value::Object(inner)) = object.values().next() {
                    for (key, value) in inner {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
            for wrapper in WRAPPER_KEYS {
                if let Some(Value::Object(inner)) = object.get(*wrapper) {
                    for (key, value) in inner {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
        }
    } else if content_type.contains("application/x-www-form-urlencoded") {
        for (key, value) in url::form_urlencoded::parse(body) {
            merged.insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }

    if let Some(query) = query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            merged.insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }

    merged
}

/// First non-empty value among `keys`, trimmed. Non-string scalars are
/// stringified; anything else counts as absent.
pub fn pick_first(merged: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        let text = match merged.get(*key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}
