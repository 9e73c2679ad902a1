use serde_json::Value;

/// Locate the audio URL inside a generation response payload
///
/// The space's output shape is not contractually fixed: it has been
/// observed both as `[audioObject, statusMessage]` and as a bare object.
/// Fixed precedence, first match wins:
///
/// 1. a sequence whose first element is an object with a string `url`;
/// 2. a sequence whose first element is itself a string;
/// 3. a bare object with a string `url`;
/// 4. anything else resolves to `None`, never an error.
pub fn extract_audio_url(envelope: &Value) -> Option<String> {
    match envelope {
        Value::Array(items) => match items.first() {
            Some(Value::Object(audio)) => url_field(audio),
            Some(Value::String(url)) => Some(url.clone()),
            _ => None,
        },
        Value::Object(audio) => url_field(audio),
        _ => None,
    }
}

fn url_field(object: &serde_json::Map<String, Value>) -> Option<String> {
    object.get("url").and_then(Value::as_str).map(str::to_owned)
}
