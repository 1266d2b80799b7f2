//! Pure text and vector helpers shared by the collaborators

use serde_json::Value;

/// Fields, in priority order, that carry the answer in common response shapes
const TEXT_FIELDS: &[&str] = &["output", "output_text", "text", "content", "response", "answer", "result"];

/// Coerce any JSON value a service hands back into text
///
/// Strings pass through, objects yield their first text-bearing field, arrays
/// are joined line by line, null becomes empty and anything else is rendered
/// as JSON.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => TEXT_FIELDS
            .iter()
            .find_map(|field| map.get(*field).filter(|v| !v.is_null()))
            .map(coerce_text)
            .unwrap_or_else(|| value.to_string()),
        Value::Array(items) => items
            .iter()
            .map(coerce_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

/// Cosine similarity in [-1, 1]; mismatched or zero vectors score 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// First `max_chars` characters of `text`, on a char boundary
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
