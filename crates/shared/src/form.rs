//! Helpers for payloads posted by HTML forms.

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating blank input as absent.
///
/// Forms send `""` for fields the user left empty. Use together with
/// `#[serde(default)]` so a missing field is also `None`:
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Form {
///     #[serde(default, deserialize_with = "druk_shared::form::blank_as_none")]
///     link: Option<String>,
/// }
///
/// let form: Form = serde_json::from_str(r#"{"link": "  "}"#).unwrap();
/// assert_eq!(form.link, None);
/// ```
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}
