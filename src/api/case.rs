//! Key case conversion at the API boundary.
//!
//! The search API speaks snake_case while the rest of the crate uses camelCase
//! field names. Bodies are converted recursively, through nested objects and
//! arrays, in both directions. Values are never touched, only object keys.

use serde_json::{Map, Value};

/// Splits an identifier into lowercase words.
///
/// Boundaries are non-alphanumeric characters, lower-to-upper transitions,
/// the end of an acronym (`HTMLParser` → `html`, `parser`), and transitions
/// between letters and digits.
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_ascii_digit())
                || (prev.is_ascii_digit() && c.is_alphabetic())
                || (prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts an identifier to camelCase.
///
/// # Examples
///
/// ```
/// use tunegrid::api::case::to_camel_case;
///
/// assert_eq!(to_camel_case("track_id"), "trackId");
/// assert_eq!(to_camel_case("artwork_url_100"), "artworkUrl100");
/// assert_eq!(to_camel_case("trackName"), "trackName");
/// ```
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in split_words(input).iter().enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Converts an identifier to snake_case.
///
/// # Examples
///
/// ```
/// use tunegrid::api::case::to_snake_case;
///
/// assert_eq!(to_snake_case("trackId"), "track_id");
/// assert_eq!(to_snake_case("artworkUrl100"), "artwork_url_100");
/// ```
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    split_words(input).join("_")
}

/// Renames every object key in `value`, recursing into objects and arrays.
#[must_use]
pub fn map_keys_deep<F>(value: Value, rename: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match value {
        Value::Object(map) => {
            let renamed: Map<String, Value> = map
                .into_iter()
                .map(|(key, inner)| (rename(&key), map_keys_deep(inner, rename)))
                .collect();
            Value::Object(renamed)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|inner| map_keys_deep(inner, rename))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Converts a wire body (snake_case keys) to the internal convention.
#[must_use]
pub fn camelize_keys(value: Value) -> Value {
    map_keys_deep(value, &to_camel_case)
}

/// Converts an internal body (camelCase keys) to the wire convention.
#[must_use]
pub fn snakify_keys(value: Value) -> Value {
    map_keys_deep(value, &to_snake_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_acronyms_and_digits() {
        assert_eq!(split_words("HTMLParser"), vec!["html", "parser"]);
        assert_eq!(split_words("artworkUrl60"), vec!["artwork", "url", "60"]);
        assert_eq!(split_words("--result count--"), vec!["result", "count"]);
    }

    #[test]
    fn conversions_are_stable_on_already_converted_keys() {
        assert_eq!(to_camel_case("primaryGenreName"), "primaryGenreName");
        assert_eq!(to_snake_case("primary_genre_name"), "primary_genre_name");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn map_keys_deep_recurses_through_arrays_and_objects() {
        let wire = json!({
            "result_count": 1,
            "results": [
                { "track_id": 7, "track_name": "keep_values_as_is", "nested_obj": { "inner_key": [ { "deep_key": true } ] } }
            ]
        });

        let internal = camelize_keys(wire);
        assert_eq!(
            internal,
            json!({
                "resultCount": 1,
                "results": [
                    { "trackId": 7, "trackName": "keep_values_as_is", "nestedObj": { "innerKey": [ { "deepKey": true } ] } }
                ]
            })
        );

        let back = snakify_keys(internal);
        assert_eq!(back["results"][0]["nested_obj"]["inner_key"][0]["deep_key"], json!(true));
        assert_eq!(back["result_count"], json!(1));
    }
}
