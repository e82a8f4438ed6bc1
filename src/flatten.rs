//! Record flattening
//!
//! Expands nested objects into a single level with compound keys, so an
//! article's `{"headline": {"main": "..."}}` becomes `{"headline.main": "..."}`.
//! Arrays are leaves and are never traversed.

use crate::types::{FlatRecord, JsonValue, Record};

/// Default separator between path segments
pub const DEFAULT_SEPARATOR: &str = ".";

/// Flatten a record with no prefix and the default separator
pub fn flatten(record: Record) -> FlatRecord {
    flatten_with(record, "", DEFAULT_SEPARATOR)
}

/// Flatten a record, prefixing every key and joining segments with `separator`.
///
/// Traversal uses an explicit stack, so nesting depth is bounded only by
/// memory. Entries are visited depth-first in document order (maps keep
/// insertion order); if two paths produce the same key the one visited
/// last wins, keeping the position of the first. An empty nested object
/// produces no keys.
pub fn flatten_with(record: Record, prefix: &str, separator: &str) -> FlatRecord {
    let mut flat = FlatRecord::new();
    let mut stack = vec![(prefix.to_string(), record.into_iter())];

    loop {
        let Some((path, entries)) = stack.last_mut() else {
            break;
        };
        let Some((key, value)) = entries.next() else {
            stack.pop();
            continue;
        };

        let key_path = join_key(path, &key, separator);
        match value {
            JsonValue::Object(nested) => stack.push((key_path, nested.into_iter())),
            leaf => {
                flat.insert(key_path, leaf);
            }
        }
    }

    flat
}

fn join_key(prefix: &str, key: &str, separator: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{separator}{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: JsonValue) -> Record {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_flat_input_unchanged() {
        let record = object(json!({
            "web_url": "https://example.com/a",
            "word_count": 812,
            "print_page": null,
            "is_live": false
        }));

        assert_eq!(flatten(record.clone()), record);
    }

    #[test]
    fn test_nested_keys_are_joined() {
        let record = object(json!({"a": {"b": 1, "c": {"d": 2}}}));

        assert_eq!(flatten(record), object(json!({"a.b": 1, "a.c.d": 2})));
    }

    #[test]
    fn test_lists_are_not_traversed() {
        let record = object(json!({"a": [1, 2, {"x": 3}]}));

        assert_eq!(flatten(record.clone()), record);
    }

    #[test]
    fn test_article_shape() {
        let record = object(json!({
            "_id": "nyt://article/1",
            "headline": {"main": "Valley Startups", "kicker": null},
            "byline": {"original": "By A. Writer", "person": [{"firstname": "A"}]},
            "keywords": [{"name": "subject", "value": "Start-ups"}]
        }));

        let flat = flatten(record);

        assert_eq!(flat["headline.main"], "Valley Startups");
        assert_eq!(flat["headline.kicker"], JsonValue::Null);
        assert_eq!(flat["byline.original"], "By A. Writer");
        assert_eq!(flat["byline.person"], json!([{"firstname": "A"}]));
        assert_eq!(flat["keywords"], json!([{"name": "subject", "value": "Start-ups"}]));
        assert!(flat.values().all(|v| !v.is_object()));
    }

    #[test]
    fn test_prefix_and_separator() {
        let record = object(json!({"headline": {"main": "x"}, "uri": "u"}));

        let flat = flatten_with(record, "doc", "__");

        assert_eq!(flat, object(json!({"doc__headline__main": "x", "doc__uri": "u"})));
    }

    #[test]
    fn test_empty_nested_object_drops_key() {
        let record = object(json!({"multimedia": {}, "source": "The Times"}));

        assert_eq!(flatten(record), object(json!({"source": "The Times"})));
    }

    #[test]
    fn test_key_collision_last_visited_wins() {
        let nested_last = object(json!({"a.b": 1, "a": {"b": 2}}));
        assert_eq!(flatten(nested_last), object(json!({"a.b": 2})));

        let dotted_last = object(json!({"a": {"b": 2}, "a.b": 1}));
        assert_eq!(flatten(dotted_last), object(json!({"a.b": 1})));
    }

    #[test]
    fn test_keys_keep_document_order() {
        let record = object(json!({
            "web_url": "u",
            "headline": {"main": "m", "kicker": "k"},
            "abstract": "a"
        }));

        let keys: Vec<String> = flatten(record).into_iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["web_url", "headline.main", "headline.kicker", "abstract"]);
    }

    #[test]
    fn test_empty_record() {
        assert!(flatten(Record::new()).is_empty());
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        // Built by hand: json! and Drop both recurse over the tree
        let mut value = json!(1);
        for _ in 0..2_000 {
            let mut map = Record::new();
            map.insert("n".into(), value);
            value = JsonValue::Object(map);
        }

        let flat = flatten(object(value));

        assert_eq!(flat.len(), 1);
        let (key, leaf) = flat.into_iter().next().unwrap();
        assert_eq!(key.split('.').count(), 2_001);
        assert_eq!(leaf, json!(1));
    }
}
