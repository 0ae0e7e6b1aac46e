use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// A character reference starting at `&`: named, decimal or hex.
    static ref CHAR_REF_RE: Regex =
        Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});").unwrap();
}

/// Replace the five HTML-special characters with entities.
///
/// An `&` that already opens a character reference is kept as-is, so
/// `escape_html(&escape_html(s)) == escape_html(s)`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (idx, ch) in input.char_indices() {
        match ch {
            '&' if CHAR_REF_RE.is_match(&input[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape every string leaf of a JSON value. Keys are left untouched.
pub fn escape_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(escape_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, escape_value(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn script_payload_is_neutralized() {
        let escaped = escape_html(r#"<script>alert("XSSed!")</script>"#);
        assert_eq!(escaped, "&lt;script&gt;alert(&quot;XSSed!&quot;)&lt;/script&gt;");
        for raw in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(raw), "raw {raw:?} left in {escaped}");
        }
    }

    #[test]
    fn escaping_is_idempotent() {
        let inputs = [
            "plain",
            "a & b",
            "<b>\"quoted\"</b>",
            "it's &copy; 2024 &#169; &#xA9;",
            "&&;&#;&#x;& lt;",
        ];
        for input in inputs {
            let once = escape_html(input);
            assert_eq!(escape_html(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn typed_entity_text_is_returned_unchanged() {
        assert_eq!(escape_html("&lt;"), "&lt;");
        assert_eq!(escape_html("a &lt;b&gt; &#039;c&#039;"), "a &lt;b&gt; &#039;c&#039;");
        assert_eq!(escape_html("&lt"), "&amp;lt");
    }

    #[test]
    fn bare_ampersands_are_encoded() {
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("&;"), "&amp;;");
        assert_eq!(escape_html("fish & chips"), "fish &amp; chips");
        assert_eq!(escape_html("&#x;"), "&amp;#x;");
        assert_eq!(escape_html("&amp;"), "&amp;");
    }

    #[test]
    fn every_ampersand_left_starts_an_entity() {
        let escaped = escape_html("a&b & <c> &lt; \"d\" 'e' &#39;");
        for (idx, _) in escaped.match_indices('&') {
            assert!(CHAR_REF_RE.is_match(&escaped[idx..]), "stray & in {escaped}");
        }
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(escape_html("測試產品 A"), "測試產品 A");
        assert_eq!(escape_html("含有 <b> 的描述"), "含有 &lt;b&gt; 的描述");
    }

    #[test]
    fn escape_value_walks_nested_structures() {
        let value = json!({
            "z": "<z>",
            "a": [1, "<i>", {"deep": "'"}, null, true],
            "n": 2.5,
        });
        let escaped = escape_value(value);
        assert_eq!(
            escaped,
            json!({
                "z": "&lt;z&gt;",
                "a": [1, "&lt;i&gt;", {"deep": "&#039;"}, null, true],
                "n": 2.5,
            })
        );
        let keys: Vec<_> = escaped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "n"]);
    }

    #[test]
    fn object_keys_are_not_escaped() {
        let escaped = escape_value(json!({"<k>": "v"}));
        assert!(escaped.get("<k>").is_some());
    }
}
