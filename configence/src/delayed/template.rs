//! Placeholder scanner for delayed string templates.
//!
//! Grammar:
//!
//! - `{identifier}` where identifier is `[A-Za-z_][A-Za-z0-9_]*` is a
//!   placeholder. It is replaced with the display form of the named
//!   attribute, or left verbatim if the attribute is not resolved.
//! - `{{` and `}}` produce literal `{` and `}`.
//! - Any other brace is copied through unchanged.

use crate::value::Value;

/// Returns true if `name` is a valid placeholder identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// A piece of a scanned template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Split a template into literal text and placeholders.
fn scan(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(|c| c == '{' || c == '}') {
        if pos > 0 {
            tokens.push(Token::Text(&rest[..pos]));
        }
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            tokens.push(Token::Text("{"));
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            tokens.push(Token::Text("}"));
            rest = &tail[2..];
            continue;
        }
        if let Some(end) = tail[1..].find('}').filter(|_| tail.starts_with('{')) {
            let name = &tail[1..=end];
            if is_identifier(name) {
                tokens.push(Token::Placeholder(name));
                rest = &tail[end + 2..];
                continue;
            }
        }

        // Lone brace: both '{' and '}' are one byte.
        tokens.push(Token::Text(&tail[..1]));
        rest = &tail[1..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}

/// Substitute placeholders using `lookup`.
///
/// # Examples
///
/// ```
/// use configence::delayed::render;
/// use configence::Value;
///
/// let lookup = |name: &str| match name {
///     "MY_HERO" => Some(Value::from("Son Goku")),
///     "POWER_LEVEL" => Some(Value::from(9001)),
///     _ => None,
/// };
/// assert_eq!(
///     render("{MY_HERO} is over {POWER_LEVEL}", lookup),
///     "Son Goku is over 9001"
/// );
/// assert_eq!(render("{NONEXISTENT_VALUE}", lookup), "{NONEXISTENT_VALUE}");
/// assert_eq!(render("{{MY_HERO}}", lookup), "{MY_HERO}");
/// ```
pub fn render<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Value>,
{
    let mut out = String::with_capacity(template.len());
    for token in scan(template) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Placeholder(name) => match lookup(name) {
                Some(value) => out.push_str(&value.to_string()),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }
    out
}

/// Names referenced by placeholders, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    scan(template)
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(name) => Some(name),
            Token::Text(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heroes(name: &str) -> Option<Value> {
        match name {
            "MY_HERO" => Some(Value::from("Son Goku")),
            "POWER_LEVEL" => Some(Value::from(9001)),
            "EVENTS" => Some(Value::from(vec!["event1", "event2"])),
            "IS_STRONG" => Some(Value::from(true)),
            _ => None,
        }
    }

    #[test]
    fn test_identifier() {
        assert!(is_identifier("MY_HERO"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("a1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("MY HERO"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn test_render_substitutes_resolved_names() {
        assert_eq!(
            render("{MY_HERO} is over {POWER_LEVEL}", heroes),
            "Son Goku is over 9001"
        );
    }

    #[test]
    fn test_render_leaves_unknown_names() {
        assert_eq!(render("{NONEXISTENT_VALUE}", heroes), "{NONEXISTENT_VALUE}");
        assert_eq!(
            render("{MY_HERO} meets {RIVAL}", heroes),
            "Son Goku meets {RIVAL}"
        );
    }

    #[test]
    fn test_render_escapes() {
        assert_eq!(render("{{literal}}", heroes), "{literal}");
        assert_eq!(render("{{{MY_HERO}}}", heroes), "{Son Goku}");
    }

    #[test]
    fn test_render_non_identifier_braces_verbatim() {
        assert_eq!(render("{ MY_HERO }", heroes), "{ MY_HERO }");
        assert_eq!(render("{}", heroes), "{}");
        assert_eq!(render("{0}", heroes), "{0}");
        assert_eq!(render("open { only", heroes), "open { only");
        assert_eq!(render("close } only", heroes), "close } only");
        assert_eq!(render("{MY_HERO", heroes), "{MY_HERO");
    }

    #[test]
    fn test_render_non_string_values() {
        assert_eq!(render("{IS_STRONG}", heroes), "true");
        assert_eq!(render("{EVENTS}", heroes), r#"["event1","event2"]"#);
    }

    #[test]
    fn test_render_plain_text() {
        assert_eq!(render("", heroes), "");
        assert_eq!(render("no placeholders", heroes), "no placeholders");
    }

    #[test]
    fn test_render_unicode_text() {
        assert_eq!(render("é {MY_HERO} ü", heroes), "é Son Goku ü");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("{MY_HERO} is over {POWER_LEVEL} {{not}} {MY_HERO}"),
            vec!["MY_HERO", "POWER_LEVEL", "MY_HERO"]
        );
        assert!(placeholders("{ spaced }").is_empty());
    }
}
