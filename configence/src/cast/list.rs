//! Delimited list cast.

use crate::value::Value;

use super::Cast;

/// Default delimiter set.
pub const DEFAULT_DELIMITER: &str = ",";

/// Default set of characters stripped from each element.
pub const DEFAULT_STRIP: &str = " \t\n\r\x0b\x0c";

/// Splitting rules for list entries.
///
/// - Any character of `delimiter` separates elements.
/// - Runs of delimiters do not produce empty elements.
/// - Single or double quotes group text, so `'a,b',c` is two elements.
///   A quoted empty string (`''`) is an empty element.
/// - Each element is trimmed of the characters in `strip`, then passed
///   through the element cast.
///
/// # Examples
///
/// ```
/// use configence::cast::ListCast;
/// use configence::{Cast, Value};
///
/// let cast = Cast::list(ListCast::new().delimiter(";"));
/// let value = cast.apply("EVENTS", &Value::from("a; b ;c")).unwrap();
/// assert_eq!(value, Value::from(vec!["a", "b", "c"]));
///
/// let ints = Cast::list(ListCast::new().item(Cast::integer()));
/// let value = ints.apply("PORTS", &Value::from("8000, 8001")).unwrap();
/// assert_eq!(value, Value::from(vec![8000, 8001]));
/// ```
#[derive(Debug, Clone)]
pub struct ListCast {
    delimiter: String,
    strip: String,
    item: Box<Cast>,
}

impl ListCast {
    /// Comma-delimited, whitespace-stripped list of strings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            strip: DEFAULT_STRIP.to_string(),
            item: Box::new(Cast::string()),
        }
    }

    /// Set the delimiter character set.
    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the characters stripped from both ends of each element.
    #[must_use]
    pub fn strip(mut self, strip: impl Into<String>) -> Self {
        self.strip = strip.into();
        self
    }

    /// Set the cast applied to every element.
    #[must_use]
    pub fn item(mut self, item: Cast) -> Self {
        self.item = Box::new(item);
        self
    }

    pub(super) fn cast(&self, value: &Value) -> Result<Value, String> {
        let elements: Vec<Value> = match value {
            Value::Str(raw) => self
                .split(raw)?
                .into_iter()
                .map(|token| {
                    let trimmed = token.trim_matches(|c| self.strip.contains(c));
                    Value::from(trimmed)
                })
                .collect(),
            Value::List(items) => items.clone(),
            other => return Err(format!("{other} - is not a valid list")),
        };

        elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                self.item
                    .apply(&format!("[{i}]"), element)
                    .map_err(|e| e.to_string())
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    /// Split `raw` into tokens, honouring quotes.
    fn split(&self, raw: &str) -> Result<Vec<String>, String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut in_token = false;
        let mut quote: Option<char> = None;

        for ch in raw.chars() {
            match quote {
                Some(q) if ch == q => quote = None,
                Some(_) => current.push(ch),
                None if ch == '\'' || ch == '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                None if self.delimiter.contains(ch) => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                None => {
                    current.push(ch);
                    in_token = true;
                }
            }
        }

        if let Some(q) = quote {
            return Err(format!("no closing quotation ({q}) in '{raw}'"));
        }
        if in_token {
            tokens.push(current);
        }
        Ok(tokens)
    }
}

impl Default for ListCast {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(value: &Value) -> Vec<String> {
        value.deserialize_into("test").unwrap()
    }

    #[test]
    fn test_basic_split() {
        let cast = Cast::list(ListCast::new());
        let value = cast
            .apply("EVENTS", &Value::from("event3,event4,event5"))
            .unwrap();
        assert_eq!(strings(&value), vec!["event3", "event4", "event5"]);
    }

    #[test]
    fn test_empty_string_is_empty_list() {
        let cast = Cast::list(ListCast::new());
        assert_eq!(cast.apply("EVENTS", &Value::from("")).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn test_single_item() {
        let cast = Cast::list(ListCast::new());
        let value = cast.apply("ITEMS", &Value::from("item1")).unwrap();
        assert_eq!(strings(&value), vec!["item1"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let cast = Cast::list(ListCast::new().delimiter(";"));
        let value = cast.apply("ITEMS", &Value::from("a;b;c")).unwrap();
        assert_eq!(strings(&value), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delimiter_is_a_character_set() {
        let cast = Cast::list(ListCast::new().delimiter(",;"));
        let value = cast.apply("ITEMS", &Value::from("a,b;c")).unwrap();
        assert_eq!(strings(&value), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let cast = Cast::list(ListCast::new());
        let value = cast.apply("ITEMS", &Value::from("  a ,\tb\n, c")).unwrap();
        assert_eq!(strings(&value), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_custom_strip() {
        let cast = Cast::list(ListCast::new().strip("[]"));
        let value = cast.apply("ITEMS", &Value::from("[a],[b]")).unwrap();
        assert_eq!(strings(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_repeated_delimiters_do_not_create_empty_elements() {
        let cast = Cast::list(ListCast::new());
        let value = cast.apply("ITEMS", &Value::from("a,,b,")).unwrap();
        assert_eq!(strings(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_quotes_group_delimiters() {
        let cast = Cast::list(ListCast::new());
        let value = cast
            .apply("ITEMS", &Value::from(r#"'a,b',"c, d",e"#))
            .unwrap();
        assert_eq!(strings(&value), vec!["a,b", "c, d", "e"]);
    }

    #[test]
    fn test_quoted_empty_element() {
        let cast = Cast::list(ListCast::new());
        let value = cast.apply("ITEMS", &Value::from("a,'',b")).unwrap();
        assert_eq!(strings(&value), vec!["a", "", "b"]);
    }

    #[test]
    fn test_unclosed_quote_is_an_error() {
        let cast = Cast::list(ListCast::new());
        let err = cast.apply("ITEMS", &Value::from("a,'b")).unwrap_err();
        assert!(err.to_string().contains("no closing quotation"));
    }

    #[test]
    fn test_item_cast() {
        let cast = Cast::list(ListCast::new().item(Cast::integer()));
        let value = cast.apply("PORTS", &Value::from("1, 3, 43")).unwrap();
        assert_eq!(value, Value::from(vec![1, 3, 43]));

        let err = cast.apply("PORTS", &Value::from("1,x")).unwrap_err();
        assert!(err.to_string().contains("[1]"));
    }

    #[test]
    fn test_list_input_passes_through_item_cast() {
        let cast = Cast::list(ListCast::new().item(Cast::integer()));
        let value = cast
            .apply("PORTS", &Value::from(vec!["5", "6"]))
            .unwrap();
        assert_eq!(value, Value::from(vec![5, 6]));
    }

    #[test]
    fn test_non_list_input_rejected() {
        let cast = Cast::list(ListCast::new());
        assert!(cast.apply("ITEMS", &Value::Int(3)).is_err());
    }
}
