//! Structured casts backed by serde: models, enumerations, raw JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::value::{Value, ValueType};

use super::{Cast, CastKind};

/// Last path segment of a Rust type name, for display.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn to_value<T: Serialize>(parsed: &T) -> Result<Value, String> {
    serde_json::to_value(parsed)
        .map(Value::from_json)
        .map_err(|e| e.to_string())
}

impl Cast {
    /// Validate a structured model through serde.
    ///
    /// A string is parsed as a JSON document first. If that fails, the
    /// string itself is offered to `T` as a plain value; if that fails too,
    /// the original JSON error is reported. Non-string input (a JSON object
    /// default) is validated directly.
    ///
    /// The stored value is the model's serialized form.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::{Cast, Value};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Deserialize, Serialize)]
    /// struct Character {
    ///     name: String,
    ///     power: i64,
    /// }
    ///
    /// let cast = Cast::model::<Character>();
    /// let value = cast
    ///     .apply("CHARACTER", &Value::from(r#"{"name": "Goku", "power": 9001}"#))
    ///     .unwrap();
    /// let character: Character = value.deserialize_into("CHARACTER").unwrap();
    /// assert_eq!(character.power, 9001);
    /// ```
    #[must_use]
    pub fn model<T>() -> Self
    where
        T: DeserializeOwned + Serialize + 'static,
    {
        Self::with_kind(
            CastKind::Model,
            ValueType::Model(short_type_name::<T>()),
            |value| {
                let parsed: T = match value {
                    Value::Str(raw) => match serde_json::from_str::<T>(raw) {
                        Ok(parsed) => parsed,
                        Err(json_err) => {
                            serde_json::from_value::<T>(serde_json::Value::String(raw.clone()))
                                .map_err(|_| format!("invalid JSON document: {json_err}"))?
                        }
                    },
                    other => serde_json::from_value::<T>(other.to_json())
                        .map_err(|e| format!("invalid object: {e}"))?,
                };
                to_value(&parsed)
            },
        )
    }

    /// Coerce a variant name into an enumeration through serde.
    ///
    /// The raw string is offered to `T` as a serialized variant, so serde
    /// attributes such as `rename_all` decide which spellings are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use configence::{Cast, Value};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Debug, PartialEq, Deserialize, Serialize)]
    /// #[serde(rename_all = "lowercase")]
    /// enum PowerLevel {
    ///     Low,
    ///     High,
    /// }
    ///
    /// let cast = Cast::enumeration::<PowerLevel>();
    /// assert_eq!(cast.apply("LEVEL", &Value::from("high")).unwrap(), Value::from("high"));
    /// assert!(cast.apply("LEVEL", &Value::from("HIGH")).is_err());
    /// ```
    #[must_use]
    pub fn enumeration<T>() -> Self
    where
        T: DeserializeOwned + Serialize + 'static,
    {
        Self::with_kind(
            CastKind::Enum,
            ValueType::Enum(short_type_name::<T>()),
            |value| {
                let parsed: T = serde_json::from_value(value.to_json()).map_err(|e| {
                    format!("{value} is not a valid {}: {e}", short_type_name::<T>())
                })?;
                to_value(&parsed)
            },
        )
    }

    /// Parse any JSON document. Non-string input passes through.
    #[must_use]
    pub fn json() -> Self {
        Self::with_kind(CastKind::Json, ValueType::Json, |value| match value {
            Value::Str(raw) => serde_json::from_str::<serde_json::Value>(raw)
                .map(Value::from_json)
                .map_err(|e| format!("invalid JSON document: {e}")),
            other => Ok(other.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct MyModel {
        entries: Vec<i64>,
        name: String,
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Person {
        name: String,
        age: i64,
        address: Address,
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    #[serde(rename_all = "lowercase")]
    enum PowerLevel {
        Low,
        Medium,
        High,
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Character {
        name: String,
        power_level: PowerLevel,
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Hostname(String);

    #[test]
    fn test_model_from_json_string() {
        let cast = Cast::model::<MyModel>();
        let value = cast
            .apply(
                "JSON",
                &Value::from(r#"{"entries": [2, 4, 6, 8], "name": "Vegeta"}"#),
            )
            .unwrap();
        let model: MyModel = value.deserialize_into("JSON").unwrap();
        assert_eq!(model.entries, vec![2, 4, 6, 8]);
        assert_eq!(model.name, "Vegeta");
    }

    #[test]
    fn test_model_from_object_default() {
        let cast = Cast::model::<MyModel>();
        let value = cast
            .apply(
                "JSON",
                &Value::from(json!({"entries": [1, 3, 43, 5, 7], "name": "Moses"})),
            )
            .unwrap();
        assert_eq!(
            value,
            Value::Json(json!({"entries": [1, 3, 43, 5, 7], "name": "Moses"}))
        );
    }

    #[test]
    fn test_model_nested() {
        let cast = Cast::model::<Person>();
        let value = cast
            .apply(
                "PERSON",
                &Value::from(json!({
                    "name": "Goku",
                    "age": 30,
                    "address": {"street": "Kame House", "city": "Kame Island"}
                })),
            )
            .unwrap();
        let person: Person = value.deserialize_into("PERSON").unwrap();
        assert_eq!(person.address.city, "Kame Island");
    }

    #[test]
    fn test_model_with_enum_field() {
        let cast = Cast::model::<Character>();
        let value = cast
            .apply(
                "CHARACTER",
                &Value::from(json!({"name": "Goku", "power_level": "high"})),
            )
            .unwrap();
        let character: Character = value.deserialize_into("CHARACTER").unwrap();
        assert_eq!(character.power_level, PowerLevel::High);
    }

    #[test]
    fn test_model_malformed_json_reports_json_error() {
        let cast = Cast::model::<MyModel>();
        let err = cast
            .apply("MALFORMED_JSON", &Value::from("{invalid json}"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("invalid JSON document"));
    }

    #[test]
    fn test_model_missing_fields() {
        let cast = Cast::model::<MyModel>();
        let err = cast
            .apply("JSON", &Value::from(r#"{"invalid": "data"}"#))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_model_plain_string_fallback() {
        let cast = Cast::model::<Hostname>();
        let value = cast.apply("HOST", &Value::from("localhost")).unwrap();
        assert_eq!(value, Value::from("localhost"));
    }

    #[test]
    fn test_model_value_type_name() {
        assert_eq!(
            Cast::model::<MyModel>().value_type(),
            ValueType::Model("MyModel")
        );
        assert!(Cast::model::<MyModel>().is_structured());
    }

    #[test]
    fn test_enumeration() {
        let cast = Cast::enumeration::<PowerLevel>();
        assert_eq!(
            cast.apply("LEVEL", &Value::from("medium")).unwrap(),
            Value::from("medium")
        );
        let err = cast.apply("LEVEL", &Value::from("ultra")).unwrap_err();
        assert!(err.to_string().contains("PowerLevel"));
        assert_eq!(cast.value_type(), ValueType::Enum("PowerLevel"));
    }

    #[test]
    fn test_json_cast() {
        let cast = Cast::json();
        assert_eq!(
            cast.apply("DOC", &Value::from("[1, 2]")).unwrap(),
            Value::from(vec![1, 2])
        );
        assert_eq!(
            cast.apply("DOC", &Value::from(r#"{"a": 1}"#)).unwrap(),
            Value::Json(json!({"a": 1}))
        );
        assert!(cast.apply("DOC", &Value::from("{nope")).is_err());
        assert_eq!(
            cast.apply("DOC", &Value::Json(json!({"a": 1}))).unwrap(),
            Value::Json(json!({"a": 1}))
        );
    }
}
