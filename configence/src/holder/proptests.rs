//! Property-based tests for loading.

use crate::delayed::Delayed;
use crate::schema::Schema;
use crate::source::MapSource;
use crate::value::Value;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,10}"
}

// Text without braces, so it never forms a placeholder
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:-]{0,20}"
}

fn schema(name: &str, default: &str) -> Schema {
    let mut schema = Schema::new("Props");
    schema.str(name).default(default);
    schema.delay("ECHO", Delayed::template(format!("<{{{name}}}>")));
    schema
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Without a source value the default wins
    #[test]
    fn default_used_without_source(name in name_strategy(), default in text_strategy()) {
        prop_assume!(name != "ECHO");
        let config = schema(&name, &default).load(&MapSource::new()).unwrap();
        prop_assert_eq!(config.value(&name), Some(&Value::from(default.as_str())));
        prop_assert_eq!(config.get::<String>("ECHO").unwrap(), format!("<{default}>"));
    }

    // A source value replaces the default entirely
    #[test]
    fn source_overrides_default(
        name in name_strategy(),
        default in text_strategy(),
        raw in text_strategy(),
    ) {
        prop_assume!(name != "ECHO");
        let source = MapSource::from_pairs([(name.clone(), raw.clone())]);
        let config = schema(&name, &default).load(&source).unwrap();
        prop_assert_eq!(config.value(&name), Some(&Value::from(raw.as_str())));
        prop_assert_eq!(config.get::<String>("ECHO").unwrap(), format!("<{raw}>"));
    }

    // Loading twice from the same source gives equal configs
    #[test]
    fn loading_is_idempotent(name in name_strategy(), default in text_strategy(), raw in text_strategy()) {
        prop_assume!(name != "ECHO");
        let source = MapSource::from_pairs([(name.clone(), raw)]);
        let schema = schema(&name, &default);
        let first = schema.load(&source).unwrap();
        let second = schema.load(&source).unwrap();
        prop_assert_eq!(first.values(), second.values());
        prop_assert_eq!(first.debug_repr(), second.debug_repr());
    }

    // With a prefix only the prefixed key is consulted
    #[test]
    fn prefix_hides_unprefixed_keys(name in name_strategy(), raw in text_strategy()) {
        prop_assume!(name != "ECHO");
        let unprefixed = MapSource::from_pairs([(name.clone(), raw.clone())]);
        let config = schema(&name, "default").load_with_prefix(&unprefixed, "NEW_").unwrap();
        prop_assert_eq!(config.value(&name), Some(&Value::from("default")));

        let prefixed = MapSource::from_pairs([(format!("NEW_{name}"), raw.clone())]);
        let config = schema(&name, "default").load_with_prefix(&prefixed, "NEW_").unwrap();
        prop_assert_eq!(config.value(&name), Some(&Value::from(raw.as_str())));
    }

    // Placeholders for undeclared names stay literal
    #[test]
    fn unknown_placeholder_stays_literal(name in name_strategy()) {
        let mut schema = Schema::new("Props");
        schema.delay("GHOST", Delayed::template(format!("{{{name}}}")));
        let config = schema.load(&MapSource::new()).unwrap();
        prop_assert_eq!(config.get::<String>("GHOST").unwrap(), format!("{{{name}}}"));
    }
}
