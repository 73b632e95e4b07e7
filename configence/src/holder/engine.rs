//! The two-pass load.
//!
//! Pass one walks the schema in declaration order. Top-level delayed
//! values are evaluated where they stand and wrapped in a synthetic
//! entry; every entry is then resolved. Entries whose delayed default was
//! not overridden stay pending. Pass two evaluates those pending defaults,
//! again in declaration order, then the load hook runs.

use crate::cast::Cast;
use crate::delayed::Delayed;
use crate::entry::{Entry, EntryDefault};
use crate::error::Result;
use crate::resolver::{apply_default, Resolver};
use crate::schema::{Member, Schema};
use crate::source::ValueSource;
use crate::value::{Value, ValueType};

use super::{Config, Phase};

/// Build a loaded [`Config`] from `schema`.
pub(crate) fn load(
    schema: &Schema,
    source: &dyn ValueSource,
    prefix: Option<&str>,
) -> Result<Config> {
    schema.check()?;

    let prefix = prefix.filter(|p| !p.is_empty());
    let mut resolver = Resolver::new(source);
    if let Some(prefix) = prefix {
        resolver = resolver.with_prefix(prefix);
    }

    let mut config = Config::declaring(schema.name(), prefix);
    log::debug!(
        "Loading {} ({} members) from {}",
        schema.name(),
        schema.len(),
        source.describe()
    );

    let mut pending = Vec::new();
    for member in schema.members() {
        let entry = match member {
            Member::Entry(entry) => entry.clone(),
            Member::Delayed {
                name,
                index,
                delayed,
            } => {
                config.delayed_count += 1;
                let value = evaluate(&config, name, delayed)?;
                synthetic_entry(name, *index, value)
            }
        };

        if entry.default().is_delayed() {
            config.delayed_default_count += 1;
            pending.push(config.entries.len());
        }

        let value = resolver.resolve_entry(&entry)?;
        config.register(entry, value);
    }

    config.phase = Phase::Evaluating;
    log::debug!("{}: evaluating {} delayed defaults", schema.name(), pending.len());

    for position in pending {
        let entry = &config.entries[position];
        if entry.is_resolved() {
            log::debug!("{} overridden by source, skipping delayed default", entry.name());
            continue;
        }
        let EntryDefault::Delayed(delayed) = entry.default() else {
            continue;
        };

        let evaluated = evaluate(&config, entry.name(), delayed)?;
        let field = resolver.effective_key(entry.key());
        let cast = apply_default(&field, &evaluated, entry.cast(), entry.cast_from_json());
        let value = match cast {
            Ok(value) => value,
            Err(err) if has_unresolved_placeholders(&config, delayed) => {
                log::warn!("{}: unresolved template kept as text ({err})", entry.name());
                evaluated
            }
            Err(err) => {
                log::error!("{err}");
                return Err(err);
            }
        };
        let name = entry.name().to_string();
        config.assign(&name, value);
    }

    if let Some(hook) = schema.load_hook() {
        hook(&mut config)?;
    }

    config.phase = Phase::Loaded;
    log::debug!("{} loaded", schema.name());
    Ok(config)
}

/// Evaluate a delayed value against the attributes resolved so far.
fn evaluate(config: &Config, name: &str, delayed: &Delayed) -> Result<Value> {
    delayed
        .evaluate(|reference| config.value(reference).cloned())
        .map_err(|err| {
            log::error!("Failed to evaluate delayed value {name}: {err}");
            err
        })
}

/// True if `delayed` is a template that still names an unresolved attribute.
/// Such text is kept even when the entry cast rejects it.
fn has_unresolved_placeholders(config: &Config, delayed: &Delayed) -> bool {
    matches!(delayed, Delayed::Template(_))
        && delayed
            .references()
            .iter()
            .any(|reference| !config.contains(reference))
}

/// Wrap an evaluated top-level delayed value so it can be resolved (and
/// overridden) like any other entry.
fn synthetic_entry(name: &str, index: usize, value: Value) -> Entry {
    let value_type = ValueType::of(&value);
    let mut entry = Entry::new(name, Cast::string())
        .with_default(value)
        .with_value_type(value_type);
    entry.index = index;
    entry
}
