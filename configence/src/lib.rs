#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # configence
//!
//! Declarative, typed configuration entries resolved from environment-like
//! sources.
//!
//! A configuration is declared once as a [`Schema`]: named entries with a
//! cast, an optional default and an optional key override, plus delayed
//! values computed from entries declared earlier. Loading the schema
//! against a [`source::ValueSource`] produces a [`Config`] holding the
//! resolved, typed values.
//!
//! ## Core Types
//!
//! - [`Schema`] and [`Config`]: declaration and the loaded result
//! - [`Entry`] and [`EntryDefault`]: a single declared setting
//! - [`Cast`] and [`Value`]: conversion of raw strings into typed values
//! - [`Resolver`]: one-off lookups without a schema
//! - [`delayed::Delayed`]: templates and functions evaluated at load time
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use configence::source::MapSource;
//! use configence::{Resolver, Schema};
//!
//! let source = MapSource::from_pairs([("POWER_LEVEL", "9001")]);
//!
//! let mut schema = Schema::new("HeroConfig");
//! schema.str("MY_HERO").default("Son Goku");
//! schema.int("POWER_LEVEL");
//! let config = schema.load(&source).unwrap();
//! assert_eq!(config.get::<i64>("POWER_LEVEL").unwrap(), 9001);
//!
//! let resolver = Resolver::new(&source);
//! assert_eq!(resolver.int("POWER_LEVEL", None).unwrap(), 9001);
//! ```

pub mod cast;
pub mod delayed;
pub mod entry;
pub mod error;
pub mod holder;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod schema;
pub mod source;
pub mod value;

// Re-export key types at crate root for convenience
pub use cast::{Cast, CastKind, ListCast};
pub use delayed::{DelayArgs, Delayed, DelayedFn};
pub use entry::{CliOptionKwargs, Entry, EntryDefault};
pub use error::{Error, Result};
pub use holder::{Config, Phase};
pub use logging::{init_logger, LogLevel, Logger};
pub use resolver::Resolver;
pub use schema::file::SchemaFile;
pub use schema::Schema;
pub use value::{Value, ValueType};
