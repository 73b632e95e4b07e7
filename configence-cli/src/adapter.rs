//! Command-line exposure of configuration entries.
//!
//! [`CliAdapter`] turns the entries of one or more loaded [`Config`]s into
//! clap options, then writes the values given on the command line back
//! through [`Config::set`]. Options that are not given leave the resolved
//! values alone.
//!
//! Each entry becomes one option. Its spellings are the entry flags when
//! there are any (`--long` or `-s`), otherwise the entry name lowercased
//! with `_` replaced by `-` (`MY_HERO` becomes `--my-hero`). Boolean
//! entries may be given without a value, which means `true`.

use std::collections::HashSet;
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use configence::{Config, Value, ValueType};

use crate::error::CliError;

/// An option value applied to a config.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOverride {
    /// Name of the config the entry belongs to.
    pub config: String,
    /// Entry name.
    pub entry: String,
    /// The cast value now held by the entry.
    pub value: Value,
}

/// Where an option's value goes.
#[derive(Debug, Clone)]
struct OptionTarget {
    id: String,
    config: usize,
    entry: String,
}

/// Builds a clap [`Command`] from config entries and applies parsed values.
///
/// # Examples
///
/// ```
/// use configence::source::MapSource;
/// use configence::Schema;
/// use configence_cli::CliAdapter;
///
/// let mut schema = Schema::new("HeroConfig");
/// schema.str("MY_HERO").default("Son Goku");
/// schema.int("POWER_LEVEL").default(9001);
/// let mut config = schema.load(&MapSource::new()).unwrap();
///
/// let adapter = CliAdapter::new("heroes", &[&config]).unwrap();
/// let matches = adapter
///     .parse_from(["heroes", "--power-level", "9500"])
///     .unwrap();
/// adapter.apply(&matches, &mut [&mut config]).unwrap();
///
/// assert_eq!(config.get::<i64>("POWER_LEVEL").unwrap(), 9500);
/// assert_eq!(config.get::<String>("MY_HERO").unwrap(), "Son Goku");
/// ```
#[derive(Debug, Clone)]
pub struct CliAdapter {
    command: Command,
    targets: Vec<OptionTarget>,
    config_names: Vec<String>,
}

impl CliAdapter {
    /// Build the command for `configs`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArguments`] if two entries share a name
    /// or an option spelling, or if a flag is malformed.
    pub fn new(name: impl Into<String>, configs: &[&Config]) -> Result<Self, CliError> {
        let mut command = Command::new(name.into())
            .disable_help_flag(true)
            .arg(
                Arg::new("help")
                    .long("help")
                    .help("Print help")
                    .action(ArgAction::Help),
            );

        let mut targets = Vec::new();
        let mut ids = HashSet::new();
        let mut spellings = Spellings::default();

        for (index, config) in configs.iter().enumerate() {
            for entry in config.entries() {
                let id = entry.name().to_string();
                if !ids.insert(id.clone()) {
                    return Err(CliError::InvalidArguments(format!(
                        "entry {id} is declared by more than one config"
                    )));
                }

                let kwargs = entry.cli_option_kwargs();
                let mut arg = Arg::new(id.clone())
                    .value_name(kwargs.value_type.to_string().to_uppercase())
                    .help_heading(config.name().to_string())
                    .action(ArgAction::Set);

                let flags = if kwargs.flags.is_empty() {
                    vec![format!("--{}", default_long(entry.name()))]
                } else {
                    kwargs.flags.clone()
                };
                arg = spellings.attach(arg, &id, &flags)?;

                let mut help = kwargs.help.clone();
                if let Some(default) = &kwargs.default {
                    if !help.is_empty() {
                        help.push(' ');
                    }
                    help.push_str(&format!("[default: {default}]"));
                }
                arg = arg.help(help);

                if kwargs.value_type == ValueType::Bool {
                    arg = arg.num_args(0..=1).default_missing_value("true");
                }

                command = command.arg(arg);
                targets.push(OptionTarget {
                    id,
                    config: index,
                    entry: entry.name().to_string(),
                });
            }
        }

        Ok(Self {
            command,
            targets,
            config_names: configs.iter().map(|c| c.name().to_string()).collect(),
        })
    }

    /// Set the text shown at the top of `--help`.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.command = self.command.about(about.into());
        self
    }

    /// The generated command.
    #[must_use]
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Number of generated options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if no entry produced an option.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Parse `args`; the first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::HelpRequested`] carrying the rendered help when
    /// `--help` is given, and [`CliError::InvalidArguments`] for anything
    /// clap rejects.
    pub fn parse_from<I, T>(&self, args: I) -> Result<ArgMatches, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.command
            .clone()
            .try_get_matches_from(args)
            .map_err(|err| match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    CliError::HelpRequested(err.render().to_string())
                }
                _ => CliError::InvalidArguments(err.render().to_string()),
            })
    }

    /// Apply the values given on the command line. `configs` must be the
    /// configs the adapter was built from, in the same order.
    ///
    /// Returns the overrides that were applied, in option order.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArguments`] if `configs` does not match,
    /// or a library validation error if a value does not cast.
    pub fn apply(
        &self,
        matches: &ArgMatches,
        configs: &mut [&mut Config],
    ) -> Result<Vec<AppliedOverride>, CliError> {
        let names: Vec<&str> = configs.iter().map(|c| c.name()).collect();
        if names != self.config_names {
            return Err(CliError::InvalidArguments(format!(
                "expected configs {:?}, got {names:?}",
                self.config_names
            )));
        }

        let mut applied = Vec::new();
        for target in &self.targets {
            if matches.value_source(&target.id) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(raw) = matches.get_one::<String>(&target.id) else {
                continue;
            };

            let config = &mut configs[target.config];
            let value = match config.entry(&target.entry) {
                Some(entry) => entry.cast().apply(&target.entry, &Value::from(raw.as_str()))?,
                None => continue,
            };
            log::info!("{}: {} set from command line", config.name(), target.entry);
            config.set(&target.entry, value.clone())?;
            applied.push(AppliedOverride {
                config: config.name().to_string(),
                entry: target.entry.clone(),
                value,
            });
        }
        Ok(applied)
    }
}

/// `MY_HERO` to `my-hero`.
fn default_long(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// Option spellings already taken.
#[derive(Default)]
struct Spellings {
    longs: HashSet<String>,
    shorts: HashSet<char>,
}

impl Spellings {
    fn attach(&mut self, mut arg: Arg, id: &str, flags: &[String]) -> Result<Arg, CliError> {
        self.longs.insert("help".to_string());
        let mut has_long = false;
        let mut has_short = false;

        for flag in flags {
            if let Some(long) = flag.strip_prefix("--") {
                if long.is_empty() || long.starts_with('-') {
                    return Err(malformed(id, flag));
                }
                if !self.longs.insert(long.to_string()) {
                    return Err(taken(id, flag));
                }
                arg = if has_long {
                    arg.visible_alias(long.to_string())
                } else {
                    arg.long(long.to_string())
                };
                has_long = true;
            } else if let Some(short) = flag.strip_prefix('-') {
                let mut chars = short.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(malformed(id, flag));
                };
                if !self.shorts.insert(c) {
                    return Err(taken(id, flag));
                }
                arg = if has_short {
                    arg.visible_short_alias(c)
                } else {
                    arg.short(c)
                };
                has_short = true;
            } else {
                return Err(malformed(id, flag));
            }
        }
        Ok(arg)
    }
}

fn malformed(id: &str, flag: &str) -> CliError {
    CliError::InvalidArguments(format!(
        "entry {id}: flag '{flag}' must look like --name or -c"
    ))
}

fn taken(id: &str, flag: &str) -> CliError {
    CliError::InvalidArguments(format!("entry {id}: flag '{flag}' is already in use"))
}
