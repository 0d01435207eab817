use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use lineconf::{Config, ListError, Setting};

#[derive(Parser)]
#[command(name = "lineconf")]
#[command(about = "Inspect line-oriented key = value configuration files")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Show everything parsed from a file
    lineconf dump app.conf

    # Same, as JSON
    lineconf dump app.conf --format json

    # Read a value as an integer
    lineconf get app.conf port --as int

    # Read a comma-separated list, falling back to a default
    lineconf get app.conf servers --as strings --default 127.0.0.1

    # Check for a bare option
    lineconf has app.conf color --option
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print all settings and options of a file
    Dump {
        /// Configuration file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a single value converted to a type
    Get {
        /// Configuration file
        file: PathBuf,

        /// Setting key
        key: String,

        /// Type to convert the value to
        #[arg(long = "as", value_enum, default_value = "string")]
        value_type: ValueType,

        /// Value to use when the key is absent
        #[arg(long)]
        default: Option<String>,
    },

    /// Print whether a setting (or option) is present
    Has {
        /// Configuration file
        file: PathBuf,

        /// Setting key or option name
        name: String,

        /// Look for a bare option instead of a setting
        #[arg(long)]
        option: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Strings,
    Ints,
    Floats,
    Bools,
}

fn load(path: &Path) -> anyhow::Result<Config> {
    lineconf::parse_file(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))
}

pub fn dump(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let config = load(path)?;
    let view = config.sorted();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => {
            if config.is_empty() {
                println!("No settings or options found");
                return Ok(());
            }

            if !view.settings.is_empty() {
                println!("Settings ({}):", view.settings.len());
                for (key, value) in &view.settings {
                    println!("  {} = {}", key, value);
                }
            }

            if !view.options.is_empty() {
                println!("Options ({}):", view.options.len());
                for name in &view.options {
                    println!("  {}", name);
                }
            }
        }
    }

    Ok(())
}

pub fn get_value(
    path: &Path,
    key: &str,
    value_type: ValueType,
    default: Option<&str>,
) -> anyhow::Result<()> {
    let config = load(path)?;
    let setting = match default {
        Some(def) => config.get_default(key, def),
        None => config.get(key),
    };

    match value_type {
        ValueType::String => println!("{}", setting.as_str()?),
        ValueType::Int => println!("{}", setting.int()?),
        ValueType::Float => println!("{}", setting.float64()?),
        ValueType::Bool => println!("{}", setting.bool()?),
        ValueType::Strings => print_list(&setting, Setting::string_slice)?,
        ValueType::Ints => print_list(&setting, Setting::int_slice)?,
        ValueType::Floats => print_list(&setting, Setting::float64_slice)?,
        ValueType::Bools => print_list(&setting, Setting::bool_slice)?,
    }

    Ok(())
}

fn print_list<T, F>(setting: &Setting, convert: F) -> anyhow::Result<()>
where
    T: Display + std::fmt::Debug + Send + Sync + 'static,
    F: Fn(&Setting) -> Result<Vec<T>, ListError<T>>,
{
    match convert(setting) {
        Ok(values) => {
            for value in values {
                println!("{}", value);
            }
            Ok(())
        }
        Err(err) => {
            if !err.partial().is_empty() {
                eprintln!("Partial result ({} converted):", err.partial().len());
                for value in err.partial() {
                    eprintln!("  {}", value);
                }
            }
            Err(err.into())
        }
    }
}

pub fn has(path: &Path, name: &str, option: bool) -> anyhow::Result<()> {
    let config = load(path)?;
    let present = if option {
        config.has_option(name)
    } else {
        config.has_setting(name)
    };
    println!("{}", present);
    Ok(())
}
