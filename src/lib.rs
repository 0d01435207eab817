//! Line-oriented configuration files with typed value access.
//!
//! ```text
//! port = 10000
//! servers = 10.0.0.1, 10.0.0.2
//! # comment
//! color
//! ```
//!
//! ```
//! let config = lineconf::parse_str("port = 10000\nservers = a, b\ncolor");
//! assert_eq!(config.get("port").int().unwrap(), 10000);
//! assert_eq!(config.get("servers").string_slice().unwrap(), ["a", "b"]);
//! assert!(config.has_option("color"));
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod setting;

pub use config::{Config, SortedView};
pub use error::{ConfError, ListError, Result};
pub use parser::{classify_line, parse_file, parse_lines, parse_reader, parse_str, LineKind};
pub use setting::Setting;
