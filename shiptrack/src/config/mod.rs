//! Configuration file support.
//!
//! The user configuration lives in `~/.shiptrack/config.ini`. A missing file
//! means defaults; present keys overlay them. Every value is validated when
//! the file is parsed and rejected with [`ConfigFileError::InvalidValue`].
//!
//! ```
//! use shiptrack::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.vessel.id, "235109357");
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::*;
