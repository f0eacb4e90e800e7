pub mod config;
pub mod error;
pub mod frontmatter;
pub mod saver;
pub mod target;
pub mod tee;

pub use config::{load_env_file, SaveConfig};
pub use error::{Result, SaveError};
pub use saver::{save, save_at, SaveOutcome, SaveRequest};
