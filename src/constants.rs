//! Application constants
//!
//! Centralized location for file names, labels and configuration defaults.

/// Application name shown in the title bar
pub const APP_NAME: &str = "Jumpstart Randomizer";

/// Title of the pick order application
pub const PICK_ORDER_TITLE: &str = "MTG Jumpstart Randomizer";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the data directory
pub const HOME_ENV_VAR: &str = "JUMPSTART_HOME";

/// Directory under the user's home used when no override is set
pub const DEFAULT_DIR_NAME: &str = ".jumpstart";

/// Persisted name list
pub const NAMES_FILE: &str = "names.json";

/// Key-value settings (window size, dark mode)
pub const SETTINGS_FILE: &str = "settings.json";

/// Log file for the name list application
pub const NAMES_LOG_FILE: &str = "jumpstart.log";

/// Log file for the pick order application
pub const PICK_ORDER_LOG_FILE: &str = "pick-order.log";

/// Prefix of the shuffle output line
pub const SHUFFLE_LABEL: &str = "Shuffled Order: ";

/// Shown in place of the shuffle result when there are no names
pub const EMPTY_SENTINEL: &str = "(empty)";
