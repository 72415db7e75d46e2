pub mod default_keys;
pub mod keys;
mod settings;

pub use default_keys::default_keybindings;
pub use keys::{parse_key_notation, KeybindingConfig, KeyCombo, KeyContext, KeyParseError};
pub use settings::{parse_action, Config, EXAMPLE_CONFIG};
