use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::playback::Pacing;
use crate::ui::action::Action;
use crate::util::paths::config_path;

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeyContext, KeybindingConfig};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Illustration shown before any step swaps it
    pub pa_image: PathBuf,
    /// Directory holding the illustration variants
    pub assets_dir: PathBuf,
    /// Script file to play instead of the built-in conversation
    pub script_path: Option<PathBuf>,
    /// Play the first step as soon as the demo opens
    pub autoplay: bool,
    /// Animation timing
    pub pacing: Pacing,
    /// Seed for the fallback chart jitter (random when unset)
    pub chart_seed: Option<u64>,
    /// Keybinding configuration
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pa_image: PathBuf::from("assets/pa_example.png"),
            assets_dir: PathBuf::from("assets"),
            script_path: None,
            autoplay: true,
            pacing: Pacing::default(),
            chart_seed: None,
            keybindings: default_keybindings(),
        }
    }
}

/// TOML representation of keybinding configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlKeybindings {
    /// Global keybindings (apply to all contexts)
    #[serde(flatten)]
    pub global: HashMap<String, String>,

    /// Bindings while the transcript has focus
    pub transcript: Option<HashMap<String, String>>,

    /// Bindings while typing in the composer
    pub composer: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub keystroke_ms: Option<u64>,
    pub thinking_base_ms: Option<u64>,
    pub thinking_per_char_ms: Option<u64>,
    pub thinking_cap_ms: Option<u64>,
    pub fast_forward: Option<bool>,
    pub autoplay: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlIllustrationConfig {
    pub image: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub chart_seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlScriptConfig {
    pub path: Option<PathBuf>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub keys: Option<TomlKeybindings>,
    pub playback: Option<TomlPlaybackConfig>,
    pub illustration: Option<TomlIllustrationConfig>,
    pub script: Option<TomlScriptConfig>,
}

impl TomlKeybindings {
    /// Convert TOML keybindings to KeybindingConfig
    fn to_keybinding_config(&self) -> KeybindingConfig {
        let mut config = KeybindingConfig::new();

        for (action_name, key_str) in &self.global {
            // Context tables are handled below
            if matches!(action_name.as_str(), "transcript" | "composer") {
                continue;
            }
            match (parse_key_notation(key_str), parse_action(action_name)) {
                (Ok(combo), Some(action)) => {
                    config.global.insert(combo, action);
                }
                _ => tracing::warn!(action = %action_name, key = %key_str, "Ignoring keybinding"),
            }
        }

        if let Some(transcript) = &self.transcript {
            parse_context_bindings(&mut config, KeyContext::Transcript, transcript);
        }
        if let Some(composer) = &self.composer {
            parse_context_bindings(&mut config, KeyContext::Composer, composer);
        }

        config
    }
}

/// Parse context-specific keybindings
fn parse_context_bindings(
    config: &mut KeybindingConfig,
    context: KeyContext,
    bindings: &HashMap<String, String>,
) {
    let context_map = config.context.entry(context).or_default();
    for (action_name, key_str) in bindings {
        match (parse_key_notation(key_str), parse_action(action_name)) {
            (Ok(combo), Some(action)) => {
                context_map.insert(combo, action);
            }
            _ => tracing::warn!(
                ?context,
                action = %action_name,
                key = %key_str,
                "Ignoring keybinding"
            ),
        }
    }
}

/// Parse an action name string into an Action
pub fn parse_action(name: &str) -> Option<Action> {
    match name {
        "quit" => Some(Action::Quit),

        // Playback
        "advance" | "next" => Some(Action::Advance),
        "retreat" | "prev" => Some(Action::Retreat),
        "restart" | "reset" => Some(Action::Restart),
        "open_report" => Some(Action::OpenReport),
        "select_anomaly_1" => Some(Action::SelectAnomaly(1)),
        "select_anomaly_2" => Some(Action::SelectAnomaly(2)),

        // Focus
        "focus_composer" => Some(Action::FocusComposer),
        "focus_transcript" => Some(Action::FocusTranscript),

        // Scrolling
        "scroll_up" => Some(Action::ScrollUp(1)),
        "scroll_down" => Some(Action::ScrollDown(1)),
        "scroll_page_up" => Some(Action::ScrollPageUp),
        "scroll_page_down" => Some(Action::ScrollPageDown),
        "scroll_to_top" => Some(Action::ScrollToTop),
        "scroll_to_bottom" => Some(Action::ScrollToBottom),

        // Composer editing
        "submit" => Some(Action::Submit),
        "backspace" => Some(Action::Backspace),
        "delete" => Some(Action::Delete),
        "delete_word_back" => Some(Action::DeleteWordBack),
        "delete_to_start" => Some(Action::DeleteToStart),
        "delete_to_end" => Some(Action::DeleteToEnd),
        "move_cursor_left" => Some(Action::MoveCursorLeft),
        "move_cursor_right" => Some(Action::MoveCursorRight),
        "move_cursor_start" => Some(Action::MoveCursorStart),
        "move_cursor_end" => Some(Action::MoveCursorEnd),

        _ => None,
    }
}

impl Config {
    /// Load configuration from the data directory, merging with defaults.
    ///
    /// A missing file is created from the bundled example; an unreadable or
    /// invalid one is logged and ignored.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No config file, using defaults");
                return Config::default();
            }
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config file, using defaults");
                Config::default()
            }
        }
    }

    /// Parse a config file body and merge it over the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(keys) = toml_config.keys {
            let user_bindings = keys.to_keybinding_config();
            config.keybindings.merge(user_bindings);
        }

        if let Some(playback) = toml_config.playback {
            if let Some(ms) = playback.keystroke_ms {
                config.pacing.keystroke = Duration::from_millis(ms);
            }
            if let Some(ms) = playback.thinking_base_ms {
                config.pacing.thinking_base = Duration::from_millis(ms);
            }
            if let Some(ms) = playback.thinking_per_char_ms {
                config.pacing.thinking_per_char = Duration::from_millis(ms);
            }
            if let Some(ms) = playback.thinking_cap_ms {
                config.pacing.thinking_cap = Duration::from_millis(ms);
            }
            if let Some(fast_forward) = playback.fast_forward {
                config.pacing.fast_forward = fast_forward;
            }
            if let Some(autoplay) = playback.autoplay {
                config.autoplay = autoplay;
            }
        }

        if let Some(illustration) = toml_config.illustration {
            if let Some(image) = illustration.image {
                config.pa_image = image;
            }
            if let Some(assets_dir) = illustration.assets_dir {
                config.assets_dir = assets_dir;
            }
            config.chart_seed = illustration.chart_seed;
        }

        if let Some(script) = toml_config.script {
            config.script_path = script.path;
        }

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_pa_image(mut self, path: PathBuf) -> Self {
        self.pa_image = path;
        self
    }

    pub fn with_assets_dir(mut self, dir: PathBuf) -> Self {
        self.assets_dir = dir;
        self
    }

    pub fn with_script_path(mut self, path: PathBuf) -> Self {
        self.script_path = Some(path);
        self
    }

    pub fn with_fast_forward(mut self) -> Self {
        self.pacing.fast_forward = true;
        self
    }
}
