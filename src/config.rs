use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::{BackendLocal, StorageManager};

const DEFAULT_DISPLAY_NAME: &str = "Yash";

/// Quiet window for search-on-type coalescing
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Simulated "thinking" pause before a canned reply is shown
const DEFAULT_REPLY_DELAY_MS: u64 = 600;
/// Pause before a reply's related section auto-opens
const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 2000;

/// How long a transient toast stays on screen
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
/// Fade-out tail after the display duration
const DEFAULT_TOAST_FADE_MS: u64 = 300;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Assistant timing knobs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    #[serde(default = "default_follow_up_delay_ms")]
    pub follow_up_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            follow_up_delay_ms: DEFAULT_FOLLOW_UP_DELAY_MS,
        }
    }
}

fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY_MS
}

fn default_follow_up_delay_ms() -> u64 {
    DEFAULT_FOLLOW_UP_DELAY_MS
}

/// Toast presentation timing, consumed by rendering surfaces
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,

    #[serde(default = "default_toast_fade_ms")]
    pub fade_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TOAST_DURATION_MS,
            fade_ms: DEFAULT_TOAST_FADE_MS,
        }
    }
}

fn default_toast_duration_ms() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

fn default_toast_fade_ms() -> u64 {
    DEFAULT_TOAST_FADE_MS
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            assistant: AssistantConfig::default(),
            toast: ToastConfig::default(),
            listen_addr: default_listen_addr(),
            base_path: String::new(),
        }
    }
}

fn default_display_name() -> String {
    DEFAULT_DISPLAY_NAME.to_string()
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl Config {
    fn validate(&self) {
        if self.search_debounce_ms == 0 {
            panic!("search_debounce_ms must be greater than 0");
        }

        if self.assistant.reply_delay_ms == 0 || self.assistant.follow_up_delay_ms == 0 {
            panic!("assistant delays must be greater than 0");
        }

        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            panic!("listen_addr is not a valid socket address: {}", self.listen_addr);
        }
    }

    pub fn load_with(base_path: &str) -> Self {
        let store = BackendLocal::new(base_path).expect("failed to create config directory");

        // create new if does not exist
        if !store.exists("config.yaml") {
            let config_str =
                serde_yml::to_string(&Self::default()).expect("default config is serializable");
            if let Err(err) = store.write("config.yaml", config_str.as_bytes()) {
                log::error!("failed to write default config: {err}");
            }
        }

        let config_str = String::from_utf8(
            store.read("config.yaml").expect("failed to read config"),
        )
        .expect("config file is not valid utf8");
        let mut config: Self = serde_yml::from_str(&config_str).expect("config is malformed");

        config.base_path = base_path.to_string();

        config.validate();

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config).expect("config is serializable") {
            config.save();
        }

        config
    }

    pub fn save(&self) {
        let store = match BackendLocal::new(&self.base_path) {
            Ok(store) => store,
            Err(err) => {
                log::error!("failed to open config directory: {err}");
                return;
            }
        };

        let config_str = serde_yml::to_string(&self).expect("config is serializable");
        if let Err(err) = store.write("config.yaml", config_str.as_bytes()) {
            log::error!("failed to write config: {err}");
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.assistant.reply_delay_ms)
    }

    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(self.assistant.follow_up_delay_ms)
    }
}
