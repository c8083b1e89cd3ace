use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (logs live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Content file (JSON) with posts and archives
    #[serde(default)]
    pub content_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            content_path: None,
        }
    }
}

/// A header menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub label: String,
    pub link: String,
}

impl MenuLink {
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title shown in the header and the terminal title
    #[serde(default = "default_site_title")]
    pub title: String,
    /// Site description shown under the title
    #[serde(default = "default_site_description")]
    pub description: String,
    /// Header menu
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuLink>,
    /// Ordered post links that open in the swipeable deck.
    /// Empty means "every post, in content file order".
    #[serde(default)]
    pub deck: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            description: default_site_description(),
            menu: default_menu(),
            deck: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show post author
    #[serde(default = "default_true")]
    pub show_author: bool,
    /// Show post date
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Post body scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Slide transition between posts in the deck
    #[serde(default)]
    pub transition: TransitionConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_author: default_true(),
            show_timestamps: default_true(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

/// Easing curve used by animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate post body scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Scroll easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while anything is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::Cubic,
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Animate the slide between posts
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Slide duration in milliseconds
    #[serde(default = "default_transition_duration")]
    pub duration_ms: u64,
    /// Slide easing curve
    #[serde(default = "default_transition_easing")]
    pub easing: EasingType,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            duration_ms: default_transition_duration(),
            easing: default_transition_easing(),
        }
    }
}

/// Thresholds for classifying a horizontal drag as a swipe.
/// Distances are in terminal columns, velocities in columns per millisecond.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum horizontal travel for a swipe
    #[serde(default = "default_swipe_distance")]
    pub swipe_distance: f64,
    /// Minimum average horizontal velocity for a swipe
    #[serde(default = "default_swipe_velocity")]
    pub swipe_velocity: f64,
    /// Maximum drag duration for a swipe
    #[serde(default = "default_swipe_duration")]
    pub swipe_duration_ms: u64,
    /// Travel after which the drag is locked to one axis
    #[serde(default = "default_axis_threshold")]
    pub axis_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_distance: default_swipe_distance(),
            swipe_velocity: default_swipe_velocity(),
            swipe_duration_ms: default_swipe_duration(),
            axis_threshold: default_axis_threshold(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("mars" or "mars-dark")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with `name` and `colors`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a table with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#1f38c5" or "1f38c5")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub background: Option<String>,
    /// Body text
    pub text: Option<String>,
    /// Dimmed text (metadata, hints)
    pub muted: Option<String>,
    /// Header background
    pub header_bg: Option<String>,
    /// Header text
    pub header_fg: Option<String>,
    /// Accent color (titles, focused borders)
    pub accent: Option<String>,
    /// List selection background
    pub selection: Option<String>,
    /// Error color
    pub error: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "G" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Next post in the deck
    #[serde(default = "default_key_next_post")]
    pub next_post: String,
    /// Previous post in the deck
    #[serde(default = "default_key_prev_post")]
    pub prev_post: String,
    /// Move down (list cursor or post body)
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    /// Move up (list cursor or post body)
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    /// Scroll half page down
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    /// Scroll full page down
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    /// Scroll full page up
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to top
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Open the selected list entry
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Go to the home page
    #[serde(default = "default_key_home")]
    pub home: String,
    /// Navigate back in history
    #[serde(default = "default_key_history_back")]
    pub history_back: String,
    /// Navigate forward in history
    #[serde(default = "default_key_history_forward")]
    pub history_forward: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_post: default_key_next_post(),
            prev_post: default_key_prev_post(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            select: default_key_select(),
            home: default_key_home(),
            history_back: default_key_history_back(),
            history_forward: default_key_history_forward(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_post() -> String { "l".to_string() }
fn default_key_prev_post() -> String { "h".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_home() -> String { "H".to_string() }
fn default_key_history_back() -> String { "u".to_string() }
fn default_key_history_forward() -> String { "<C-r>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mars")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_site_title() -> String {
    "Mars".to_string()
}

fn default_site_description() -> String {
    "A swipeable post reader".to_string()
}

fn default_menu() -> Vec<MenuLink> {
    vec![
        MenuLink::new("Home", "/"),
        MenuLink::new("Nature", "/category/nature/"),
        MenuLink::new("Travel", "/category/travel/"),
        MenuLink::new("Japan", "/tag/japan/"),
        MenuLink::new("About Us", "/about-us/"),
    ]
}

fn default_theme_name() -> String {
    "mars".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_transition_duration() -> u64 {
    300
}

fn default_transition_easing() -> EasingType {
    EasingType::EaseOut
}

fn default_swipe_distance() -> f64 {
    6.0
}

fn default_swipe_velocity() -> f64 {
    0.015
}

fn default_swipe_duration() -> u64 {
    400
}

fn default_axis_threshold() -> f64 {
    2.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/mars/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("mars")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("mars.log")
    }

    /// Get the content file path (with tilde expansion), falling back to
    /// `content.json` in the data directory
    pub fn content_path(&self) -> PathBuf {
        match &self.general.content_path {
            Some(path) => expand_tilde(path),
            None => self.data_dir().join("content.json"),
        }
    }
}
