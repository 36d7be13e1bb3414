use serde::{Deserialize, Serialize};

/// Main configuration structure for Tagsift
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Remote service configuration
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Interactive browsing configuration
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Publish queue configuration
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".tagsift/history.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Remote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteConfig {
    /// Base URL of the remote service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account name used for basic authentication
    #[serde(default)]
    pub login: String,

    /// API key used for basic authentication
    #[serde(default)]
    pub api_key: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures (429, 5xx, network)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_base_url() -> String {
    "https://e621.net".to_string()
}

fn default_user_agent() -> String {
    format!("tagsift/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_initial_backoff_ms() -> u64 {
    1000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login: String::new(),
            api_key: String::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Interactive browsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BrowseConfig {
    /// Search query passed to the candidate listing
    #[serde(default)]
    pub query: String,

    /// Candidates requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pages between model refreshes
    #[serde(default = "default_refresh_every_pages")]
    pub refresh_every_pages: u32,

    /// Minimum distance from the running average before an action is suggested
    #[serde(default = "default_suggestion_threshold")]
    pub suggestion_threshold: f64,

    /// Tag blacklist file
    #[serde(default = "default_blacklist_path")]
    pub blacklist_path: String,

    /// Compressed model export
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Image viewer command; the file path is appended
    #[serde(default = "default_image_viewer")]
    pub image_viewer: Vec<String>,

    /// Video player command; the file path is appended
    #[serde(default = "default_video_viewer")]
    pub video_viewer: Vec<String>,

    /// Tags judged more often than this are emphasized in the report
    #[serde(default = "default_report_min_total")]
    pub report_min_total: u64,
}

const fn default_page_size() -> u32 {
    320
}

const fn default_refresh_every_pages() -> u32 {
    10
}

const fn default_suggestion_threshold() -> f64 {
    0.01
}

fn default_blacklist_path() -> String {
    ".tagsift/blacklist.txt".to_string()
}

fn default_model_path() -> String {
    ".tagsift/fullmodel.fbd".to_string()
}

fn default_image_viewer() -> Vec<String> {
    vec!["imgcat".to_string(), "-r".to_string()]
}

fn default_video_viewer() -> Vec<String> {
    vec![
        "ffplay".to_string(),
        "-loglevel".to_string(),
        "panic".to_string(),
    ]
}

const fn default_report_min_total() -> u64 {
    12
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            page_size: default_page_size(),
            refresh_every_pages: default_refresh_every_pages(),
            suggestion_threshold: default_suggestion_threshold(),
            blacklist_path: default_blacklist_path(),
            model_path: default_model_path(),
            image_viewer: default_image_viewer(),
            video_viewer: default_video_viewer(),
            report_min_total: default_report_min_total(),
        }
    }
}

/// Publish queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Delay after each successfully published task, in milliseconds
    #[serde(default = "default_publish_delay_ms")]
    pub publish_delay_ms: u64,
}

const fn default_publish_delay_ms() -> u64 {
    1000
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            publish_delay_ms: default_publish_delay_ms(),
        }
    }
}
