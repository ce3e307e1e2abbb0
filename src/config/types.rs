use serde::Deserialize;

/// User agent of a desktop Chrome build; Douyu rejects unidentified clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Relay endpoint that turns a room id into a playable stream
pub const DEFAULT_RELAY_TEMPLATE: &str = "http://192.168.1.43:81/douyu.php?id=";

/// Main configuration structure for Douyu-Playlist
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_jobs", rename = "job")]
    pub jobs: Vec<Job>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extractor: ExtractorConfig::default(),
            output: OutputConfig::default(),
            jobs: default_jobs(),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Delay between launching two consecutive jobs (milliseconds)
    #[serde(rename = "launch-delay-ms")]
    pub launch_delay_ms: u64,

    /// Value sent in the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            launch_delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Structural markers used to find stream cards in directory markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// CSS selector of a stream card container
    #[serde(rename = "card-selector")]
    pub card_selector: String,

    /// CSS selector of the element carrying the title, relative to the card
    #[serde(rename = "title-selector")]
    pub title_selector: String,

    /// Attribute of the title element holding the display title
    #[serde(rename = "title-attribute")]
    pub title_attribute: String,

    /// Attribute of the card container holding the room link
    #[serde(rename = "link-attribute")]
    pub link_attribute: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            card_selector: ".DyListCover-wrap".to_string(),
            title_selector: ".DyListCover-intro".to_string(),
            title_attribute: "title".to_string(),
            link_attribute: "href".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the playlist file (overwritten on every run)
    pub path: String,

    /// Prefix each sanitized room id is appended to
    #[serde(rename = "relay-template")]
    pub relay_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "douyu.txt".to_string(),
            relay_template: DEFAULT_RELAY_TEMPLATE.to_string(),
        }
    }
}

/// One unit of fetch work: a directory page and the category it feeds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    /// Directory page URL
    pub url: String,

    /// Category label the page's streams are filed under
    pub category: String,
}

impl Job {
    pub fn new(url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            category: category.into(),
        }
    }
}

/// The built-in "一起看" sub-category directories
fn default_jobs() -> Vec<Job> {
    [
        ("290", "陪看"),
        ("1863", "综合"),
        ("2827", "喜剧"),
        ("2828", "动作"),
        ("2830", "科幻"),
        ("2833", "剧情"),
        ("2834", "古装"),
    ]
    .into_iter()
    .map(|(id, category)| {
        Job::new(
            format!("https://www.douyu.com/directory/subCate/yqk/{}", id),
            category,
        )
    })
    .collect()
}
