use serde::{Deserialize, Serialize};

/// Global configuration loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL used to build absolute canonical group URLs in the
    /// directory API (no trailing slash).
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Page size applied when a directory request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_site_url() -> String {
    "http://localhost:8320".to_string()
}

fn default_page_size() -> u32 {
    20
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            default_page_size: default_page_size(),
        }
    }
}
