/// Runtime configuration
///
/// Resolved values the binary hands to the library: where the state lives and
/// how advice is fetched.

use std::path::PathBuf;
use std::time::Duration;

/// Default model for the remote advice provider
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL of the remote advice provider
pub const DEFAULT_ADVICE_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// How long a single advice request may take before the fallback is used
pub const DEFAULT_ADVICE_TIMEOUT: Duration = Duration::from_secs(8);

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "softday.db";

/// Where the state document is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    /// SQLite database file
    File(PathBuf),
    /// Nothing survives the process
    Memory,
}

/// Remote advice settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceConfig {
    /// Without a key the offline phrases are used
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_ADVICE_MODEL.to_string(),
            endpoint: DEFAULT_ADVICE_ENDPOINT.to_string(),
            timeout: DEFAULT_ADVICE_TIMEOUT,
        }
    }
}

impl AdviceConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

/// Everything needed to start a companion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionConfig {
    pub storage: StorageTarget,
    pub advice: AdviceConfig,
}

impl CompanionConfig {
    /// In-memory storage with offline advice
    pub fn ephemeral() -> Self {
        Self {
            storage: StorageTarget::Memory,
            advice: AdviceConfig::default(),
        }
    }
}
