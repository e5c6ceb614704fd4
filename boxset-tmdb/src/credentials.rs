use boxset_core::mask_secret;

/// Environment variable holding the TMDb API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Where the API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Passed on the command line.
    CommandLine,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere; remote lookups are disabled.
    Missing,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// A resolved API key together with its provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub value: Option<String>,
    pub source: KeySource,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &self.value.as_deref().map(mask_secret))
            .field("source", &self.source)
            .finish()
    }
}

impl ApiKey {
    /// Resolve the key with priority: command line > `$TMDB_API_KEY` > config file.
    ///
    /// Blank values are treated as unset at every level.
    pub fn resolve(cli: Option<String>, config: Option<String>) -> Self {
        Self::resolve_with_env(cli, std::env::var(API_KEY_ENV).ok(), config)
    }

    fn resolve_with_env(cli: Option<String>, env: Option<String>, config: Option<String>) -> Self {
        let candidates = [
            (cli, KeySource::CommandLine),
            (env, KeySource::EnvVar(API_KEY_ENV)),
            (config, KeySource::ConfigFile),
        ];
        for (value, source) in candidates {
            if let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                return Self {
                    value: Some(value),
                    source,
                };
            }
        }
        Self {
            value: None,
            source: KeySource::Missing,
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The key with all but the last four characters hidden, for display.
    pub fn masked(&self) -> Option<String> {
        self.value.as_deref().map(mask_secret)
    }
}
