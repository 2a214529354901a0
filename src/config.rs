use anyhow::{Context, Result, anyhow, bail};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Trello board whose cards are mirrored
    pub board_id: Option<String>,

    /// Google calendar receiving the events
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// IANA zone used to read due dates and label created events
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    pub trello: TrelloConfig,

    pub google: Option<GoogleConfig>,
}

/// Trello API key and member token
#[derive(Debug, Deserialize)]
pub struct TrelloConfig {
    pub key: String,
    pub token: String,
}

/// OAuth client credentials for Google Calendar
#[derive(Debug, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_path: Option<String>,
}

fn default_calendar_id() -> String {
    trellocal_provider_google::DEFAULT_CALENDAR_ID.to_string()
}

fn default_time_zone() -> String {
    "Europe/Rome".to_string()
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.tz()?;
        Ok(config)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.time_zone
            .parse()
            .map_err(|_| anyhow!("Unknown time zone '{}' in config", self.time_zone))
    }

    pub fn require_board_id(&self) -> Result<&str> {
        match self.board_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => bail!(
                "No board_id set in config.\n\n\
                Run `trellocal boards` to list your boards, then add:\n\n\
                board_id = \"<board id>\""
            ),
        }
    }

    pub fn require_google(&self) -> Result<&GoogleConfig> {
        self.google.as_ref().context(
            "No [google] section in config.\n\n\
            Add your Google OAuth credentials:\n\n\
            [google]\n\
            client_id = \"your-client-id.apps.googleusercontent.com\"\n\
            client_secret = \"your-client-secret\"",
        )
    }
}

impl GoogleConfig {
    /// Where the OAuth token file lives (~/.config/trellocal/token.json by default)
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.token_path {
            Some(path) => Ok(expand_path(path)),
            None => Ok(config_dir()?.join("token.json")),
        }
    }
}

/// Get the config directory path (~/.config/trellocal)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("trellocal");
    Ok(config_dir)
}

/// Get the config file path (~/.config/trellocal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from `path`, or ~/.config/trellocal/config.toml
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        bail!(
            "Config file not found at {}\n\n\
            Create it with your Trello and Google credentials:\n\n\
            board_id = \"<board id>\"\n\n\
            [trello]\n\
            key = \"your-api-key\"\n\
            token = \"your-member-token\"\n\n\
            [google]\n\
            client_id = \"your-client-id.apps.googleusercontent.com\"\n\
            client_secret = \"your-client-secret\"",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    Config::parse(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
