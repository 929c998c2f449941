use crate::error::{ConfigErrorKind, InfraError};
use crate::models::item::Item;
use crate::narration::DoorMessages;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world_dir: PathBuf,           // e.g. "worlds/demo"
    pub start_room: String,           // e.g. "entry"
    pub player_name: String,
    pub starting_items: Vec<StartingItem>,
    /// Fixed seed for narration variants; random when unset
    pub narration_seed: Option<u64>,
    pub job_queue_depth: usize,
    /// Overrides the default log filter when RUST_LOG is not set
    pub log_filter: Option<String>,
    pub messages: DoorMessages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartingItem {
    pub name: String,
    pub keywords: Vec<String>,
}

impl StartingItem {
    pub fn to_item(&self) -> Item {
        let keywords: Vec<&str> = self.keywords.iter().map(String::as_str).collect();
        Item::new(self.name.clone(), &keywords)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_dir: PathBuf::from("worlds/demo"),
            start_room: "entry".to_string(),
            player_name: "Wanderer".to_string(),
            starting_items: vec![StartingItem {
                name: "a small brass key".to_string(),
                keywords: vec!["brass".to_string(), "key".to_string()],
            }],
            narration_seed: None,
            job_queue_depth: 64,
            log_filter: None,
            messages: DoorMessages::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let config_err = |source| InfraError::Config { path: path.to_path_buf(), source };

        let data = std::fs::read_to_string(path).map_err(|e| config_err(ConfigErrorKind::Read(e)))?;
        let cfg: Self = toml::from_str(&data).map_err(|e| config_err(ConfigErrorKind::Parse(e)))?;
        if let Some(event) = cfg.messages.first_empty() {
            return Err(config_err(ConfigErrorKind::EmptyMessages(event)));
        }
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self, InfraError> {
        let _ = dotenvy::from_filename(".env");
        Self::from_vars(|k| std::env::var(k).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, InfraError> {
        let mut cfg = Self::default();
        if let Some(v) = var("WAYGATE_WORLD_DIR") {
            cfg.world_dir = PathBuf::from(v);
        }
        if let Some(v) = var("WAYGATE_START_ROOM") {
            cfg.start_room = v;
        }
        if let Some(v) = var("WAYGATE_PLAYER") {
            cfg.player_name = v;
        }
        if let Some(v) = var("WAYGATE_SEED") {
            cfg.narration_seed = Some(parse_env("WAYGATE_SEED", &v)?);
        }
        if let Some(v) = var("WAYGATE_QUEUE_DEPTH") {
            cfg.job_queue_depth = parse_env("WAYGATE_QUEUE_DEPTH", &v)?;
        }
        cfg.log_filter = var("WAYGATE_LOG");

        Ok(cfg)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, InfraError> {
    value
        .trim()
        .parse()
        .map_err(|_| InfraError::Env(ConfigErrorKind::InvalidEnv(name.to_string(), value.to_string())))
}
