use crate::indexer::{BoundaryPolicy, GridDims};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Runtime settings for the block grid server.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub columns: usize,
    pub rows: usize,
    pub policy: BoundaryPolicy,
    pub static_dir: PathBuf,
    /// Where `POST /snapshot` writes the grid, and where it is restored from.
    pub snapshot: Option<PathBuf>,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3002,
            columns: 10,
            rows: 6,
            policy: BoundaryPolicy::Shift,
            static_dir: PathBuf::from("static"),
            snapshot: None,
            cors: false,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl ServerConfig {
    /// Builds the configuration from the process environment and arguments.
    pub fn load() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    /// Defaults, overlaid by `BLOCKGRID_*` variables, then by the positional
    /// arguments `<columns> <rows>`.
    pub fn from_sources<F>(env: F, args: &[String]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(v) = env("BLOCKGRID_HOST") {
            config.host = parse("BLOCKGRID_HOST", &v)?;
        }
        if let Some(v) = env("BLOCKGRID_PORT") {
            config.port = parse("BLOCKGRID_PORT", &v)?;
        }
        if let Some(v) = env("BLOCKGRID_COLUMNS") {
            config.columns = parse("BLOCKGRID_COLUMNS", &v)?;
        }
        if let Some(v) = env("BLOCKGRID_ROWS") {
            config.rows = parse("BLOCKGRID_ROWS", &v)?;
        }
        if let Some(v) = env("BLOCKGRID_POLICY") {
            config.policy = parse("BLOCKGRID_POLICY", &v)?;
        }
        if let Some(v) = env("BLOCKGRID_STATIC_DIR") {
            config.static_dir = PathBuf::from(v);
        }
        if let Some(v) = env("BLOCKGRID_SNAPSHOT") {
            config.snapshot = Some(PathBuf::from(v));
        }
        if let Some(v) = env("BLOCKGRID_CORS") {
            config.cors = parse("BLOCKGRID_CORS", &v)?;
        }

        if args.len() >= 3 {
            config.columns = parse("columns", &args[1])?;
            config.rows = parse("rows", &args[2])?;
        }

        config.dims()?;
        Ok(config)
    }

    pub fn dims(&self) -> Result<GridDims, ConfigError> {
        GridDims::new(self.columns, self.rows).map_err(|_| ConfigError::InvalidValue {
            key: "grid size".to_string(),
            value: format!("{}x{}", self.columns, self.rows),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
