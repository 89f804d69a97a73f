use std::{io, path};

use clap::Parser;
use serde::{Deserialize, Deserializer};
use spdy::SpdyVersion;
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Parser)]
#[command(name = "spdy-replay")]
#[command(version = "0.1")]
#[command(about = "SPDY encoder replay", long_about = Some("Feed a transcript of HTTP objects through the SPDY frame encoder and print the frames"))]
pub struct CliConfig {
    #[arg(short, long)]
    pub config: path::PathBuf,
    #[arg(
        short,
        long,
        help = "Logging level. Can an integer between 1-5 or error, warn, info, debug and trace",
        default_value_t = tracing::Level::INFO
    )]
    pub level: tracing::Level,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Bad Yaml: {0:?}")]
    BadYaml(serde_yaml::Error),
    #[error("Error while reading config file: '{0}'")]
    ReadError(io::Error),
    #[error("Transcript path is a directory: '{0}'")]
    TranscriptIsADirectory(path::PathBuf),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: SpdyVersion,
    pub transcript: path::PathBuf,
    pub log_file: Option<path::PathBuf>,
}

// YAML reads `3` as an integer and `3.1` as a float.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Number(u16),
    Float(f64),
    Text(String),
}

fn deserialize_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpdyVersion, D::Error> {
    let text = match RawVersion::deserialize(deserializer)? {
        RawVersion::Number(n) => n.to_string(),
        RawVersion::Float(f) => f.to_string(),
        RawVersion::Text(s) => s,
    };

    text.parse().map_err(<D::Error as serde::de::Error>::custom)
}

pub async fn read_config_from_file(path: &path::Path) -> Result<String, ConfigError> {
    fs::read(path)
        .await
        .map(|s| String::from_utf8_lossy(&s).to_string())
        .map_err(ConfigError::ReadError)
}

impl Config {
    pub async fn from_yaml_str(config: &str) -> Result<Config, ConfigError> {
        let result: Config = serde_yaml::from_str(config).map_err(ConfigError::BadYaml)?;

        if result.transcript.is_dir() {
            return Err(ConfigError::TranscriptIsADirectory(result.transcript));
        }

        if let Some(log_file) = result.log_file.as_ref() {
            info!("Logging at: {}", log_file.display());
        }

        Ok(result)
    }
}
