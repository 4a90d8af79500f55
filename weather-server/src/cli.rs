use std::path::PathBuf;

use clap::Parser;
use weather_core::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather proxy and data API server")]
pub struct Cli {
    /// TOML config file; defaults to the platform config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to listen on. Overrides PORT and the config file.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database URL, e.g. "sqlite://weather.db". Overrides DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Resolve configuration: defaults, then file, then environment, then flags.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        config.apply_env()?;

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }

        Ok(config)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        weather_server::run(&config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "weather-server",
            "--port",
            "8088",
            "--database-url",
            "sqlite::memory:",
            "--log-level",
            "debug",
        ])
        .expect("flags must parse");

        assert_eq!(cli.port, Some(8088));
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(cli.log_level, "debug");
        assert!(cli.config.is_none());
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["weather-server", "--port", "99999"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 4000\ndatabase_url = \"sqlite://file.db\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "weather-server",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "5000",
            "--database-url",
            "sqlite://flag.db",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, "sqlite://flag.db");
    }
}
