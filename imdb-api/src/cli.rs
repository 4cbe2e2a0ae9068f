//! Command-line arguments

use clap::Parser;
use imdb_common::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

/// Command-line arguments for imdb-api
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "imdb-api")]
#[command(about = "IMDB movie REST service")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "IMDB_CONFIG")]
    pub config: PathBuf,

    /// Port to listen on (overrides `app.port`)
    #[arg(short, long, env = "IMDB_PORT")]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var("IMDB_CONFIG");
        std::env::remove_var("IMDB_PORT");

        let args = Args::try_parse_from(["imdb-api"]).unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(args.port, None);
    }

    #[test]
    #[serial]
    fn test_flags() {
        std::env::remove_var("IMDB_CONFIG");
        std::env::remove_var("IMDB_PORT");

        let args =
            Args::try_parse_from(["imdb-api", "--config", "/etc/imdb.toml", "-p", "9000"]).unwrap();
        assert_eq!(args.config, PathBuf::from("/etc/imdb.toml"));
        assert_eq!(args.port, Some(9000));
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        std::env::set_var("IMDB_CONFIG", "/tmp/other.toml");
        std::env::set_var("IMDB_PORT", "8123");

        let args = Args::try_parse_from(["imdb-api"]).unwrap();

        std::env::remove_var("IMDB_CONFIG");
        std::env::remove_var("IMDB_PORT");

        assert_eq!(args.config, PathBuf::from("/tmp/other.toml"));
        assert_eq!(args.port, Some(8123));
    }

    #[test]
    #[serial]
    fn test_invalid_port_rejected() {
        std::env::remove_var("IMDB_PORT");
        assert!(Args::try_parse_from(["imdb-api", "--port", "eighty"]).is_err());
    }
}
