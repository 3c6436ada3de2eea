use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use clap::Parser;

const DEFAULT_GTFS_DIR: &str = "gtfs";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_LOG_DIR: &str = "./logs";

/// Serves BMTC route shapes and nearby bus numbers from a static GTFS feed.
///
/// Every option falls back to an environment variable (a `.env` file is read too), then to a default.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory with routes.txt, stops.txt, trips.txt, shapes.txt and stop_times.txt. Also read from GTFS_DIR.
    #[arg(long)]
    pub gtfs_dir: Option<PathBuf>,

    /// Address to listen on. Also read from BIND_ADDR.
    #[arg(long)]
    pub bind: Option<String>,

    /// Directory for the daily rolling log files. Also read from LOG_DIR.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// OTLP gRPC endpoint to export traces to, if any. Also read from OTLP_ENDPOINT.
    #[arg(long)]
    pub otlp_endpoint: Option<String>,

    /// IANA time zone for the live delay timestamps, e.g. Asia/Kolkata. Also read from DELAY_TIMEZONE.
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gtfs_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_dir: PathBuf,
    pub otlp_endpoint: Option<String>,
    pub timezone: Option<Tz>,
}

impl Config {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let gtfs_dir = args
            .gtfs_dir
            .or_else(|| dotenvy::var("GTFS_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GTFS_DIR));

        let bind = args
            .bind
            .or_else(|| dotenvy::var("BIND_ADDR").ok())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;

        let log_dir = args
            .log_dir
            .or_else(|| dotenvy::var("LOG_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let otlp_endpoint = args
            .otlp_endpoint
            .or_else(|| dotenvy::var("OTLP_ENDPOINT").ok())
            .filter(|e| !e.is_empty());

        let timezone = args
            .timezone
            .or_else(|| dotenvy::var("DELAY_TIMEZONE").ok())
            .filter(|tz| !tz.is_empty())
            .map(|tz| {
                tz.parse::<Tz>()
                    .map_err(|e| anyhow!("unknown time zone {tz:?}: {e}"))
            })
            .transpose()?;

        Ok(Config {
            gtfs_dir,
            bind_addr,
            log_dir,
            otlp_endpoint,
            timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            gtfs_dir: Some(PathBuf::from("feeds/bmtc")),
            bind: Some("0.0.0.0:8080".to_string()),
            log_dir: Some(PathBuf::from("/tmp/logs")),
            otlp_endpoint: Some("http://localhost:4317".to_string()),
            timezone: Some("Asia/Kolkata".to_string()),
        }
    }

    #[test]
    fn flags_are_used() -> Result<(), anyhow::Error> {
        let config = Config::from_args(args())?;

        assert_eq!(config.gtfs_dir, PathBuf::from("feeds/bmtc"));
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>()?);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
        assert_eq!(config.timezone, Some(chrono_tz::Asia::Kolkata));

        Ok(())
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let args = Args {
            bind: Some("localhost".to_string()),
            ..args()
        };

        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let args = Args {
            timezone: Some("Asia/Bengaluru".to_string()),
            ..args()
        };

        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let args = Args::parse_from([
            "bmtc_transit_api",
            "--gtfs-dir",
            "data",
            "--bind",
            "127.0.0.1:9000",
        ]);

        assert_eq!(args.gtfs_dir, Some(PathBuf::from("data")));
        assert_eq!(args.bind.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(args.timezone, None);
    }
}
