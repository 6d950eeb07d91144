use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;

/// Default JSON body limit, 100 KiB.
const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Server settings read from `REMEMBERME_*` environment variables.
///
/// `REMEMBERME_HOST` must be an IP literal (`0.0.0.0`, `127.0.0.1`, `::1`);
/// hostnames such as `localhost` are not resolved and fail at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("REMEMBERME_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("REMEMBERME_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("REMEMBERME_PORT must be a port number")?;
        let db_path: PathBuf = lookup("REMEMBERME_DB_PATH")
            .unwrap_or_else(|| "rememberme.db".into())
            .into();
        let body_limit: usize = match lookup("REMEMBERME_BODY_LIMIT") {
            Some(v) => v.parse().context("REMEMBERME_BODY_LIMIT must be a byte count")?,
            None => DEFAULT_BODY_LIMIT,
        };

        let addr: SocketAddr = listen_addr(&host, port)
            .with_context(|| format!("REMEMBERME_HOST must be an IP address, got {}", host))?;

        Ok(Self {
            addr,
            db_path,
            body_limit,
        })
    }
}

fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    let ip: IpAddr = host.parse()?;
    Ok(SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(cfg.db_path, PathBuf::from("rememberme.db"));
        assert_eq!(cfg.body_limit, 100 * 1024);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("REMEMBERME_HOST", "127.0.0.1"),
            ("REMEMBERME_PORT", "8080"),
            ("REMEMBERME_DB_PATH", "/tmp/x.db"),
            ("REMEMBERME_BODY_LIMIT", "2048"),
        ])
        .unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(cfg.body_limit, 2048);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(config(&[("REMEMBERME_PORT", "http")]).is_err());
        assert!(config(&[("REMEMBERME_BODY_LIMIT", "-1")]).is_err());
        assert!(config(&[("REMEMBERME_HOST", "not a host")]).is_err());
    }

    #[test]
    fn host_must_be_an_ip_literal() {
        assert!(config(&[("REMEMBERME_HOST", "localhost")]).is_err());

        let cfg = config(&[("REMEMBERME_HOST", "::1"), ("REMEMBERME_PORT", "4000")]).unwrap();
        assert_eq!(cfg.addr, "[::1]:4000".parse().unwrap());
    }
}
