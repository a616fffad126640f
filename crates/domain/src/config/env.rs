//! Environment variable overlay.

use super::errors::ConfigError;
use super::root::Config;
use super::sink::SinkApi;
use crate::collection_mode::CollectionMode;
use std::str::FromStr;

pub const PIHOLE_HOSTNAME: &str = "PIHOLE_HOSTNAME";
pub const PIHOLE_AUTHENTICATION: &str = "PIHOLE_AUTHENTICATION";
pub const PIHOLE_INTERVAL: &str = "PIHOLE_INTERVAL";
pub const PIHOLE_MODE: &str = "PIHOLE_MODE";
pub const INFLUX_DB_ADDRESS: &str = "INFLUX_DB_ADDRESS";
pub const INFLUX_DB_PORT: &str = "INFLUX_DB_PORT";
pub const INFLUX_DB_USER: &str = "INFLUX_DB_USER";
pub const INFLUX_DB_PASSWORD: &str = "INFLUX_DB_PASSWORD";
pub const INFLUX_DB_DATABASE: &str = "INFLUX_DB_DATABASE";
pub const INFLUX_DB_ORG: &str = "INFLUX_DB_ORG";
pub const INFLUX_DB_BUCKET: &str = "INFLUX_DB_BUCKET";
pub const INFLUX_DB_TOKEN: &str = "INFLUX_DB_TOKEN";

const DEFAULT_INFLUX_PORT: u16 = 8086;

impl Config {
    /// Applies environment variables read through `lookup`. Blank values are
    /// treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(PIHOLE_HOSTNAME) {
            self.appliance.url = Some(host);
        }
        if let Some(password) = get(PIHOLE_AUTHENTICATION) {
            self.appliance.password = Some(password);
        }
        if let Some(interval) = get(PIHOLE_INTERVAL) {
            self.collection.interval_secs = Some(parse_var(PIHOLE_INTERVAL, &interval)?);
        }
        if let Some(mode) = get(PIHOLE_MODE) {
            self.collection.mode = CollectionMode::from_str(&mode)
                .map_err(|e| ConfigError::Environment(PIHOLE_MODE.to_string(), e))?;
        }

        if let Some(address) = get(INFLUX_DB_ADDRESS) {
            let port = match get(INFLUX_DB_PORT) {
                Some(port) => parse_var::<u16>(INFLUX_DB_PORT, &port)?,
                None => DEFAULT_INFLUX_PORT,
            };
            let address = address.trim_end_matches('/');
            self.sink.url = Some(if address.starts_with("http") {
                format!("{}:{}", address, port)
            } else {
                format!("http://{}:{}", address, port)
            });
        }
        if let Some(database) = get(INFLUX_DB_DATABASE) {
            self.sink.database = Some(database);
        }
        if let Some(user) = get(INFLUX_DB_USER) {
            self.sink.username = Some(user);
        }
        if let Some(password) = get(INFLUX_DB_PASSWORD) {
            self.sink.password = Some(password);
        }
        if let Some(org) = get(INFLUX_DB_ORG) {
            self.sink.org = Some(org);
        }
        if let Some(bucket) = get(INFLUX_DB_BUCKET) {
            self.sink.bucket = Some(bucket);
        }
        if let Some(token) = get(INFLUX_DB_TOKEN) {
            self.sink.token = Some(token);
        }

        // A database without org/bucket means a 1.x server.
        if self.sink.database.is_some() && self.sink.bucket.is_none() {
            self.sink.api = SinkApi::V1;
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::Environment(key.to_string(), format!("{}: {}", value, e)))
}
