use std::{env::var, str::FromStr, sync::Arc};

use dotenv::dotenv;
use eyre::{eyre, Context, Error};

const DEFAULT_DB: &str = "transaction";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_YEAR: i32 = 2023;
const DEFAULT_DATASET_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Clone, Debug)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone, Debug)]
pub struct EnvInner {
    mongo_url: String,
    mongo_db: String,
    host: String,
    port: u16,
    dataset_url: String,
    year: i32,
}

impl Env {
    pub fn mongo_url(&self) -> &str {
        &self.0.mongo_url
    }

    pub fn mongo_db(&self) -> &str {
        &self.0.mongo_db
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }

    pub fn dataset_url(&self) -> &str {
        &self.0.dataset_url
    }

    /// The single year every month selector refers to.
    pub fn year(&self) -> i32 {
        self.0.year
    }

    /// Reads the process environment. Call [`load_dotenv`] first to pick up
    /// a `.env` file.
    pub fn load() -> Result<Env, Error> {
        Env::from_lookup(|key| var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Env, Error> {
        let mongo_url = lookup("MONGO_URL").ok_or_else(|| eyre!("MONGO_URL is not set"))?;
        let year = parse_or(&lookup, "DASHBOARD_YEAR", DEFAULT_YEAR)?;
        if !(1..=9999).contains(&year) {
            return Err(eyre!("DASHBOARD_YEAR is out of range: {}", year));
        }

        Ok(Env(Arc::new(EnvInner {
            mongo_url,
            mongo_db: lookup("MONGO_DB").unwrap_or_else(|| DEFAULT_DB.to_owned()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            dataset_url: lookup("DATASET_URL").unwrap_or_else(|| DEFAULT_DATASET_URL.to_owned()),
            year,
        })))
    }
}

/// Loads `.env` into the process environment. The failure is returned
/// rather than logged since this runs before the logger is configured.
pub fn load_dotenv() -> Result<(), Error> {
    dotenv_loaded(dotenv())
}

fn dotenv_loaded<T>(result: dotenv::Result<T>) -> Result<(), Error> {
    result.map(drop).context("Failed to load .env file")
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} is not valid: {:?}", key, value)),
        None => Ok(default),
    }
}
