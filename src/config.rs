use std::env;

use actix_web::cookie::Key;

/// Minimum secret length accepted by `actix_web::cookie::Key::from`.
const MIN_SECRET_LEN: usize = 64;

/// Runtime settings read from the environment (and an optional `.env` file).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub domain: String,
    pub templates_dir: String,
    secret: Option<String>,
}

impl ServerConfig {
    /// Read the configuration, falling back to development defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "app.db".to_string()),
            address: lookup("ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            domain: lookup("DOMAIN").unwrap_or_else(|| "localhost".to_string()),
            templates_dir: lookup("TEMPLATES_DIR").unwrap_or_else(|| "templates/**/*".to_string()),
            secret: lookup("SECRET_KEY").filter(|value| !value.is_empty()),
        }
    }

    /// Cookie signing key. A random key is generated when `SECRET_KEY` is
    /// missing or too short, which invalidates sessions on restart.
    pub fn secret_key(&self) -> Key {
        match &self.secret {
            Some(secret) if secret.len() >= MIN_SECRET_LEN => Key::from(secret.as_bytes()),
            Some(_) => {
                log::warn!(
                    "SECRET_KEY is shorter than {MIN_SECRET_LEN} bytes, generating a random key"
                );
                Key::generate()
            }
            None => {
                log::warn!("SECRET_KEY not set, generating a random key");
                Key::generate()
            }
        }
    }
}
