//! Configuration for the identity service.
//!
//! Everything comes from environment variables, with a `.env` file loaded
//! in development builds.

use anyhow::{Context, Result};
use std::env;

use crate::models::Language;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    pub locale: LocaleSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            server: ServerSettings::from_env()?,
            jwt: JwtSettings::from_env(),
            locale: LocaleSettings::from_env(),
        })
    }
}

/// HTTP server bind settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

/// Signing key locations.
///
/// The bundled development keypair is the default; production points both
/// paths at mounted key files.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub private_key_path: String,
    pub public_key_path: String,
}

impl JwtSettings {
    fn from_env() -> Self {
        Self {
            private_key_path: env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "keys/identity_dev_private.pem".to_string()),
            public_key_path: env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "keys/identity_dev_public.pem".to_string()),
        }
    }
}

/// Process-wide localisation defaults
#[derive(Debug, Clone)]
pub struct LocaleSettings {
    pub default_language: Language,
}

impl LocaleSettings {
    fn from_env() -> Self {
        let default_language = env::var("DEFAULT_LANGUAGE")
            .ok()
            .and_then(|tag| Language::from_tag(&tag))
            .unwrap_or(Language::DEFAULT);

        Self { default_language }
    }
}
