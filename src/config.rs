use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub request_timeout_secs: u64,
    pub seed_users: Vec<SeedUser>,
}

/// A user registered at startup, as `subject:consent` in `SEED_USERS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub registry_id: String,
    pub consent_given: bool,
}

/// Parses `alice:true,bob:false`. A bare subject consents; malformed entries are skipped.
pub fn parse_seed_users(raw: &str) -> Vec<SeedUser> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let (subject, consent) = match entry.rsplit_once(':') {
                Some((subject, flag)) => (subject.trim(), flag.trim().parse().ok()?),
                None => (entry, true),
            };
            (!subject.is_empty()).then(|| SeedUser {
                registry_id: subject.to_string(),
                consent_given: consent,
            })
        })
        .collect()
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("seed_users", &self.seed_users.len())
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            // Must match the secret the identity registry signs tokens with
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            seed_users: env::var("SEED_USERS")
                .map(|raw| parse_seed_users(&raw))
                .unwrap_or_default(),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            port: 3000,
            log_level: "info".to_string(),
            jwt_secret: "super-secret".to_string(),
            request_timeout_secs: 30,
            seed_users: Vec::new(),
        };
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_parse_seed_users() {
        let seeds = parse_seed_users(" alice:true, bob:false ,carol,,dave:maybe,:true");
        assert_eq!(
            seeds,
            vec![
                SeedUser { registry_id: "alice".to_string(), consent_given: true },
                SeedUser { registry_id: "bob".to_string(), consent_given: false },
                SeedUser { registry_id: "carol".to_string(), consent_given: true },
            ]
        );
    }
}
