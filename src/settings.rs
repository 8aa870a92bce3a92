use {
    crate::domain::error::AuditError,
    sqlx::{PgPool, postgres::PgPoolOptions},
    std::{env, str::FromStr, time::Duration},
};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

/// Connection settings for the Postgres audit store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl StoreSettings {
    /// Reads `DATABASE_URL`, `AUDIT_MAX_CONNECTIONS` and
    /// `AUDIT_ACQUIRE_TIMEOUT_SECS`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, AuditError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AuditError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AuditError::InvalidConfiguration("DATABASE_URL must be set".into()))?;

        let max_connections =
            parse_or("AUDIT_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let acquire_timeout_secs = parse_or(
            "AUDIT_ACQUIRE_TIMEOUT_SECS",
            &lookup,
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }

    pub async fn connect(&self) -> Result<PgPool, AuditError> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.database_url)
            .await?;
        tracing::info!(max_connections = self.max_connections, "audit store connected");
        Ok(pool)
    }
}

fn parse_or<T: FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, AuditError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AuditError::InvalidConfiguration(format!("{key} is not a valid number: {raw}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashMap};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let settings = StoreSettings::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).unwrap();
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(3));
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = StoreSettings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("AUDIT_MAX_CONNECTIONS", "20"),
            ("AUDIT_ACQUIRE_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(settings.max_connections, 20);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_url_is_invalid() {
        let err = StoreSettings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AuditError::InvalidConfiguration(_)));
    }

    #[test]
    fn garbage_number_is_invalid() {
        let err = StoreSettings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("AUDIT_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuditError::InvalidConfiguration(_)));
    }
}
