use anyhow::{Context, Result};

use super::config_model::{Auth, BackendServer, Database, DotEnvyConfig};

const DEFAULT_PRIVILEGED_ROLE: &str = "SUPERADMIN";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    from_lookup(|key| std::env::var(key).ok())
}

pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let required = |key: &str| lookup(key).with_context(|| format!("{key} is invalid"));

    let backend_server = BackendServer {
        port: required("SERVER_PORT")?
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().context("DATABASE_MAX_CONNECTIONS is invalid")?,
            None => DEFAULT_MAX_CONNECTIONS,
        },
    };

    let auth = Auth {
        jwt_secret: required("JWT_SECRET")?,
        privileged_role: lookup("PRIVILEGED_ROLE")
            .filter(|role| !role.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRIVILEGED_ROLE.to_string()),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const BASE: [(&str, &str); 5] = [
        ("SERVER_PORT", "8080"),
        ("SERVER_BODY_LIMIT", "10"),
        ("SERVER_TIMEOUT", "30"),
        ("DATABASE_URL", "postgres://localhost:5432/db"),
        ("JWT_SECRET", "supersecretjwtsecretforunittesting123"),
    ];

    #[test]
    fn loads_required_values_and_defaults() {
        let config = from_lookup(lookup_from(&BASE)).unwrap();

        assert_eq!(config.backend_server.port, 8080);
        assert_eq!(config.backend_server.body_limit, 10);
        assert_eq!(config.backend_server.timeout, 30);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.privileged_role, "SUPERADMIN");
    }

    #[test]
    fn privileged_role_and_pool_size_can_be_overridden() {
        let mut vars = BASE.to_vec();
        vars.push(("PRIVILEGED_ROLE", "OWNER"));
        vars.push(("DATABASE_MAX_CONNECTIONS", "4"));

        let config = from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.auth.privileged_role, "OWNER");
        assert_eq!(config.database.max_connections, 4);
    }

    #[test]
    fn missing_or_malformed_values_fail() {
        let without_secret: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "JWT_SECRET")
            .collect();
        let err = from_lookup(lookup_from(&without_secret)).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let mut bad_port = BASE.to_vec();
        bad_port[0] = ("SERVER_PORT", "eighty");
        assert!(from_lookup(lookup_from(&bad_port)).is_err());
    }
}
