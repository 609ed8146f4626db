use std::env;

#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

#[derive(Clone)]
pub(crate) struct ObservabilityConfig {
    pub(crate) service_context: ServiceContext,
    /// Filter used when `RUST_LOG` is unset.
    pub(crate) default_directive: String,
    pub(crate) log_targets: bool,
}

impl ObservabilityConfig {
    pub(crate) fn from_env(component: &str) -> Self {
        Self::from_lookup(component, |key| env::var(key).ok())
    }

    fn from_lookup(component: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let component = component.trim().to_string();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let service_name = non_empty("SERVICE_NAME").unwrap_or_else(|| component.clone());
        let environment = non_empty("STAGE").unwrap_or_else(|| "unknown".to_string());
        let default_directive = non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_targets = non_empty("LOG_TARGETS")
            .and_then(|raw| parse_bool(&raw))
            .unwrap_or(true);

        Self {
            service_context: ServiceContext {
                service_name,
                environment,
                component,
            },
            default_directive,
            log_targets,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> ObservabilityConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ObservabilityConfig::from_lookup(" backend ", |key| vars.get(key).cloned())
    }

    #[test]
    fn falls_back_to_component_and_info() {
        let config = config_with(&[]);

        assert_eq!(config.service_context.service_name, "backend");
        assert_eq!(config.service_context.component, "backend");
        assert_eq!(config.service_context.environment, "unknown");
        assert_eq!(config.default_directive, "info");
        assert!(config.log_targets);
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let config = config_with(&[
            ("SERVICE_NAME", "plan-requests"),
            ("STAGE", "  "),
            ("LOG_LEVEL", "backend=debug,tower_http=info"),
            ("LOG_TARGETS", "off"),
        ]);

        assert_eq!(config.service_context.service_name, "plan-requests");
        assert_eq!(config.service_context.environment, "unknown");
        assert_eq!(config.default_directive, "backend=debug,tower_http=info");
        assert!(!config.log_targets);
    }
}
