use crate::{process_env, string_or};

/// Allowed CORS origins.
///
/// `ALLOWED_ORIGINS` is a comma separated list. The single value `*` (the
/// default) allows any origin.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = string_or(&lookup, "ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_default_allows_any_origin() {
        let config = CorsConfig::from_lookup(lookup_from(&[]));
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_origin_list_is_split_and_trimmed() {
        let config = CorsConfig::from_lookup(lookup_from(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:5173, https://sms.example.org,",
        )]));

        assert!(!config.allows_any_origin());
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "https://sms.example.org"]
        );
    }
}
