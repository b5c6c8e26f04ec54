//! UI server settings: where the API lives and where to listen.

use student_records::ConfigError;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5173;

#[derive(Clone, Debug)]
pub struct UiConfig {
    pub api_base_url: Url,
    pub host: String,
    pub port: u16,
}

impl UiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let api_base_url = Url::parse(base.trim()).map_err(|_| ConfigError::Invalid {
            key: "API_BASE_URL",
            value: base.clone(),
        })?;
        let port = match lookup("FRONTEND_PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "FRONTEND_PORT",
                value: v.clone(),
            })?,
            None => DEFAULT_PORT,
        };
        Ok(UiConfig {
            api_base_url,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
        })
    }

    /// `<API_BASE_URL>/students`, tolerant of a trailing slash on the base.
    pub fn students_endpoint(&self) -> String {
        students_endpoint(&self.api_base_url)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn students_endpoint(base: &Url) -> String {
    format!("{}/students", base.as_str().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_api() {
        let cfg = UiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.students_endpoint(), "http://localhost:3000/students");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5173");
    }

    #[test]
    fn base_url_with_path_keeps_it() {
        let cfg = UiConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("https://api.example/v1/".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.students_endpoint(), "https://api.example/v1/students");
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = UiConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("not a url".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid API_BASE_URL"));

        let err = UiConfig::from_lookup(|key| match key {
            "FRONTEND_PORT" => Some("99999".into()),
            _ => None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid FRONTEND_PORT: '99999'");
    }
}
