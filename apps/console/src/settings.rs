use std::{collections::HashMap, fs, path::Path};

use client_core::config::{DEFAULT_API_BASE_URL, DEFAULT_LISTING_DESTINATION};

pub const SETTINGS_FILE: &str = "hemobank.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub listing_destination: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            listing_destination: DEFAULT_LISTING_DESTINATION.into(),
        }
    }
}

/// Defaults, then `hemobank.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url") {
                    settings.api_base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("listing_destination") {
                    settings.listing_destination = v.clone();
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("HEMOBANK_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__LISTING_DESTINATION") {
        settings.listing_destination = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_settings_file(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("hemobank_settings_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = load_settings_from(Path::new("/nonexistent/hemobank.toml"), |_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base_url, "http://127.0.0.1:5000/api");
        assert_eq!(settings.listing_destination, "/donors");
    }

    #[test]
    fn file_values_override_defaults() {
        let path = temp_settings_file(
            "api_base_url = \"https://registry.example.org/api\"\nlisting_destination = \"/public\"\n",
        );

        let settings = load_settings_from(&path, |_| None);

        assert_eq!(settings.api_base_url, "https://registry.example.org/api");
        assert_eq!(settings.listing_destination, "/public");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn environment_overrides_file() {
        let path = temp_settings_file("api_base_url = \"http://from-file/api\"\n");

        let settings = load_settings_from(&path, |key| match key {
            "HEMOBANK_API_URL" => Some("http://from-env/api".to_string()),
            "APP__API_BASE_URL" => Some("http://from-app-env/api".to_string()),
            _ => None,
        });

        assert_eq!(settings.api_base_url, "http://from-app-env/api");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn malformed_file_is_ignored() {
        let path = temp_settings_file("api_base_url = [1, 2");

        let settings = load_settings_from(&path, |_| None);

        assert_eq!(settings, Settings::default());
        fs::remove_file(path).expect("cleanup");
    }
}
