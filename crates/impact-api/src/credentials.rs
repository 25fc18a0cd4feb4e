use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const API_KEY_ENV: &str = "MODELON_IMPACT_CLIENT_API_KEY";

/// Credentials to connect to the Impact server
#[derive(Serialize, Debug, Clone)]
pub struct ImpactCredentials {
    #[serde(rename = "secretKey")]
    api_key: String,
}

impl ImpactCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Creates a new instance of `ImpactCredentials` from environment variables.
    ///
    /// An unset or blank variable yields `None`.
    pub fn from_env() -> Option<Self> {
        Self::from_value(&std::env::var(API_KEY_ENV).ok()?)
    }

    /// Reads the key stored in `~/.impact/api.key`, if any.
    pub fn from_key_file() -> Option<Self> {
        Self::read_key_file(&key_file_path()?)
    }

    /// Looks up the key in the environment first, then in the key file.
    pub fn discover() -> Option<Self> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::resolve(env_key.as_deref(), key_file_path().as_deref())
    }

    fn from_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    fn read_key_file(path: &Path) -> Option<Self> {
        Self::from_value(&std::fs::read_to_string(path).ok()?)
    }

    fn resolve(env_key: Option<&str>, key_file: Option<&Path>) -> Option<Self> {
        env_key
            .and_then(Self::from_value)
            .or_else(|| key_file.and_then(Self::read_key_file))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

fn key_file_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".impact").join("api.key"))
}

impl FromStr for ImpactCredentials {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Err("API key cannot be empty".to_string())
        } else {
            Ok(Self::new(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_key() {
        assert!("".parse::<ImpactCredentials>().is_err());
        assert_eq!(
            "abc".parse::<ImpactCredentials>().unwrap().api_key(),
            "abc"
        );
    }

    struct KeyDir(PathBuf);

    impl KeyDir {
        fn with_key(name: &str, contents: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "impact-credentials-{name}-{}",
                std::process::id()
            ));
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("api.key"), contents).unwrap();
            Self(dir)
        }

        fn key_file(&self) -> PathBuf {
            self.0.join("api.key")
        }
    }

    impl Drop for KeyDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn blank_env_key_falls_back_to_key_file() {
        let dir = KeyDir::with_key("blank", "file-key\n");
        let key_file = dir.key_file();

        for env_key in [Some(""), Some("   "), None] {
            let creds = ImpactCredentials::resolve(env_key, Some(key_file.as_path())).unwrap();
            assert_eq!(creds.api_key(), "file-key");
        }
    }

    #[test]
    fn env_key_wins_over_key_file() {
        let dir = KeyDir::with_key("env", "file-key");
        let key_file = dir.key_file();

        let creds = ImpactCredentials::resolve(Some("env-key"), Some(key_file.as_path())).unwrap();
        assert_eq!(creds.api_key(), "env-key");
    }

    #[test]
    fn no_key_anywhere() {
        let dir = KeyDir::with_key("empty", "");
        let key_file = dir.key_file();
        let missing = dir.0.join("missing.key");

        assert!(ImpactCredentials::resolve(Some(""), Some(key_file.as_path())).is_none());
        assert!(ImpactCredentials::resolve(None, Some(missing.as_path())).is_none());
        assert!(ImpactCredentials::resolve(None, None).is_none());
    }

    #[test]
    fn serializes_as_login_body() {
        let body = serde_json::to_value(ImpactCredentials::new("key")).unwrap();
        assert_eq!(body, serde_json::json!({ "secretKey": "key" }));
    }
}
