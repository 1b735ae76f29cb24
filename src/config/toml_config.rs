use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{
    validate_json_pointer, validate_non_empty_string, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_IMAGE_HOST_ENDPOINT: &str = "https://api.imgbb.com/1/upload";
pub const DEFAULT_UPLOAD_FIELD: &str = "image";
pub const DEFAULT_LINK_POINTER: &str = "/data/url";
pub const REMOVE_BG_API_KEY_ENV: &str = "REMOVE_BG_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub firestore: FirestoreConfig,
    #[serde(default)]
    pub image_host: ImageHostConfig,
    #[serde(default)]
    pub background_removal: BackgroundRemovalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageHostConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub field_name: Option<String>,
    pub link_pointer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackgroundRemovalConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub size: Option<String>,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IMAGE_HOST_ENDPOINT.to_string(),
            api_key: None,
            field_name: None,
            link_pointer: None,
        }
    }
}

impl FirestoreConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_FIRESTORE_BASE_URL)
    }

    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    pub fn api_key(&self) -> Option<&str> {
        resolved_secret(self.api_key.as_deref())
    }

    pub fn auth_token(&self) -> Option<&str> {
        resolved_secret(self.auth_token.as_deref())
    }
}

impl ImageHostConfig {
    pub fn api_key(&self) -> Option<&str> {
        resolved_secret(self.api_key.as_deref())
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_deref().unwrap_or(DEFAULT_UPLOAD_FIELD)
    }

    pub fn link_pointer(&self) -> &str {
        self.link_pointer.as_deref().unwrap_or(DEFAULT_LINK_POINTER)
    }
}

impl BackgroundRemovalConfig {
    /// 設定檔優先，其次讀取 REMOVE_BG_API_KEY；兩者皆無則停用去背
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::api_key`] with the environment lookup supplied by the caller.
    pub fn api_key_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        resolved_secret(self.api_key.as_deref())
            .map(str::to_string)
            .or_else(|| env(REMOVE_BG_API_KEY_ENV).filter(|key| !key.trim().is_empty()))
    }
}

/// Empty values and placeholders left unsubstituted count as absent.
fn resolved_secret(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !placeholder_regex().is_match(v))
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl AdminConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AdminError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| AdminError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn background_removal_enabled(&self) -> bool {
        self.background_removal.api_key().is_some()
    }
}

/// 替換環境變數 (例如 ${FIREBASE_API_KEY})，未設定者保留原樣
fn substitute_env_vars(content: &str) -> String {
    placeholder_regex()
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

impl Validate for AdminConfig {
    fn validate(&self) -> Result<()> {
        if resolved_secret(Some(&self.firestore.project_id)).is_none() {
            return Err(AdminError::MissingConfigError {
                field: "firestore.project_id".to_string(),
            });
        }
        validate_url("firestore.base_url", self.firestore.base_url())?;
        validate_url("image_host.endpoint", &self.image_host.endpoint)?;
        validate_json_pointer("image_host.link_pointer", self.image_host.link_pointer())?;
        validate_non_empty_string("image_host.field_name", self.image_host.field_name())?;

        if let Some(endpoint) = &self.background_removal.endpoint {
            validate_url("background_removal.endpoint", endpoint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[firestore]
project_id = "metal-works"
"#;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = AdminConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.firestore.base_url(), DEFAULT_FIRESTORE_BASE_URL);
        assert_eq!(config.firestore.database(), "(default)");
        assert_eq!(config.image_host.endpoint, DEFAULT_IMAGE_HOST_ENDPOINT);
        assert_eq!(config.image_host.field_name(), "image");
        assert_eq!(config.image_host.link_pointer(), "/data/url");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SITE_ADMIN_TEST_PROJECT", "from-env");

        let config = AdminConfig::from_toml_str(
            r#"
[firestore]
project_id = "${SITE_ADMIN_TEST_PROJECT}"
api_key = "${SITE_ADMIN_TEST_MISSING_KEY}"
"#,
        )
        .unwrap();

        assert_eq!(config.firestore.project_id, "from-env");
        assert_eq!(
            config.firestore.api_key.as_deref(),
            Some("${SITE_ADMIN_TEST_MISSING_KEY}")
        );
        assert_eq!(config.firestore.api_key(), None);

        std::env::remove_var("SITE_ADMIN_TEST_PROJECT");
    }

    #[test]
    fn test_config_validation() {
        let config = AdminConfig::from_toml_str(
            r#"
[firestore]
project_id = "metal-works"

[image_host]
endpoint = "not-a-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AdminConfig::from_toml_str(
            r#"
[firestore]
project_id = "  "
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(AdminError::MissingConfigError { field }) if field == "firestore.project_id"
        ));

        let config = AdminConfig::from_toml_str(
            r#"
[firestore]
project_id = "${SITE_ADMIN_TEST_UNSET_PROJECT}"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(AdminError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[firestore]
project_id = "file-project"
base_url = "http://localhost:8080/v1"

[background_removal]
api_key = "bg-secret"
size = "preview"
"#,
            )
            .unwrap();

        let config = AdminConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.firestore.project_id, "file-project");
        assert!(config.background_removal_enabled());
        assert_eq!(config.background_removal.size.as_deref(), Some("preview"));
    }

    #[test]
    fn test_background_removal_key_falls_back_to_env() {
        let mut config = BackgroundRemovalConfig::default();
        let env = |name: &str| (name == REMOVE_BG_API_KEY_ENV).then(|| "env-key".to_string());

        assert_eq!(config.api_key_with(env).as_deref(), Some("env-key"));
        assert_eq!(config.api_key_with(|_| Some("  ".to_string())), None);
        assert_eq!(config.api_key_with(|_| None), None);

        config.api_key = Some("file-key".to_string());
        assert_eq!(config.api_key_with(env).as_deref(), Some("file-key"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AdminConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, AdminError::ConfigError { .. }));
    }
}
