use std::{env, fs, path::Path};

use serde::Deserialize;
use tracing::debug;

pub mod logging;
mod error;

pub use error::SettingsError;
pub use logging::{LogFormat, LogSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

/// 크레이트 자체 설정
///
/// 동적 미들웨어 설정과 별개로 프로세스 시작 시 한 번 읽습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LogSettings,
}

impl Settings {
    /// `PROXY_CONFIG_FILE`이 있으면 해당 TOML 파일을, 없으면 환경 변수를 읽습니다.
    pub fn load() -> Result<Self> {
        match env::var("PROXY_CONFIG_FILE") {
            Ok(config_path) => Self::from_toml_file(&config_path),
            Err(_) => Self::from_env(),
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "설정 파일 로드");
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            logging: LogSettings::from_env()?,
        })
    }
}

/// 환경 변수를 `T`로 파싱합니다. 변수가 없으면 `default`를 사용합니다.
pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}
