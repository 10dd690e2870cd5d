//! `http.middlewares` 설정 문서 읽기/쓰기
//!
//! TOML, JSON, YAML 모두 같은 camelCase 키를 사용합니다. 문서 전체를 해석할 수
//! 없을 때만 [`DocumentError`]를 반환하고, 미들웨어 단위 오류는
//! [`LoadReport::rejected`]에 모아 나머지 미들웨어는 계속 로드합니다.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, DocumentError};
use crate::middleware::{Middleware, RawMiddleware};

/// 검증을 마친 동적 설정 스냅샷
///
/// 쓰기 전용입니다. 읽을 때는 `from_*_str`이나 [`DynamicConfig::from_file`]을 사용해
/// 미들웨어마다 마이그레이션, 기본값 적용, 검증을 거칩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DynamicConfig {
    pub http: HttpConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HttpConfiguration {
    pub middlewares: BTreeMap<String, Middleware>,
}

/// 로드 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// 변환, 기본값 적용, 검증을 통과한 미들웨어
    pub middlewares: BTreeMap<String, Middleware>,
    /// 로드하지 못한 미들웨어와 그 이유
    pub rejected: Vec<RejectedMiddleware>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedMiddleware {
    pub name: String,
    pub error: ConfigError,
}

impl LoadReport {
    pub fn into_config(self) -> DynamicConfig {
        DynamicConfig {
            http: HttpConfiguration {
                middlewares: self.middlewares,
            },
        }
    }
}

/// 미들웨어 항목은 포맷별 값으로 남겨 두고 항목 단위로 해석합니다.
#[derive(Deserialize)]
struct Document<V> {
    #[serde(default = "Option::default")]
    http: Option<HttpSection<V>>,
}

#[derive(Deserialize)]
struct HttpSection<V> {
    #[serde(default = "BTreeMap::new")]
    middlewares: BTreeMap<String, V>,
}

impl<V> Document<V> {
    fn into_entries(self) -> BTreeMap<String, V> {
        self.http.map(|http| http.middlewares).unwrap_or_default()
    }
}

impl DynamicConfig {
    pub fn from_toml_str(content: &str) -> Result<LoadReport, DocumentError> {
        let document: Document<toml::Value> = toml::from_str(content)?;
        Ok(load_entries(document.into_entries(), |value| {
            value.try_into::<RawMiddleware>()
        }))
    }

    pub fn from_json_str(content: &str) -> Result<LoadReport, DocumentError> {
        let document: Document<serde_json::Value> = serde_json::from_str(content)?;
        Ok(load_entries(document.into_entries(), serde_json::from_value))
    }

    pub fn from_yaml_str(content: &str) -> Result<LoadReport, DocumentError> {
        let document: Document<serde_yaml::Value> = serde_yaml::from_str(content)?;
        Ok(load_entries(document.into_entries(), serde_yaml::from_value))
    }

    /// 확장자(`toml`, `json`, `yaml`, `yml`)로 포맷을 결정합니다.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LoadReport, DocumentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let load: fn(&str) -> Result<LoadReport, DocumentError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            Some("yaml" | "yml") => Self::from_yaml_str,
            _ => {
                return Err(DocumentError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "설정 파일 로드");
        load(&content)
    }

    /// 로드된 설정은 항상 쓸 수 있습니다. 직접 만든 플러그인 설정에 null이 있으면
    /// [`DocumentError::TomlSerialize`]를 반환합니다.
    pub fn to_toml_string(&self) -> Result<String, DocumentError> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn load_entries<V, E, F>(entries: BTreeMap<String, V>, decode: F) -> LoadReport
where
    E: Display,
    F: Fn(V) -> Result<RawMiddleware, E>,
{
    let mut report = LoadReport::default();

    for (name, value) in entries {
        let loaded = decode(value)
            .map_err(|e| ConfigError::Decode {
                reason: e.to_string(),
            })
            .and_then(Middleware::try_from)
            .and_then(|middleware| middleware.prepare(&name));

        match loaded {
            Ok(middleware) => {
                debug!(middleware = %name, kind = %middleware.kind(), "미들웨어 로드");
                report.middlewares.insert(name, middleware);
            }
            Err(error) => {
                warn!(middleware = %name, %error, "미들웨어를 건너뜁니다");
                report.rejected.push(RejectedMiddleware { name, error });
            }
        }
    }

    info!(
        loaded = report.middlewares.len(),
        rejected = report.rejected.len(),
        "미들웨어 설정 로드 완료"
    );
    report
}
