use std::path::PathBuf;

/// 미들웨어 하나를 로드할 때 발생하는 오류
///
/// 모든 오류는 입력 문서만으로 결정되므로 재시도해도 결과가 같습니다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// 설정된 미들웨어 타입이 하나도 없음
    #[error("middleware has no type configured")]
    NoVariant,

    /// 둘 이상의 미들웨어 타입이 설정됨
    #[error("middleware has more than one type configured: {}", kinds.join(", "))]
    MultipleVariants { kinds: Vec<&'static str> },

    /// 미들웨어 항목 역직렬화 실패
    #[error("cannot decode middleware: {reason}")]
    Decode { reason: String },

    #[error("invalid IPv6 subnet {value} value, should be greater than 0 and lower or equal to 128")]
    InvalidIpv6Subnet { value: i64 },

    /// sourceCriterion에 둘 이상의 기준이 설정됨
    #[error("ambiguous source criterion: {} are mutually exclusive", fields.join(" and "))]
    AmbiguousSourceCriterion { fields: Vec<&'static str> },

    #[error("invalid IP or CIDR {value:?}: {reason}")]
    InvalidIpOrCidr { value: String, reason: String },

    #[error("{field} must contain at least one IP or CIDR")]
    EmptyIpList { field: &'static str },

    #[error("invalid header name {name:?}")]
    InvalidHeaderName { name: String },

    #[error("prefix {prefix:?} must start with a '/'")]
    InvalidPrefix { prefix: String },

    #[error("invalid status {entry:?}: {reason}")]
    InvalidStatus { entry: String, reason: String },

    #[error("{field}: {code} is not a valid HTTP status code")]
    InvalidStatusCode { field: &'static str, code: i64 },

    #[error("{field}: invalid regex {pattern:?}: {reason}")]
    InvalidRegex {
        field: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("{field}: invalid URL {value:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// users 항목 형식 오류
    #[error("invalid user entry {entry:?}, expected {expected}")]
    InvalidUser { entry: String, expected: &'static str },

    #[error("chain must reference at least one middleware")]
    EmptyChain,

    /// TOML로 쓸 수 없는 null 값
    #[error("plugin {plugin:?}: {key:?} must not be null")]
    NullPluginValue { plugin: String, key: String },
}

/// 설정 문서 전체를 읽을 때 발생하는 오류
///
/// 문서 자체를 해석할 수 없는 경우에만 사용됩니다. 개별 미들웨어의 오류는
/// [`ConfigError`]로 보고되고 나머지 미들웨어 로드는 계속됩니다.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("설정 파일 {path} 읽기 실패: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("지원하지 않는 설정 파일 확장자: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("TOML 파싱 오류: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML 직렬화 오류: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON 파싱 오류: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML 파싱 오류: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
