//! 로드 시점 교차 필드 검증
//!
//! 기본값 적용 이후에 실행됩니다. 실패한 미들웨어만 제외되고 나머지는 계속 로드됩니다.

use regex_lite::Regex;
use url::Url;

use super::allow_list::{IpAllowList, IpWhiteList};
use super::auth::{BasicAuth, DigestAuth, ForwardAuth};
use super::error_page::{ErrorPage, StatusRanges};
use super::headers::Headers;
use super::path::AddPrefix;
use super::resilience::CircuitBreaker;
use super::source::{IpStrategy, SourceCriterion};
use super::chain::Plugin;
use super::Middleware;
use crate::error::{ConfigError, Result};
use crate::ip::IpChecker;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for Middleware {
    fn validate(&self) -> Result<()> {
        match self {
            Middleware::AddPrefix(config) => config.validate(),
            Middleware::StripPrefixRegex(config) => check_regexes("regex", &config.regex),
            Middleware::ReplacePathRegex(config) => check_regex("regex", &config.regex),
            Middleware::Chain(config) => {
                if config.middlewares.is_empty() {
                    return Err(ConfigError::EmptyChain);
                }
                Ok(())
            }
            Middleware::IpWhiteList(config) => config.validate(),
            Middleware::IpAllowList(config) => config.validate(),
            Middleware::Headers(config) => config.validate(),
            Middleware::ErrorPage(config) => config.validate(),
            Middleware::RateLimit(config) => check_source_criterion(config.source_criterion.as_ref()),
            Middleware::InFlightReq(config) => check_source_criterion(config.source_criterion.as_ref()),
            Middleware::RedirectRegex(config) => check_regex("regex", &config.regex),
            Middleware::BasicAuth(config) => config.validate(),
            Middleware::DigestAuth(config) => config.validate(),
            Middleware::ForwardAuth(config) => config.validate(),
            Middleware::CircuitBreaker(config) => config.validate(),
            Middleware::Plugin(plugin) => check_plugin(plugin),
            _ => Ok(()),
        }
    }
}

impl Validate for AddPrefix {
    fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix {
                prefix: self.prefix.clone(),
            });
        }
        Ok(())
    }
}

impl Validate for IpAllowList {
    fn validate(&self) -> Result<()> {
        IpChecker::new(&self.source_range, "sourceRange")?;
        check_ip_strategy(self.ip_strategy.as_ref())?;
        check_status_code("rejectStatusCode", i64::from(self.reject_status_code))
    }
}

impl Validate for IpWhiteList {
    fn validate(&self) -> Result<()> {
        IpChecker::new(&self.source_range, "sourceRange")?;
        check_ip_strategy(self.ip_strategy.as_ref())
    }
}

impl Validate for Headers {
    fn validate(&self) -> Result<()> {
        check_regexes(
            "accessControlAllowOriginListRegex",
            &self.access_control_allow_origin_list_regex,
        )
    }
}

impl Validate for ErrorPage {
    fn validate(&self) -> Result<()> {
        self.status_ranges()?;
        for (range, code) in &self.status_rewrites {
            StatusRanges::parse(&[range])?;
            check_status_code("statusRewrites", *code)?;
        }
        Ok(())
    }
}

impl Validate for BasicAuth {
    fn validate(&self) -> Result<()> {
        check_users(&self.users, 2, "name:hashed-password")
    }
}

impl Validate for DigestAuth {
    fn validate(&self) -> Result<()> {
        check_users(&self.users, 3, "name:realm:hashed-password")
    }
}

impl Validate for ForwardAuth {
    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            field: "address",
            value: self.address.clone(),
            reason,
        };

        let url = Url::parse(&self.address).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }

        if !self.auth_response_headers_regex.is_empty() {
            check_regex("authResponseHeadersRegex", &self.auth_response_headers_regex)?;
        }
        Ok(())
    }
}

impl Validate for CircuitBreaker {
    fn validate(&self) -> Result<()> {
        match self.response_code {
            Some(code) => check_status_code("responseCode", i64::from(code)),
            None => Ok(()),
        }
    }
}

fn check_ip_strategy(strategy: Option<&IpStrategy>) -> Result<()> {
    if let Some(strategy) = strategy {
        strategy.get()?;
    }
    Ok(())
}

fn check_source_criterion(criterion: Option<&SourceCriterion>) -> Result<()> {
    match criterion {
        Some(criterion) => criterion.validate(),
        None => Ok(()),
    }
}

fn check_status_code(field: &'static str, code: i64) -> Result<()> {
    if !(100..=599).contains(&code) {
        return Err(ConfigError::InvalidStatusCode { field, code });
    }
    Ok(())
}

fn check_regex(field: &'static str, pattern: &str) -> Result<()> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        field,
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn check_regexes(field: &'static str, patterns: &[String]) -> Result<()> {
    patterns.iter().try_for_each(|pattern| check_regex(field, pattern))
}

/// 중첩된 값까지 null이 없는지 확인합니다. 오류의 `key`는 점으로 이은 경로입니다.
fn check_plugin(plugin: &Plugin) -> Result<()> {
    fn find_null(value: &serde_json::Value, path: String) -> Option<String> {
        match value {
            serde_json::Value::Null => Some(path),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .find_map(|(i, item)| find_null(item, format!("{}.{}", path, i))),
            serde_json::Value::Object(fields) => fields
                .iter()
                .find_map(|(key, item)| find_null(item, format!("{}.{}", path, key))),
            _ => None,
        }
    }

    for (name, conf) in plugin {
        if let Some(key) = conf.iter().find_map(|(key, value)| find_null(value, key.clone())) {
            return Err(ConfigError::NullPluginValue {
                plugin: name.clone(),
                key,
            });
        }
    }
    Ok(())
}

/// `parts`개의 비어 있지 않은 `:` 구분 항목인지 확인합니다. 마지막 항목은 `:`를 포함할 수 있습니다.
fn check_users(users: &[String], parts: usize, expected: &'static str) -> Result<()> {
    for entry in users {
        let fields: Vec<&str> = entry.splitn(parts, ':').collect();
        if fields.len() != parts || fields.iter().any(|f| f.is_empty()) {
            return Err(ConfigError::InvalidUser {
                entry: entry.clone(),
                expected,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{Chain, RateLimit};
    use std::collections::BTreeMap;

    #[test]
    fn test_add_prefix() {
        assert!(AddPrefix { prefix: "/api".to_string() }.validate().is_ok());
        assert_eq!(
            AddPrefix { prefix: "api".to_string() }.validate(),
            Err(ConfigError::InvalidPrefix {
                prefix: "api".to_string()
            })
        );
        assert!(AddPrefix::default().validate().is_err());
    }

    #[test]
    fn test_error_page_status() {
        let page = ErrorPage {
            status: vec!["500-599".to_string(), "404,418".to_string()],
            ..Default::default()
        };
        assert!(page.validate().is_ok());

        let page = ErrorPage {
            status: vec!["5xx".to_string()],
            ..Default::default()
        };
        assert!(matches!(page.validate(), Err(ConfigError::InvalidStatus { .. })));
    }

    #[test]
    fn test_error_page_status_rewrites() {
        let mut rewrites = BTreeMap::new();
        rewrites.insert("410-418".to_string(), 404);
        let page = ErrorPage {
            status_rewrites: rewrites,
            ..Default::default()
        };
        assert!(page.validate().is_ok());

        let mut rewrites = BTreeMap::new();
        rewrites.insert("418".to_string(), 42);
        let page = ErrorPage {
            status_rewrites: rewrites,
            ..Default::default()
        };
        assert_eq!(
            page.validate(),
            Err(ConfigError::InvalidStatusCode {
                field: "statusRewrites",
                code: 42
            })
        );
    }

    #[test]
    fn test_allow_list_source_range() {
        let list = IpAllowList {
            source_range: vec!["10.0.0.0/8".to_string(), "192.168.1.7".to_string()],
            reject_status_code: 403,
            ..Default::default()
        };
        assert!(list.validate().is_ok());

        let list = IpAllowList {
            source_range: vec!["10.0.0.0/33".to_string()],
            reject_status_code: 403,
            ..Default::default()
        };
        assert!(matches!(list.validate(), Err(ConfigError::InvalidIpOrCidr { .. })));

        let list = IpAllowList {
            reject_status_code: 403,
            ..Default::default()
        };
        assert_eq!(
            list.validate(),
            Err(ConfigError::EmptyIpList { field: "sourceRange" })
        );
    }

    #[test]
    fn test_allow_list_ipv6_subnet() {
        let list = IpAllowList {
            source_range: vec!["::1".to_string()],
            ip_strategy: Some(IpStrategy {
                ipv6_subnet: Some(129),
                ..Default::default()
            }),
            reject_status_code: 403,
        };
        assert_eq!(list.validate(), Err(ConfigError::InvalidIpv6Subnet { value: 129 }));
    }

    #[test]
    fn test_ambiguous_source_criterion() {
        let middleware = Middleware::RateLimit(RateLimit {
            source_criterion: Some(SourceCriterion {
                request_header_name: "X-Src".to_string(),
                request_host: true,
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(
            middleware.validate(),
            Err(ConfigError::AmbiguousSourceCriterion {
                fields: vec!["requestHeaderName", "requestHost"]
            })
        );
    }

    #[test]
    fn test_forward_auth_address() {
        let auth = ForwardAuth {
            address: "https://auth.example.com/verify".to_string(),
            ..Default::default()
        };
        assert!(auth.validate().is_ok());

        let auth = ForwardAuth {
            address: "ftp://auth.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(auth.validate(), Err(ConfigError::InvalidUrl { .. })));

        let auth = ForwardAuth::default();
        assert!(matches!(auth.validate(), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_regex_fields() {
        let auth = ForwardAuth {
            address: "http://auth".to_string(),
            auth_response_headers_regex: "^X-(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            auth.validate(),
            Err(ConfigError::InvalidRegex {
                field: "authResponseHeadersRegex",
                ..
            })
        ));

        let headers = Headers {
            access_control_allow_origin_list_regex: vec![r"^https://.*\.example\.com$".to_string()],
            ..Default::default()
        };
        assert!(headers.validate().is_ok());
    }

    #[test]
    fn test_users() {
        let auth = BasicAuth {
            users: vec!["test:$apr1$H6uskkkW$IgXLP6ewTrSuBkTrqE8wj/".to_string()],
            ..Default::default()
        };
        assert!(auth.validate().is_ok());

        let auth = BasicAuth {
            users: vec!["test".to_string()],
            ..Default::default()
        };
        assert!(matches!(auth.validate(), Err(ConfigError::InvalidUser { .. })));

        let auth = DigestAuth {
            users: vec!["test:proxy:a2688e031edb4be6a3797f3882655c05".to_string()],
            ..Default::default()
        };
        assert!(auth.validate().is_ok());

        let auth = DigestAuth {
            users: vec!["test:a2688e031edb4be6a3797f3882655c05".to_string()],
            ..Default::default()
        };
        assert!(matches!(auth.validate(), Err(ConfigError::InvalidUser { .. })));
    }

    #[test]
    fn test_empty_chain() {
        assert_eq!(
            Middleware::Chain(Chain::default()).validate(),
            Err(ConfigError::EmptyChain)
        );
    }

    #[test]
    fn test_plugin_null_values() {
        let mut conf = crate::middleware::PluginConf::new();
        conf.insert("answer".to_string(), serde_json::json!(42));
        conf.insert("nested".to_string(), serde_json::json!({"tags": ["a", null]}));
        let mut plugin = Plugin::new();
        plugin.insert("demo".to_string(), conf.clone());

        assert_eq!(
            Middleware::Plugin(plugin).validate(),
            Err(ConfigError::NullPluginValue {
                plugin: "demo".to_string(),
                key: "nested.tags.1".to_string()
            })
        );

        conf.insert("nested".to_string(), serde_json::json!({"tags": ["a", "b"]}));
        let mut plugin = Plugin::new();
        plugin.insert("demo".to_string(), conf);
        assert!(Middleware::Plugin(plugin).validate().is_ok());
    }

    #[test]
    fn test_circuit_breaker_response_code() {
        let breaker = CircuitBreaker {
            response_code: Some(700),
            ..Default::default()
        };
        assert_eq!(
            breaker.validate(),
            Err(ConfigError::InvalidStatusCode {
                field: "responseCode",
                code: 700
            })
        );
    }
}
