use tracing::warn;

use super::allow_list::IpAllowList;
use super::headers::Headers;
use super::tls::ClientTls;
use super::Middleware;

/// deprecated 설정을 현재 형태로 바꾸는 단방향 변환
pub trait Migrate {
    fn migrate(self, name: &str) -> Self;
}

impl Migrate for Middleware {
    fn migrate(self, name: &str) -> Self {
        match self {
            Middleware::IpWhiteList(legacy) => {
                warn!(middleware = %name, "ipWhiteList는 deprecated입니다. ipAllowList로 변환합니다");
                Middleware::IpAllowList(IpAllowList::from(legacy))
            }
            Middleware::Headers(headers) => Middleware::Headers(headers.migrate(name)),
            Middleware::StripPrefix(config) => {
                if config.force_slash.is_some() {
                    warn!(middleware = %name, field = "forceSlash", "deprecated 필드는 무시됩니다");
                }
                Middleware::StripPrefix(config)
            }
            Middleware::ContentType(config) => {
                if config.auto_detect.is_some() {
                    warn!(middleware = %name, field = "autoDetect", "deprecated 필드는 무시됩니다");
                }
                Middleware::ContentType(config)
            }
            Middleware::ForwardAuth(config) => {
                warn_ca_optional(name, config.tls.as_ref());
                Middleware::ForwardAuth(config)
            }
            Middleware::RateLimit(config) => {
                warn_ca_optional(name, config.redis.as_ref().and_then(|r| r.tls.as_ref()));
                Middleware::RateLimit(config)
            }
            other => other,
        }
    }
}

impl Migrate for Headers {
    /// `featurePolicy`는 `permissionsPolicy`가 비어 있을 때만 옮겨집니다.
    fn migrate(mut self, name: &str) -> Self {
        for field in self.deprecated_fields() {
            warn!(middleware = %name, field, "deprecated headers 필드 사용");
        }

        if self.permissions_policy.is_empty() {
            if let Some(policy) = self.feature_policy.take() {
                self.permissions_policy = policy;
            }
        }
        self
    }
}

fn warn_ca_optional(name: &str, tls: Option<&ClientTls>) {
    if tls.is_some_and(|tls| tls.ca_optional.is_some()) {
        warn!(middleware = %name, field = "tls.caOptional", "deprecated 필드는 무시됩니다");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{IpStrategy, IpWhiteList};

    #[test]
    fn test_white_list_becomes_allow_list() {
        let legacy = Middleware::IpWhiteList(IpWhiteList {
            source_range: vec!["10.0.0.0/8".to_string()],
            ip_strategy: Some(IpStrategy {
                depth: 1,
                ..Default::default()
            }),
        });

        match legacy.migrate("legacy") {
            Middleware::IpAllowList(list) => {
                assert_eq!(list.source_range, vec!["10.0.0.0/8"]);
                assert_eq!(list.ip_strategy.map(|s| s.depth), Some(1));
                assert_eq!(list.reject_status_code, 403);
            }
            other => panic!("unexpected middleware: {:?}", other),
        }
    }

    #[test]
    fn test_feature_policy_moves_when_permissions_empty() {
        let headers = Headers {
            feature_policy: Some("camera 'none'".to_string()),
            ..Default::default()
        };

        let headers = headers.migrate("h");
        assert_eq!(headers.permissions_policy, "camera 'none'");
        assert!(headers.feature_policy.is_none());
    }

    #[test]
    fn test_feature_policy_does_not_override_permissions() {
        let headers = Headers {
            feature_policy: Some("camera 'none'".to_string()),
            permissions_policy: "camera=()".to_string(),
            ..Default::default()
        };

        let headers = headers.migrate("h");
        assert_eq!(headers.permissions_policy, "camera=()");
    }
}
