use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 요청/응답 헤더 및 CORS, 보안 헤더 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Headers {
    pub custom_request_headers: BTreeMap<String, String>,
    pub custom_response_headers: BTreeMap<String, String>,

    pub access_control_allow_credentials: bool,
    pub access_control_allow_headers: Vec<String>,
    pub access_control_allow_methods: Vec<String>,
    pub access_control_allow_origin_list: Vec<String>,
    pub access_control_allow_origin_list_regex: Vec<String>,
    pub access_control_expose_headers: Vec<String>,
    pub access_control_max_age: i64,
    pub add_vary_header: bool,

    pub allowed_hosts: Vec<String>,
    pub hosts_proxy_headers: Vec<String>,
    /// HTTPS 요청임을 나타내는 헤더와 값 (예: "X-Forwarded-Proto": "https")
    pub ssl_proxy_headers: BTreeMap<String, String>,
    /// 0이면 Strict-Transport-Security 헤더를 설정하지 않음
    pub sts_seconds: i64,
    pub sts_include_subdomains: bool,
    pub sts_preload: bool,
    #[serde(rename = "forceSTSHeader")]
    pub force_sts_header: bool,
    pub frame_deny: bool,
    pub custom_frame_options_value: String,
    pub content_type_nosniff: bool,
    pub browser_xss_filter: bool,
    #[serde(rename = "customBrowserXSSValue")]
    pub custom_browser_xss_value: String,
    pub content_security_policy: String,
    pub content_security_policy_report_only: String,
    pub public_key: String,
    pub referrer_policy: String,
    pub permissions_policy: String,
    pub is_development: bool,

    // 아래 필드는 deprecated: 읽기만 하고 새 문서에는 쓰지 않음
    #[serde(skip_serializing)]
    pub feature_policy: Option<String>,
    #[serde(skip_serializing)]
    pub ssl_redirect: Option<bool>,
    #[serde(skip_serializing)]
    pub ssl_temporary_redirect: Option<bool>,
    #[serde(skip_serializing)]
    pub ssl_host: Option<String>,
    #[serde(skip_serializing)]
    pub ssl_force_host: Option<bool>,
}

impl Headers {
    pub fn has_custom_headers_defined(&self) -> bool {
        !self.custom_response_headers.is_empty() || !self.custom_request_headers.is_empty()
    }

    pub fn has_cors_headers_defined(&self) -> bool {
        self.access_control_allow_credentials
            || !self.access_control_allow_headers.is_empty()
            || !self.access_control_allow_methods.is_empty()
            || !self.access_control_allow_origin_list.is_empty()
            || !self.access_control_allow_origin_list_regex.is_empty()
            || !self.access_control_expose_headers.is_empty()
            || self.access_control_max_age != 0
            || self.add_vary_header
    }

    /// 보안 헤더 설정 여부. deprecated SSL 필드도 포함합니다.
    pub fn has_secure_headers_defined(&self) -> bool {
        !self.allowed_hosts.is_empty()
            || !self.hosts_proxy_headers.is_empty()
            || self.ssl_redirect == Some(true)
            || self.ssl_temporary_redirect == Some(true)
            || self.ssl_force_host == Some(true)
            || self.ssl_host.as_deref().is_some_and(|host| !host.is_empty())
            || !self.ssl_proxy_headers.is_empty()
            || self.sts_seconds != 0
            || self.sts_include_subdomains
            || self.sts_preload
            || self.force_sts_header
            || self.frame_deny
            || !self.custom_frame_options_value.is_empty()
            || self.content_type_nosniff
            || self.browser_xss_filter
            || !self.custom_browser_xss_value.is_empty()
            || !self.content_security_policy.is_empty()
            || !self.content_security_policy_report_only.is_empty()
            || !self.public_key.is_empty()
            || !self.referrer_policy.is_empty()
            || self.feature_policy.as_deref().is_some_and(|policy| !policy.is_empty())
            || !self.permissions_policy.is_empty()
            || self.is_development
    }

    /// 설정된 deprecated 필드의 wire 이름 목록
    pub fn deprecated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.feature_policy.is_some() {
            fields.push("featurePolicy");
        }
        if self.ssl_redirect.is_some() {
            fields.push("sslRedirect");
        }
        if self.ssl_temporary_redirect.is_some() {
            fields.push("sslTemporaryRedirect");
        }
        if self.ssl_host.is_some() {
            fields.push("sslHost");
        }
        if self.ssl_force_host.is_some() {
            fields.push("sslForceHost");
        }
        fields
    }
}

/// Gateway API 요청/응답 헤더 수정 필터
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderModifier {
    pub set: BTreeMap<String, String>,
    pub add: BTreeMap<String, String>,
    pub remove: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_groups() {
        let headers = Headers::default();
        assert!(!headers.has_custom_headers_defined());
        assert!(!headers.has_cors_headers_defined());
        assert!(!headers.has_secure_headers_defined());

        let headers = Headers {
            custom_request_headers: BTreeMap::from([("X-Script-Name".to_string(), "test".to_string())]),
            access_control_max_age: 100,
            ..Default::default()
        };
        assert!(headers.has_custom_headers_defined());
        assert!(headers.has_cors_headers_defined());
        assert!(!headers.has_secure_headers_defined());
    }

    #[test]
    fn test_legacy_ssl_fields_count_as_secure() {
        let headers = Headers {
            ssl_redirect: Some(true),
            ..Default::default()
        };
        assert!(headers.has_secure_headers_defined());

        let headers = Headers {
            ssl_redirect: Some(false),
            ssl_host: Some(String::new()),
            ..Default::default()
        };
        assert!(!headers.has_secure_headers_defined());
        assert_eq!(headers.deprecated_fields(), vec!["sslRedirect", "sslHost"]);
    }

    #[test]
    fn test_deprecated_fields_are_not_serialized() {
        let json = r#"{"frameDeny": true, "sslRedirect": true, "featurePolicy": "vibrate 'none'"}"#;
        let headers: Headers = serde_json::from_str(json).unwrap();
        assert_eq!(headers.ssl_redirect, Some(true));

        let out = serde_json::to_string(&headers).unwrap();
        assert!(out.contains("\"frameDeny\":true"));
        assert!(!out.contains("sslRedirect"));
        assert!(!out.contains("featurePolicy"));
    }
}
