//! 동적 미들웨어 설정 카탈로그
//!
//! 미들웨어 하나는 아래 타입 중 정확히 하나를 가집니다. 문서에서는
//! [`RawMiddleware`] 형태로 읽고 쓰며, 로드 시점에 [`Middleware`]로 변환한 뒤
//! 마이그레이션, 기본값 적용, 검증을 거칩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub mod allow_list;
pub mod auth;
pub mod chain;
pub mod content;
pub mod defaults;
pub mod error_page;
pub mod headers;
pub mod migrate;
pub mod path;
pub mod rate_limit;
pub mod raw;
pub mod redirect;
pub mod resilience;
pub mod source;
pub mod tls;
pub mod validate;

pub use allow_list::{IpAllowList, IpWhiteList, DEFAULT_REJECT_STATUS_CODE};
pub use auth::{BasicAuth, DigestAuth, ForwardAuth};
pub use chain::{Chain, Plugin, PluginConf};
pub use content::{Compress, ContentType, GrpcWeb};
pub use defaults::SetDefaults;
pub use error_page::{ErrorPage, StatusRanges};
pub use headers::{HeaderModifier, Headers};
pub use migrate::Migrate;
pub use path::{AddPrefix, ReplacePath, ReplacePathRegex, StripPrefix, StripPrefixRegex};
pub use rate_limit::{InFlightReq, RateLimit, Redis};
pub use raw::RawMiddleware;
pub use redirect::{RedirectRegex, RedirectScheme, RequestRedirect, UrlRewrite};
pub use resilience::{Buffering, CircuitBreaker, Retry};
pub use source::{IpStrategy, SourceCriterion};
pub use tls::{
    ClientTls, PassTlsClientCert, TlsClientCertificateInfo, TlsClientCertificateIssuerDnInfo,
    TlsClientCertificateSubjectDnInfo,
};
pub use validate::Validate;

/// 타입 목록 하나로 enum, 종류, wire 변환을 함께 생성합니다.
macro_rules! middleware_catalog {
    ($( $(#[$meta:meta])* $variant:ident($config:ty) => $field:ident, $wire:literal; )*) => {
        /// 설정이 채워진 미들웨어 타입 하나
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "RawMiddleware", into = "RawMiddleware")]
        pub enum Middleware {
            $( $(#[$meta])* $variant($config), )*
            /// 플러그인 이름별 설정
            Plugin(Plugin),
        }

        /// 미들웨어 타입 식별자
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MiddlewareKind {
            $( $variant, )*
            Plugin,
        }

        impl MiddlewareKind {
            pub const ALL: &'static [MiddlewareKind] = &[$( MiddlewareKind::$variant, )* MiddlewareKind::Plugin];

            /// 설정 문서에서 사용하는 키
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )*
                    Self::Plugin => "plugin",
                }
            }
        }

        impl Middleware {
            pub fn kind(&self) -> MiddlewareKind {
                match self {
                    $( Self::$variant(_) => MiddlewareKind::$variant, )*
                    Self::Plugin(_) => MiddlewareKind::Plugin,
                }
            }
        }

        impl TryFrom<RawMiddleware> for Middleware {
            type Error = ConfigError;

            fn try_from(raw: RawMiddleware) -> Result<Self> {
                let mut found = Vec::new();
                $(
                    if let Some(config) = raw.$field {
                        found.push(Middleware::$variant(config));
                    }
                )*
                if !raw.plugin.is_empty() {
                    found.push(Middleware::Plugin(raw.plugin));
                }

                match found.len() {
                    0 => Err(ConfigError::NoVariant),
                    1 => found.pop().ok_or(ConfigError::NoVariant),
                    _ => Err(ConfigError::MultipleVariants {
                        kinds: found.iter().map(|m| m.kind().as_str()).collect(),
                    }),
                }
            }
        }

        impl From<Middleware> for RawMiddleware {
            fn from(middleware: Middleware) -> Self {
                // deprecated 키는 쓰지 않습니다
                let middleware = match middleware {
                    Middleware::IpWhiteList(legacy) => Middleware::IpAllowList(IpAllowList::from(legacy)),
                    other => other,
                };

                let mut raw = RawMiddleware::default();
                match middleware {
                    $( Middleware::$variant(config) => raw.$field = Some(config), )*
                    Middleware::Plugin(plugin) => raw.plugin = plugin,
                }
                raw
            }
        }
    };
}

middleware_catalog! {
    AddPrefix(AddPrefix) => add_prefix, "addPrefix";
    StripPrefix(StripPrefix) => strip_prefix, "stripPrefix";
    StripPrefixRegex(StripPrefixRegex) => strip_prefix_regex, "stripPrefixRegex";
    ReplacePath(ReplacePath) => replace_path, "replacePath";
    ReplacePathRegex(ReplacePathRegex) => replace_path_regex, "replacePathRegex";
    Chain(Chain) => chain, "chain";
    /// Deprecated: 로드 시 [`IpAllowList`]로 변환됩니다.
    IpWhiteList(IpWhiteList) => ip_white_list, "ipWhiteList";
    IpAllowList(IpAllowList) => ip_allow_list, "ipAllowList";
    Headers(Headers) => headers, "headers";
    ErrorPage(ErrorPage) => error_page, "errors";
    RateLimit(RateLimit) => rate_limit, "rateLimit";
    RedirectRegex(RedirectRegex) => redirect_regex, "redirectRegex";
    RedirectScheme(RedirectScheme) => redirect_scheme, "redirectScheme";
    BasicAuth(BasicAuth) => basic_auth, "basicAuth";
    DigestAuth(DigestAuth) => digest_auth, "digestAuth";
    ForwardAuth(ForwardAuth) => forward_auth, "forwardAuth";
    InFlightReq(InFlightReq) => in_flight_req, "inFlightReq";
    Buffering(Buffering) => buffering, "buffering";
    CircuitBreaker(CircuitBreaker) => circuit_breaker, "circuitBreaker";
    Compress(Compress) => compress, "compress";
    PassTlsClientCert(PassTlsClientCert) => pass_tls_client_cert, "passTLSClientCert";
    Retry(Retry) => retry, "retry";
    ContentType(ContentType) => content_type, "contentType";
    GrpcWeb(GrpcWeb) => grpc_web, "grpcWeb";
    RequestHeaderModifier(HeaderModifier) => request_header_modifier, "requestHeaderModifier";
    ResponseHeaderModifier(HeaderModifier) => response_header_modifier, "responseHeaderModifier";
    RequestRedirect(RequestRedirect) => request_redirect, "requestRedirect";
    UrlRewrite(UrlRewrite) => url_rewrite, "URLRewrite";
}

impl MiddlewareKind {
    /// 입력으로만 허용되고 새 문서에는 쓰지 않는 타입
    pub fn is_deprecated(self) -> bool {
        matches!(self, Self::IpWhiteList)
    }

    /// Gateway API 필터로만 만들어지는 타입
    pub fn is_gateway_only(self) -> bool {
        matches!(
            self,
            Self::RequestHeaderModifier
                | Self::ResponseHeaderModifier
                | Self::RequestRedirect
                | Self::UrlRewrite
        )
    }
}

impl fmt::Display for MiddlewareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Middleware {
    /// 프로바이더가 넘긴 설정을 체인 컴파일러에 넘길 수 있는 형태로 만듭니다.
    ///
    /// deprecated 설정 변환, 기본값 적용, 검증 순서로 진행합니다.
    pub fn prepare(self, name: &str) -> Result<Self> {
        let mut middleware = self.migrate(name);
        middleware.set_defaults();
        middleware.validate()?;
        Ok(middleware)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_variant_conversion() {
        let raw = RawMiddleware {
            add_prefix: Some(AddPrefix { prefix: "/api".to_string() }),
            ..Default::default()
        };

        let middleware = Middleware::try_from(raw.clone()).unwrap();
        assert_eq!(middleware.kind(), MiddlewareKind::AddPrefix);
        assert_eq!(RawMiddleware::from(middleware), raw);
    }

    #[test]
    fn test_white_list_is_written_as_allow_list() {
        let legacy = IpWhiteList {
            source_range: vec!["1.2.3.4".to_string()],
            ip_strategy: None,
        };

        let raw = RawMiddleware::from(Middleware::IpWhiteList(legacy));
        assert!(raw.ip_white_list.is_none());
        assert_eq!(
            raw.ip_allow_list,
            Some(IpAllowList {
                source_range: vec!["1.2.3.4".to_string()],
                ip_strategy: None,
                reject_status_code: DEFAULT_REJECT_STATUS_CODE,
            })
        );
    }

    #[test]
    fn test_no_variant() {
        assert_eq!(
            Middleware::try_from(RawMiddleware::default()),
            Err(ConfigError::NoVariant)
        );
    }

    #[test]
    fn test_multiple_variants() {
        let raw = RawMiddleware {
            add_prefix: Some(AddPrefix::default()),
            compress: Some(Compress::default()),
            ..Default::default()
        };

        assert_eq!(
            Middleware::try_from(raw),
            Err(ConfigError::MultipleVariants {
                kinds: vec!["addPrefix", "compress"]
            })
        );
    }

    #[test]
    fn test_empty_plugin_is_absent() {
        let raw = RawMiddleware {
            plugin: Plugin::new(),
            ..Default::default()
        };
        assert_eq!(Middleware::try_from(raw), Err(ConfigError::NoVariant));

        let mut plugin = Plugin::new();
        plugin.insert("demo".to_string(), PluginConf::new());
        let raw = RawMiddleware {
            plugin,
            ..Default::default()
        };
        assert_eq!(Middleware::try_from(raw).unwrap().kind(), MiddlewareKind::Plugin);
    }

    #[test]
    fn test_empty_table_is_populated() {
        let middleware: Middleware = serde_json::from_str(r#"{"compress": {}}"#).unwrap();
        assert_eq!(middleware, Middleware::Compress(Compress::default()));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result: std::result::Result<Middleware, _> =
            serde_json::from_str(r#"{"addPrefixx": {"prefix": "/a"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_names_are_unique() {
        let mut names: Vec<_> = MiddlewareKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MiddlewareKind::ALL.len());
        assert_eq!(MiddlewareKind::ErrorPage.to_string(), "errors");
        assert_eq!(MiddlewareKind::UrlRewrite.to_string(), "URLRewrite");
        assert!(MiddlewareKind::IpWhiteList.is_deprecated());
        assert!(!MiddlewareKind::IpAllowList.is_deprecated());
        assert!(MiddlewareKind::RequestRedirect.is_gateway_only());
    }

    #[test]
    fn test_prepare_twice_is_stable() {
        let middlewares = vec![
            Middleware::IpWhiteList(IpWhiteList {
                source_range: vec!["10.0.0.0/8".to_string()],
                ip_strategy: None,
            }),
            Middleware::Compress(Compress::default()),
            Middleware::RateLimit(RateLimit {
                average: 10,
                redis: Some(Redis::default()),
                ..Default::default()
            }),
            Middleware::ForwardAuth(ForwardAuth {
                address: "http://auth:8080".to_string(),
                ..Default::default()
            }),
        ];

        for middleware in middlewares {
            let once = middleware.prepare("m").unwrap();
            let twice = once.clone().prepare("m").unwrap();
            assert_eq!(twice, once);
        }
    }
}
