//! 리버스 프록시 동적 미들웨어 설정
//!
//! 프로바이더가 읽은 미들웨어 설정을 타입이 있는 값으로 변환하고, 기본값을
//! 채우고, 교차 필드 검증을 수행합니다. rate limit, in-flight 요청 제한,
//! IP 허용 목록이 사용하는 클라이언트 IP / 출처 해석도 제공합니다.
//!
//! # 예제
//!
//! ```
//! use rproxy_middlewares::document::DynamicConfig;
//! use rproxy_middlewares::middleware::Middleware;
//!
//! let report = DynamicConfig::from_toml_str(r#"
//!     [http.middlewares.api.addPrefix]
//!     prefix = "/api"
//!
//!     [http.middlewares.zip.compress]
//! "#).unwrap();
//!
//! assert!(report.rejected.is_empty());
//! match &report.middlewares["zip"] {
//!     Middleware::Compress(compress) => assert_eq!(compress.encodings, ["gzip", "br", "zstd"]),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # 클라이언트 IP
//!
//! ```
//! use hyper::Request;
//! use rproxy_middlewares::ip::RemoteAddr;
//! use rproxy_middlewares::middleware::IpStrategy;
//!
//! let strategy = IpStrategy {
//!     excluded_ips: vec!["192.168.1.1".to_string()],
//!     ..Default::default()
//! }
//! .get()
//! .unwrap();
//!
//! let req = Request::builder()
//!     .header("X-Forwarded-For", "192.168.1.1, 203.0.113.5")
//!     .extension(RemoteAddr("10.0.0.1:4000".parse().unwrap()))
//!     .body(())
//!     .unwrap();
//!
//! assert_eq!(strategy.extract(&req), Some("203.0.113.5".parse().unwrap()));
//! ```

pub mod document;
pub mod error;
pub mod ip;
pub mod logging;
pub mod middleware;
pub mod settings;
pub mod types;

pub use error::{ConfigError, DocumentError, Result};
