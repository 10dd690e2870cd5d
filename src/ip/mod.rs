//! 클라이언트 IP 및 요청 출처 결정
//!
//! rate limit, in-flight 요청 제한, IP 허용 목록 미들웨어가 같은 해석 규칙을
//! 공유합니다.

mod checker;
mod source;
mod strategy;

pub use checker::IpChecker;
pub use source::{resolve_source_criterion, SourceExtractor};
pub use strategy::{resolve_ip_strategy, ClientIpStrategy, RemoteAddr, X_FORWARDED_FOR};
