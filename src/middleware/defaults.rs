//! 문서에 값이 없는 필드에 기본값을 채웁니다.
//!
//! 이미 설정된 값은 건드리지 않으므로 여러 번 적용해도 결과가 같습니다.

use tracing::debug;

use super::allow_list::{IpAllowList, DEFAULT_REJECT_STATUS_CODE};
use super::auth::{ForwardAuth, FORWARD_AUTH_DEFAULT_MAX_BODY_SIZE};
use super::content::Compress;
use super::rate_limit::{RateLimit, Redis};
use super::resilience::CircuitBreaker;
use super::Middleware;
use crate::types::Duration;

pub const CIRCUIT_BREAKER_CHECK_PERIOD: Duration = Duration::from_millis(100);
pub const CIRCUIT_BREAKER_FALLBACK_DURATION: Duration = Duration::from_secs(10);
pub const CIRCUIT_BREAKER_RECOVERY_DURATION: Duration = Duration::from_secs(10);
pub const CIRCUIT_BREAKER_RESPONSE_CODE: u16 = 503;

pub const COMPRESS_ENCODINGS: [&str; 3] = ["gzip", "br", "zstd"];

pub const RATE_LIMIT_BURST: i64 = 1;
pub const RATE_LIMIT_PERIOD: Duration = Duration::from_secs(1);

pub const REDIS_ENDPOINT: &str = "localhost:6379";
pub const REDIS_READ_TIMEOUT: Duration = Duration::from_secs(3);
pub const REDIS_WRITE_TIMEOUT: Duration = Duration::from_secs(3);
pub const REDIS_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// 기본값 주입
pub trait SetDefaults {
    fn set_defaults(&mut self);
}

impl SetDefaults for Middleware {
    fn set_defaults(&mut self) {
        match self {
            Middleware::CircuitBreaker(config) => config.set_defaults(),
            Middleware::Compress(config) => config.set_defaults(),
            Middleware::RateLimit(config) => config.set_defaults(),
            Middleware::ForwardAuth(config) => config.set_defaults(),
            Middleware::IpAllowList(config) => config.set_defaults(),
            _ => {}
        }
    }
}

impl SetDefaults for CircuitBreaker {
    fn set_defaults(&mut self) {
        self.check_period.get_or_insert(CIRCUIT_BREAKER_CHECK_PERIOD);
        self.fallback_duration.get_or_insert(CIRCUIT_BREAKER_FALLBACK_DURATION);
        self.recovery_duration.get_or_insert(CIRCUIT_BREAKER_RECOVERY_DURATION);
        self.response_code.get_or_insert(CIRCUIT_BREAKER_RESPONSE_CODE);
    }
}

impl SetDefaults for Compress {
    fn set_defaults(&mut self) {
        if self.encodings.is_empty() {
            debug!("compress encodings 기본값 적용: {:?}", COMPRESS_ENCODINGS);
            self.encodings = COMPRESS_ENCODINGS.iter().map(|e| e.to_string()).collect();
        }
    }
}

impl SetDefaults for RateLimit {
    fn set_defaults(&mut self) {
        self.burst.get_or_insert(RATE_LIMIT_BURST);
        self.period.get_or_insert(RATE_LIMIT_PERIOD);
        if let Some(redis) = self.redis.as_mut() {
            redis.set_defaults();
        }
    }
}

impl SetDefaults for Redis {
    fn set_defaults(&mut self) {
        if self.endpoints.is_empty() {
            self.endpoints = vec![REDIS_ENDPOINT.to_string()];
        }
        self.read_timeout.get_or_insert(REDIS_READ_TIMEOUT);
        self.write_timeout.get_or_insert(REDIS_WRITE_TIMEOUT);
        self.dial_timeout.get_or_insert(REDIS_DIAL_TIMEOUT);
    }
}

impl SetDefaults for ForwardAuth {
    fn set_defaults(&mut self) {
        self.max_body_size.get_or_insert(FORWARD_AUTH_DEFAULT_MAX_BODY_SIZE);
    }
}

impl SetDefaults for IpAllowList {
    fn set_defaults(&mut self) {
        if self.reject_status_code == 0 {
            self.reject_status_code = DEFAULT_REJECT_STATUS_CODE;
        }
    }
}
