use serde::{Deserialize, Serialize};

use crate::types::Duration;

/// 요청/응답 본문 버퍼링 및 크기 제한
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Buffering {
    /// 0이면 제한 없음
    pub max_request_body_bytes: i64,
    pub mem_request_body_bytes: i64,
    pub max_response_body_bytes: i64,
    pub mem_response_body_bytes: i64,
    pub retry_expression: String,
}

/// 서킷 브레이커
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircuitBreaker {
    /// 조건이 일치하면 서킷을 열고 fallback을 적용
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_period: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_duration: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_duration: Option<Duration>,
    /// 서킷이 열린 동안 반환할 상태 코드
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Retry {
    pub attempts: i64,
    /// 지수 백오프의 첫 대기 시간. 설정하지 않으면 즉시 재시도
    pub initial_interval: Duration,
}
