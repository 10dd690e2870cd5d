use serde::{Deserialize, Serialize};

use super::source::SourceCriterion;
use super::tls::ClientTls;
use crate::types::Duration;

/// 출처별 요청 속도 제한
///
/// 실제 속도는 `average / period`입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateLimit {
    /// 0이면 속도 제한 없음
    pub average: i64,

    /// 기본값 1초
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Duration>,

    /// 기본값 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_criterion: Option<SourceCriterion>,

    /// 설정하지 않으면 메모리 기반 버킷을 사용
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<Redis>,
}

/// rate limit 버킷 저장소로 사용할 Redis 연결 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Redis {
    /// 단일 주소 또는 host:port 시드 목록
    pub endpoints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,
    pub username: String,
    pub password: String,
    pub db: i64,
    pub pool_size: i64,
    pub min_idle_conns: i64,
    pub max_active_conns: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_timeout: Option<Duration>,
}

/// 출처별 동시 처리 요청 수 제한
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InFlightReq {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_criterion: Option<SourceCriterion>,
}
