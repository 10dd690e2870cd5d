use serde::{Deserialize, Serialize};

use super::source::IpStrategy;

pub const DEFAULT_REJECT_STATUS_CODE: u16 = 403;

/// 클라이언트 IP 기반 요청 허용 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpAllowList {
    /// 허용할 IP 또는 CIDR 목록
    pub source_range: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_strategy: Option<IpStrategy>,

    /// 거부된 요청의 상태 코드 (0이면 403)
    pub reject_status_code: u16,
}

/// Deprecated: [`IpAllowList`]를 사용하세요.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpWhiteList {
    pub source_range: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_strategy: Option<IpStrategy>,
}

impl From<IpWhiteList> for IpAllowList {
    fn from(legacy: IpWhiteList) -> Self {
        Self {
            source_range: legacy.source_range,
            ip_strategy: legacy.ip_strategy,
            reject_status_code: DEFAULT_REJECT_STATUS_CODE,
        }
    }
}
