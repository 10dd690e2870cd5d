use serde::{Deserialize, Serialize};

/// 클라이언트 IP 결정 방식
///
/// `depth`가 `excluded_ips`보다 우선합니다. 우선순위는 설정할 수 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpStrategy {
    /// X-Forwarded-For 헤더에서 오른쪽부터 셀 위치
    pub depth: usize,

    /// X-Forwarded-For 헤더를 스캔할 때 건너뛸 IP/CIDR 목록
    #[serde(rename = "excludedIPs")]
    pub excluded_ips: Vec<String>,

    /// 같은 서브넷의 IPv6 주소를 하나의 IP로 취급 (1-128)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_subnet: Option<i64>,
}

/// 요청을 같은 출처로 묶는 기준
///
/// 세 필드는 서로 배타적입니다. 아무것도 설정되지 않으면 원격 주소를 사용합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_strategy: Option<IpStrategy>,

    /// 요청을 묶을 때 사용할 헤더 이름
    pub request_header_name: String,

    /// 요청 Host를 출처로 사용할지 여부
    pub request_host: bool,
}

impl SourceCriterion {
    /// 설정된 기준 필드의 wire 이름 목록
    pub fn configured_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.ip_strategy.is_some() {
            fields.push("ipStrategy");
        }
        if !self.request_header_name.is_empty() {
            fields.push("requestHeaderName");
        }
        if self.request_host {
            fields.push("requestHost");
        }
        fields
    }
}
