use std::net::{IpAddr, SocketAddr};

use hyper::header::HeaderMap;
use hyper::Request;
use ipnet::Ipv6Net;
use tracing::debug;

use super::checker::{parse_ip, IpChecker};
use crate::error::{ConfigError, Result};
use crate::middleware::IpStrategy;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// 요청을 받은 연결의 원격 소켓 주소
///
/// 서버가 요청 extensions에 넣어 두면 전략이 이 값을 읽습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);

/// 설정으로부터 결정된 클라이언트 IP 추출 전략
///
/// 상태를 갖지 않으므로 여러 요청 처리기에서 동시에 호출할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientIpStrategy {
    /// 연결의 원격 주소를 사용
    RemoteAddr { ipv6_subnet: Option<u8> },
    /// X-Forwarded-For 오른쪽에서 `depth`번째 주소를 사용
    Depth { depth: usize, ipv6_subnet: Option<u8> },
    /// X-Forwarded-For 오른쪽부터 제외 목록에 없는 첫 주소를 사용
    Pool { checker: IpChecker },
}

impl ClientIpStrategy {
    /// 요청에서 클라이언트 IP를 추출합니다.
    pub fn extract<B>(&self, req: &Request<B>) -> Option<IpAddr> {
        let remote = req.extensions().get::<RemoteAddr>().map(|addr| addr.0);
        self.extract_from(req.headers(), remote)
    }

    /// 헤더와 원격 주소에서 클라이언트 IP를 추출합니다.
    pub fn extract_from(&self, headers: &HeaderMap, remote: Option<SocketAddr>) -> Option<IpAddr> {
        match self {
            Self::RemoteAddr { ipv6_subnet } => {
                remote.map(|addr| normalize(addr.ip().to_canonical(), *ipv6_subnet))
            }
            Self::Depth { depth, ipv6_subnet } => {
                let hops = forwarded_for(headers);
                if *depth == 0 || hops.len() < *depth {
                    return None;
                }
                let hop = hops[hops.len() - depth].as_deref()?;
                parse_ip(hop).map(|ip| normalize(ip, *ipv6_subnet))
            }
            Self::Pool { checker } => {
                let hops = forwarded_for(headers);
                let selected = hops.iter().rev().find(|hop| match hop.as_deref() {
                    Some(hop) => !hop.is_empty() && checker.contains(hop) != Some(true),
                    None => true,
                });

                match selected {
                    Some(hop) => hop.as_deref().and_then(parse_ip),
                    None => remote.map(|addr| addr.ip().to_canonical()),
                }
            }
        }
    }
}

impl IpStrategy {
    /// 설정을 클라이언트 IP 추출 전략으로 변환합니다.
    ///
    /// `depth`가 설정되면 `excluded_ips`는 무시됩니다.
    pub fn get(&self) -> Result<ClientIpStrategy> {
        if self.depth > 0 {
            let ipv6_subnet = validate_ipv6_subnet(self.ipv6_subnet)?;
            debug!(depth = self.depth, ?ipv6_subnet, "depth 전략 선택");
            return Ok(ClientIpStrategy::Depth {
                depth: self.depth,
                ipv6_subnet,
            });
        }

        if !self.excluded_ips.is_empty() {
            let checker = IpChecker::new(&self.excluded_ips, "excludedIPs")?;
            debug!(excluded = self.excluded_ips.len(), "pool 전략 선택");
            return Ok(ClientIpStrategy::Pool { checker });
        }

        let ipv6_subnet = validate_ipv6_subnet(self.ipv6_subnet)?;
        debug!(?ipv6_subnet, "원격 주소 전략 선택");
        Ok(ClientIpStrategy::RemoteAddr { ipv6_subnet })
    }
}

/// 선택적 IP 전략 설정을 해석합니다. 설정이 없으면 원격 주소 전략입니다.
pub fn resolve_ip_strategy(strategy: Option<&IpStrategy>) -> Result<ClientIpStrategy> {
    match strategy {
        Some(strategy) => strategy.get(),
        None => Ok(ClientIpStrategy::RemoteAddr { ipv6_subnet: None }),
    }
}

fn validate_ipv6_subnet(subnet: Option<i64>) -> Result<Option<u8>> {
    match subnet {
        None => Ok(None),
        Some(value @ 1..=128) => Ok(Some(value as u8)),
        Some(value) => Err(ConfigError::InvalidIpv6Subnet { value }),
    }
}

fn normalize(ip: IpAddr, ipv6_subnet: Option<u8>) -> IpAddr {
    match (ip, ipv6_subnet) {
        (IpAddr::V6(v6), Some(prefix)) => Ipv6Net::new(v6, prefix)
            .map(|net| IpAddr::V6(net.network()))
            .unwrap_or(ip),
        _ => ip,
    }
}

/// 모든 X-Forwarded-For 헤더 값을 순서대로 이어 붙여 항목 단위로 나눕니다.
///
/// UTF-8이 아닌 항목은 `None`으로 남아 위치 계산에 포함됩니다.
fn forwarded_for(headers: &HeaderMap) -> Vec<Option<String>> {
    headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .flat_map(|value| value.as_bytes().split(|b| *b == b','))
        .map(|hop| std::str::from_utf8(hop).ok().map(|s| s.trim().to_string()))
        .collect()
}
