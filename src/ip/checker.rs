use std::net::{IpAddr, SocketAddr};

use ipnet::IpNet;

use crate::error::{ConfigError, Result};

/// IP 또는 CIDR 목록에 대한 포함 여부 검사기
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpChecker {
    addrs: Vec<IpAddr>,
    nets: Vec<IpNet>,
}

impl IpChecker {
    /// IP/CIDR 리터럴 목록으로 검사기를 생성합니다.
    ///
    /// `field`는 목록이 비어 있을 때 오류 메시지에 사용됩니다.
    pub fn new<S: AsRef<str>>(entries: &[S], field: &'static str) -> Result<Self> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyIpList { field });
        }

        let mut addrs = Vec::new();
        let mut nets = Vec::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.contains('/') {
                let net = entry.parse::<IpNet>().map_err(|e| ConfigError::InvalidIpOrCidr {
                    value: entry.to_string(),
                    reason: e.to_string(),
                })?;
                nets.push(net.trunc());
            } else {
                let addr = entry.parse::<IpAddr>().map_err(|e| ConfigError::InvalidIpOrCidr {
                    value: entry.to_string(),
                    reason: e.to_string(),
                })?;
                addrs.push(addr.to_canonical());
            }
        }

        Ok(Self { addrs, nets })
    }

    /// 문자열 주소가 목록에 포함되는지 검사합니다.
    ///
    /// 주소를 해석할 수 없으면 `None`을 반환합니다.
    pub fn contains(&self, addr: &str) -> Option<bool> {
        parse_ip(addr).map(|ip| self.contains_ip(ip))
    }

    pub fn contains_ip(&self, ip: IpAddr) -> bool {
        let ip = ip.to_canonical();
        self.addrs.contains(&ip) || self.nets.iter().any(|net| net.contains(&ip))
    }
}

/// `ip`, `ip:port`, `[ipv6]:port` 형식의 주소를 해석합니다.
///
/// IPv4-mapped IPv6 주소는 IPv4로 정규화됩니다.
pub(crate) fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    value
        .parse::<IpAddr>()
        .or_else(|_| value.parse::<SocketAddr>().map(|addr| addr.ip()))
        .ok()
        .map(|ip| ip.to_canonical())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_ip_and_cidr() {
        let checker = IpChecker::new(&["10.0.0.0/8", "192.168.1.1", "2001:db8::/32"], "test").unwrap();

        assert!(checker.contains_ip("10.1.2.3".parse().unwrap()));
        assert!(checker.contains_ip("192.168.1.1".parse().unwrap()));
        assert!(!checker.contains_ip("192.168.1.2".parse().unwrap()));
        assert!(checker.contains_ip("2001:db8::1".parse().unwrap()));
        assert!(!checker.contains_ip("2001:db9::1".parse().unwrap()));
    }

    #[test]
    fn test_checker_host_bits_are_ignored() {
        let checker = IpChecker::new(&["10.1.2.3/8"], "test").unwrap();
        assert!(checker.contains_ip("10.200.0.1".parse().unwrap()));
    }

    #[test]
    fn test_checker_mapped_ipv4() {
        let checker = IpChecker::new(&["203.0.113.0/24"], "test").unwrap();
        assert_eq!(checker.contains("::ffff:203.0.113.9"), Some(true));
    }

    #[test]
    fn test_checker_contains_with_port() {
        let checker = IpChecker::new(&["127.0.0.1", "::1"], "test").unwrap();
        assert_eq!(checker.contains("127.0.0.1:8080"), Some(true));
        assert_eq!(checker.contains("[::1]:443"), Some(true));
        assert_eq!(checker.contains("not-an-ip"), None);
        assert_eq!(checker.contains(""), None);
    }

    #[test]
    fn test_checker_rejects_invalid_entries() {
        let err = IpChecker::new(&["10.0.0.0/33"], "test").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIpOrCidr { .. }));

        let err = IpChecker::new(&["example.com"], "test").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIpOrCidr { .. }));

        let empty: [&str; 0] = [];
        let err = IpChecker::new(&empty, "sourceRange").unwrap_err();
        assert_eq!(err, ConfigError::EmptyIpList { field: "sourceRange" });
    }
}
