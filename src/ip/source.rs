use hyper::header::{HeaderName, HOST};
use hyper::Request;
use tracing::debug;

use super::strategy::{resolve_ip_strategy, ClientIpStrategy};
use crate::error::{ConfigError, Result};
use crate::middleware::SourceCriterion;

/// 요청을 출처별로 묶기 위한 키 추출기
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceExtractor {
    ClientIp(ClientIpStrategy),
    RequestHeader(HeaderName),
    RequestHost,
}

impl SourceExtractor {
    /// 요청의 출처 키를 반환합니다. 키를 결정할 수 없으면 `None`입니다.
    pub fn source<B>(&self, req: &Request<B>) -> Option<String> {
        match self {
            Self::ClientIp(strategy) => strategy.extract(req).map(|ip| ip.to_string()),
            Self::RequestHeader(name) => req
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            Self::RequestHost => req
                .headers()
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .or_else(|| req.uri().host().map(str::to_string)),
        }
    }
}

impl SourceCriterion {
    /// 기준 필드가 둘 이상 설정되어 있으면 오류를 반환합니다.
    pub fn validate(&self) -> Result<()> {
        let fields = self.configured_fields();
        if fields.len() > 1 {
            return Err(ConfigError::AmbiguousSourceCriterion { fields });
        }
        if let Some(strategy) = &self.ip_strategy {
            strategy.get()?;
        }
        Ok(())
    }

    /// 검증 후 출처 추출기로 변환합니다.
    pub fn extractor(&self) -> Result<SourceExtractor> {
        self.validate()?;
        resolve_source_criterion(Some(self))
    }
}

/// 고정된 순서(ipStrategy, requestHeaderName, requestHost)로 처음 설정된 기준을 따릅니다.
///
/// 상호 배타성은 검사하지 않습니다. [`SourceCriterion::extractor`]를 사용하면
/// 검증까지 함께 수행됩니다.
pub fn resolve_source_criterion(criterion: Option<&SourceCriterion>) -> Result<SourceExtractor> {
    let Some(criterion) = criterion else {
        return Ok(SourceExtractor::ClientIp(resolve_ip_strategy(None)?));
    };

    if let Some(strategy) = &criterion.ip_strategy {
        return Ok(SourceExtractor::ClientIp(strategy.get()?));
    }

    if !criterion.request_header_name.is_empty() {
        let name = HeaderName::from_bytes(criterion.request_header_name.as_bytes()).map_err(|_| {
            ConfigError::InvalidHeaderName {
                name: criterion.request_header_name.clone(),
            }
        })?;
        debug!(header = %name, "헤더 기반 출처 기준 선택");
        return Ok(SourceExtractor::RequestHeader(name));
    }

    if criterion.request_host {
        return Ok(SourceExtractor::RequestHost);
    }

    Ok(SourceExtractor::ClientIp(resolve_ip_strategy(None)?))
}
