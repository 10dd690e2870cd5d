use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// 상태 코드 범위에 따라 사용자 정의 에러 페이지를 반환
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorPage {
    /// 예: "500", "500,502", "500-599", "404,418,500-599"
    pub status: Vec<String>,

    /// 원래 상태 코드 대신 반환할 상태 코드 (예: "418": 404, "410-418": 404)
    pub status_rewrites: BTreeMap<String, i64>,

    /// 에러 페이지를 제공하는 서비스 이름
    pub service: String,

    /// {status}, {originalStatus}, {url} 변수를 사용할 수 있는 에러 페이지 URL
    pub query: String,
}

impl ErrorPage {
    /// `status` 목록 전체를 범위 집합으로 해석합니다.
    pub fn status_ranges(&self) -> Result<StatusRanges> {
        StatusRanges::parse(&self.status)
    }
}

/// HTTP 상태 코드 범위 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRanges(Vec<RangeInclusive<u16>>);

impl StatusRanges {
    /// 각 항목은 단일 코드, 쉼표로 구분된 목록, 대시로 표기한 범위 또는 그 조합입니다.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut ranges = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            for part in entry.split(',') {
                ranges.push(parse_range(entry, part.trim())?);
            }
        }
        Ok(Self(ranges))
    }

    pub fn contains(&self, code: u16) -> bool {
        self.0.iter().any(|range| range.contains(&code))
    }

    pub fn ranges(&self) -> &[RangeInclusive<u16>] {
        &self.0
    }
}

fn parse_range(entry: &str, part: &str) -> Result<RangeInclusive<u16>> {
    let invalid = |reason: String| ConfigError::InvalidStatus {
        entry: entry.to_string(),
        reason,
    };

    if part.is_empty() {
        return Err(invalid("empty status code".to_string()));
    }

    match part.split_once('-') {
        Some((low, high)) => {
            let low = parse_code(low.trim()).map_err(invalid)?;
            let high = parse_code(high.trim()).map_err(invalid)?;
            if low > high {
                return Err(invalid(format!("range start {} is greater than end {}", low, high)));
            }
            Ok(low..=high)
        }
        None => {
            let code = parse_code(part).map_err(invalid)?;
            Ok(code..=code)
        }
    }
}

fn parse_code(value: &str) -> std::result::Result<u16, String> {
    let code = value
        .parse::<u16>()
        .map_err(|_| format!("{:?} is not a status code", value))?;
    if !(100..=599).contains(&code) {
        return Err(format!("{} is outside 100-599", code));
    }
    Ok(code)
}
