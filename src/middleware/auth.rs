use serde::{Deserialize, Serialize};

use super::tls::ClientTls;
use crate::types::Users;

pub const FORWARD_AUTH_DEFAULT_MAX_BODY_SIZE: i64 = -1;

/// Basic 인증
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicAuth {
    /// `name:hashed-password` 형식
    pub users: Users,
    pub users_file: String,
    pub realm: String,
    /// 백엔드로 전달하기 전에 Authorization 헤더 제거
    pub remove_header: bool,
    /// 인증된 사용자 이름을 담을 헤더
    pub header_field: String,
}

/// Digest 인증
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DigestAuth {
    /// `name:realm:encoded-password` 형식
    pub users: Users,
    pub users_file: String,
    pub remove_header: bool,
    pub realm: String,
    pub header_field: String,
}

/// 인증을 외부 서비스에 위임
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForwardAuth {
    /// 인증 서버 주소
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,
    pub trust_forward_header: bool,
    pub auth_response_headers: Vec<String>,
    pub auth_response_headers_regex: String,
    /// 비어 있으면 모든 요청 헤더를 전달
    pub auth_request_headers: Vec<String>,
    pub add_auth_cookies_to_response: Vec<String>,
    pub header_field: String,
    pub forward_body: bool,
    /// 인증 서버로 전달할 최대 본문 크기. -1이면 제한 없음
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_size: Option<i64>,
    pub preserve_location_header: bool,
    pub preserve_request_method: bool,
}
