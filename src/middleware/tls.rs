use serde::{Deserialize, Serialize};

/// 클라이언트 TLS 설정. CA, 인증서, 키는 파일 경로 또는 내용입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientTls {
    pub ca: String,
    pub cert: String,
    pub key: String,
    pub insecure_skip_verify: bool,

    /// Deprecated: 서버 측 옵션이므로 새 문서에는 쓰지 않음
    #[serde(skip_serializing)]
    pub ca_optional: Option<bool>,
}

/// 클라이언트 인증서 정보를 헤더로 전달
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PassTlsClientCert {
    /// X-Forwarded-Tls-Client-Cert 헤더에 PEM 인증서 설정
    pub pem: bool,

    /// X-Forwarded-Tls-Client-Cert-Info 헤더에 넣을 항목
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<TlsClientCertificateInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TlsClientCertificateInfo {
    pub not_after: bool,
    pub not_before: bool,
    pub sans: bool,
    pub serial_number: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<TlsClientCertificateSubjectDnInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<TlsClientCertificateIssuerDnInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TlsClientCertificateIssuerDnInfo {
    pub country: bool,
    pub province: bool,
    pub locality: bool,
    pub organization: bool,
    pub common_name: bool,
    pub serial_number: bool,
    pub domain_component: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TlsClientCertificateSubjectDnInfo {
    pub country: bool,
    pub province: bool,
    pub locality: bool,
    pub organization: bool,
    pub organizational_unit: bool,
    pub common_name: bool,
    pub serial_number: bool,
    pub domain_component: bool,
}
