use serde::{Deserialize, Serialize};

/// 응답 압축 (gzip, brotli, zstd)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Compress {
    /// `application/grpc`는 항상 제외
    pub excluded_content_types: Vec<String>,
    pub included_content_types: Vec<String>,
    pub min_response_body_bytes: i64,
    /// 비어 있으면 기본 인코딩 목록 사용
    pub encodings: Vec<String>,
    pub default_encoding: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentType {
    /// Deprecated: 입력으로만 허용
    #[serde(skip_serializing)]
    pub auto_detect: Option<bool>,
}

/// gRPC-Web 요청을 HTTP/2 gRPC 요청으로 변환
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcWeb {
    /// 허용 origin 목록 ("*" 가능)
    pub allow_origins: Vec<String>,
}
