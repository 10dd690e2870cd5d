use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 다른 미들웨어 이름을 순서대로 묶은 체인
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chain {
    pub middlewares: Vec<String>,
}

/// 플러그인 하나의 임의 설정
pub type PluginConf = BTreeMap<String, serde_json::Value>;

/// 플러그인 이름별 설정
pub type Plugin = BTreeMap<String, PluginConf>;
