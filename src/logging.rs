use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{LogFormat, LogSettings, SettingsError};

/// 전역 tracing subscriber를 설치합니다.
///
/// `RUST_LOG`가 있으면 그 필터를 우선하고, 없으면 `settings.level`을 사용합니다.
/// 이미 설치된 subscriber가 있으면 오류를 반환합니다.
pub fn init_logging(settings: &LogSettings) -> Result<(), SettingsError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let result = match settings.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| SettingsError::LoggingInit {
        reason: e.to_string(),
    })
}
