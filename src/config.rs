use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::i18n::{self, Language};

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 봇 답변을 화면에 띄우기 전 연출용 지연 기본값.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 700;

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// english / hinglish / auto
    pub language: String,
    pub reply_delay_ms: u64,
    /// 내장 테이블 대신 쓸 TOML 응답 파일
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default().as_code().to_string(),
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            responses_path: None,
        }
    }
}

impl Config {
    /// 설정된 언어. `auto` 면 시스템 로케일을 본다.
    pub fn language(&self) -> Language {
        i18n::resolve_language(None, Some(&self.language))
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::info!("설정 로드: {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        log::info!("기본 설정 생성: {}", path.display());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(&path).expect("load");
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        assert_eq!(load_or_default(&path).expect("reload"), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"english\"\n").expect("write");
        let cfg = load_or_default(&path).expect("load");
        assert_eq!(cfg.language(), Language::English);
        assert_eq!(cfg.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
        assert!(cfg.responses_path.is_none());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "reply_delay_ms = \"soon\"").expect("write");
        assert!(matches!(load_or_default(&path), Err(ConfigError::Parse(_))));
    }
}
