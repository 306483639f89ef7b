//! Seen-Zone 챗봇 핵심 로직. 응답 테이블과 매처를 라이브러리로 분리해 CLI 와 GUI 가 함께 쓴다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod matcher;
pub mod responses;
pub mod transcript;
pub mod ui_cli;

pub use i18n::Language;
pub use matcher::{MatchKind, Matcher, Resolution};
pub use responses::{ResponseEntry, ResponsePair, ResponseTable};
