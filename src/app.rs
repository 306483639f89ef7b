use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Language, Translator};
use crate::matcher::Matcher;
use crate::responses::{ResponseTable, TableError};
use crate::transcript::{ChatMessage, Transcript};
use crate::ui_cli::{self, Command};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("응답 테이블 오류: {0}")]
    Table(#[from] TableError),
}

/// CLI/GUI 가 설정 위에 덮어쓰는 실행 옵션.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub language: Option<String>,
    pub responses_path: Option<PathBuf>,
    pub no_delay: bool,
}

/// 화면에 띄울 시각이 정해진 봇 답변.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub text: String,
    pub ready_at: Instant,
}

impl PendingReply {
    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.ready_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.ready_at.saturating_duration_since(now)
    }

    /// 표시 시각까지 현재 스레드를 재운다.
    pub fn wait(&self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

/// 한 번의 채팅 UI 세션. 매처, 현재 답변 언어, 대화 기록을 가진다.
#[derive(Debug, Clone)]
pub struct ChatSession {
    matcher: Matcher,
    language: Language,
    reply_delay: Duration,
    transcript: Transcript,
}

impl ChatSession {
    /// 인사 메시지가 들어간 새 세션을 만든다.
    pub fn new(matcher: Matcher, language: Language, reply_delay: Duration) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::bot(
            Translator::new(language).t(keys::CHAT_GREETING),
        ));
        Self {
            matcher,
            language,
            reply_delay,
            transcript,
        }
    }

    /// 설정과 실행 옵션으로 세션을 구성한다. 응답 파일이 지정되면 내장 테이블 대신 쓴다.
    pub fn from_config(cfg: &Config, opts: &SessionOptions) -> Result<Self, AppError> {
        let language = i18n::resolve_language(opts.language.as_deref(), Some(&cfg.language));
        let table = match opts.responses_path.as_ref().or(cfg.responses_path.as_ref()) {
            Some(path) => {
                let table = ResponseTable::load(path)?;
                log::info!("응답 테이블 로드: {} ({}개)", path.display(), table.len());
                table
            }
            None => ResponseTable::built_in(),
        };
        let delay = if opts.no_delay {
            Duration::ZERO
        } else {
            cfg.reply_delay()
        };
        Ok(Self::new(Matcher::new(table), language, delay))
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, lang: Language) {
        log::debug!("답변 언어 변경: {} -> {}", self.language, lang);
        self.language = lang;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.set_language(self.language.toggled());
        self.language
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// 사용자 메시지를 기록하고 답변을 예약한다. 공백뿐인 입력은 무시한다.
    ///
    /// 답변은 보낸 시점의 언어로 정해진다. 표시 지연 중에 언어를 바꿔도 바뀌지 않는다.
    pub fn send(&mut self, input: &str) -> Option<PendingReply> {
        if input.trim().is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage::user(input));

        let resolution = self.matcher.classify(input);
        log::debug!(
            "{:?} 매칭 (trigger={:?}, lang={})",
            resolution.kind,
            resolution.trigger,
            self.language
        );
        Some(PendingReply {
            text: resolution.text(self.language).to_string(),
            ready_at: Instant::now() + self.reply_delay,
        })
    }

    /// 예약된 답변을 기록에 추가한다.
    pub fn deliver(&mut self, reply: PendingReply) -> &ChatMessage {
        self.transcript.push(ChatMessage::bot(reply.text))
    }

    /// 지연 없이 보내고 바로 답변을 받는다.
    pub fn send_now(&mut self, input: &str) -> Option<&ChatMessage> {
        let pending = self.send(input)?;
        Some(self.deliver(pending))
    }
}

/// CLI 대화 루프를 실행한다. EOF 또는 /quit 에서 끝난다.
pub fn run(session: &mut ChatSession) -> Result<(), AppError> {
    let mut tr = Translator::new(session.language());
    for msg in session.transcript().messages() {
        ui_cli::print_message(&tr, msg);
    }
    ui_cli::print_help(&tr);

    while let Some(cmd) = ui_cli::read_command(&tr)? {
        match cmd {
            Command::Message(text) => {
                if let Some(pending) = session.send(&text) {
                    pending.wait();
                    let msg = session.deliver(pending);
                    ui_cli::print_message(&tr, msg);
                }
            }
            Command::ToggleLanguage => {
                let lang = session.toggle_language();
                tr.set_language(lang);
                ui_cli::print_language(&tr, lang);
            }
            Command::SetLanguage(lang) => {
                session.set_language(lang);
                tr.set_language(lang);
                ui_cli::print_language(&tr, lang);
            }
            Command::History => ui_cli::print_history(&tr, session.transcript()),
            Command::Help => ui_cli::print_help(&tr),
            Command::Unknown(_) => println!("{}", tr.t(keys::CLI_UNKNOWN_COMMAND)),
            Command::Quit => break,
        }
    }
    println!("{}", tr.t(keys::APP_EXIT));
    Ok(())
}
