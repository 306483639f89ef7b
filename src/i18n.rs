use serde::{Deserialize, Serialize};
use sys_locale::get_locale;

/// UI 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const CHAT_GREETING: &str = "chat.greeting";
    pub const CHAT_PLACEHOLDER: &str = "chat.placeholder";
    pub const CHAT_SEND: &str = "chat.send";
    pub const CHAT_TYPING: &str = "chat.typing";
    pub const CHAT_YOU: &str = "chat.you";
    pub const CHAT_BOT: &str = "chat.bot";
    pub const CHAT_SWITCH_LANGUAGE: &str = "chat.switch_language";

    pub const CLI_HELP: &str = "cli.help";
    pub const CLI_PROMPT: &str = "cli.prompt";
    pub const CLI_LANGUAGE_CHANGED: &str = "cli.language_changed";
    pub const CLI_UNKNOWN_COMMAND: &str = "cli.unknown_command";
    pub const CLI_HISTORY_EMPTY: &str = "cli.history_empty";
}

/// 답변 언어. 응답 테이블의 `primary` 는 English, `alternate` 는 Hinglish 에 대응한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    #[default]
    Hinglish,
}

impl Language {
    /// 언어 코드/이름을 해석한다. `auto` 나 알 수 없는 값은 None.
    pub fn from_code(code: &str) -> Option<Self> {
        let c = code.trim().to_lowercase();
        match c.as_str() {
            "english" | "en" | "primary" => Some(Language::English),
            "hinglish" | "hi" | "alternate" => Some(Language::Hinglish),
            other if other.starts_with("en-") || other.starts_with("en_") => {
                Some(Language::English)
            }
            other if other.starts_with("hi-") || other.starts_with("hi_") => {
                Some(Language::Hinglish)
            }
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hinglish => "hinglish",
        }
    }

    /// 표시용 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hinglish => "Hinglish",
        }
    }

    /// 토글 버튼이 전환할 반대 언어.
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Hinglish,
            Language::Hinglish => Language::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 현재 언어에 맞춰 UI 문자열을 돌려준다.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    /// 번역을 가져온다. Hinglish 번역이 없으면 영어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::Hinglish => hinglish(key).unwrap_or_else(|| english(key)),
            Language::English => english(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 답변 언어를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> Language {
    cli_arg
        .and_then(Language::from_code)
        .or_else(|| config_lang.and_then(Language::from_code))
        .or_else(detect_system_language)
        .unwrap_or_default()
}

fn normalize_locale_string(loc: &str) -> Option<Language> {
    let lower = loc.to_lowercase();
    let mut parts = lower.split(['.', '_', '-']);
    let lang = parts.next().unwrap_or_default();
    let region = parts.next().unwrap_or_default();
    match (lang, region) {
        ("hi", _) => Some(Language::Hinglish),
        ("en", "in") => Some(Language::Hinglish),
        ("en", _) => Some(Language::English),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다. 인도 로케일은 Hinglish 로 본다.
pub fn detect_system_language() -> Option<Language> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

fn english(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_TITLE => "💬 Seen-Zone Chatbot 👑",
        APP_EXIT => "Bye! I won't leave you on seen 👋",
        CHAT_GREETING => "Hello! Which language format do you prefer? (English / Hinglish)",
        CHAT_PLACEHOLDER => "Ask about being left on seen...",
        CHAT_SEND => "Send",
        CHAT_TYPING => "typing...",
        CHAT_YOU => "You",
        CHAT_BOT => "Bot",
        CHAT_SWITCH_LANGUAGE => "Switch to Hinglish",
        CLI_HELP => "Commands: /lang [english|hinglish]  /history  /quit",
        CLI_PROMPT => "> ",
        CLI_LANGUAGE_CHANGED => "Reply language:",
        CLI_UNKNOWN_COMMAND => "Unknown command.",
        CLI_HISTORY_EMPTY => "(no messages yet)",
        _ => "[missing translation]",
    }
}

fn hinglish(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Bye! Main tumhe seen pe nahi chhodunga 👋",
        CHAT_PLACEHOLDER => "Dost 'ignore' kar raha hai? Hinglish mein poocho!",
        CHAT_SEND => "Bhejo",
        CHAT_TYPING => "type kar raha hoon...",
        CHAT_YOU => "Tum",
        CHAT_SWITCH_LANGUAGE => "Switch to English",
        CLI_LANGUAGE_CHANGED => "Reply ki bhasha:",
        CLI_UNKNOWN_COMMAND => "Yeh command samajh nahi aaya.",
        CLI_HISTORY_EMPTY => "(abhi tak koi message nahi)",
        _ => return None,
    })
}
