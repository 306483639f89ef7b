use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::i18n::{keys, Language, Translator};
use crate::transcript::{ChatMessage, Role, Transcript};

/// 한 줄 입력을 해석한 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Message(String),
    ToggleLanguage,
    SetLanguage(Language),
    History,
    Help,
    Quit,
    Unknown(String),
}

/// `/` 로 시작하면 명령, 아니면 채팅 메시지로 본다.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Message(line.trim_end_matches(['\r', '\n']).to_string());
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();
    match (name.as_str(), arg) {
        ("lang" | "language", None) => Command::ToggleLanguage,
        ("lang" | "language", Some(code)) => match Language::from_code(code) {
            Some(lang) => Command::SetLanguage(lang),
            None => Command::Unknown(trimmed.to_string()),
        },
        ("history", _) => Command::History,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// 프롬프트를 출력하고 한 줄을 읽는다. EOF 면 None.
pub fn read_command(tr: &Translator) -> Result<Option<Command>, AppError> {
    match read_line(tr.t(keys::CLI_PROMPT))? {
        Some(line) => Ok(Some(parse_command(&line))),
        None => Ok(None),
    }
}

fn read_line(prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let read = io::stdin().lock().read_line(&mut buf)?;
    if read == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(buf))
}

pub fn print_message(tr: &Translator, msg: &ChatMessage) {
    println!("{}", format_message(tr, msg));
}

fn format_message(tr: &Translator, msg: &ChatMessage) -> String {
    let who = match msg.role {
        Role::User => tr.t(keys::CHAT_YOU),
        Role::Bot => tr.t(keys::CHAT_BOT),
    };
    format!("[{who}] {}", msg.text)
}

pub fn print_history(tr: &Translator, transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}", tr.t(keys::CLI_HISTORY_EMPTY));
        return;
    }
    for msg in transcript.messages() {
        print_message(tr, msg);
    }
}

pub fn print_help(tr: &Translator) {
    println!("{}", tr.t(keys::CLI_HELP));
}

pub fn print_language(tr: &Translator, lang: Language) {
    println!("{} {lang}", tr.t(keys::CLI_LANGUAGE_CHANGED));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            parse_command("kya karu?\n"),
            Command::Message("kya karu?".into())
        );
        assert_eq!(parse_command("\n"), Command::Message(String::new()));
    }

    #[test]
    fn lang_command_toggles_or_sets() {
        assert_eq!(parse_command("/lang"), Command::ToggleLanguage);
        assert_eq!(
            parse_command("/lang English"),
            Command::SetLanguage(Language::English)
        );
        assert_eq!(
            parse_command("  /LANG hinglish  "),
            Command::SetLanguage(Language::Hinglish)
        );
        assert!(matches!(parse_command("/lang klingon"), Command::Unknown(_)));
    }

    #[test]
    fn quit_aliases() {
        for line in ["/quit", "/exit", "/q"] {
            assert_eq!(parse_command(line), Command::Quit);
        }
    }

    #[test]
    fn bot_lines_are_labelled() {
        let tr = Translator::new(Language::English);
        let line = format_message(&tr, &ChatMessage::bot("hey"));
        assert_eq!(line, "[Bot] hey");
    }
}
