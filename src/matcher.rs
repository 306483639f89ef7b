//! 자유 입력 → 고정 답변 매칭.
//!
//! 순서: 정확히 일치 → 부분 문자열(테이블 선언 순) → 단어 단위 → 기본 답변.
//! 먼저 걸린 단계에서 끝난다. 부작용이 없는 순수 함수다.

use crate::i18n::Language;
use crate::responses::{ResponsePair, ResponseTable};

/// 단어 매칭 전에 제거하는 문장부호.
pub const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '?', '!'];

/// 어느 단계에서 답변이 결정되었는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Substring,
    Token,
    Fallback,
}

/// 매칭 결과. `trigger` 는 Fallback 일 때 None.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub kind: MatchKind,
    pub trigger: Option<&'a str>,
    pub reply: &'a ResponsePair,
}

impl Resolution<'_> {
    pub fn text(&self, lang: Language) -> &str {
        self.reply.pick(lang)
    }
}

/// 주입된 테이블을 대상으로 답변을 고른다.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    table: ResponseTable,
}

impl Matcher {
    pub fn new(table: ResponseTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// 입력에 맞는 답변을 언어에 맞춰 돌려준다. 항상 문자열을 반환한다.
    pub fn resolve(&self, input: &str, lang: Language) -> String {
        self.classify(input).text(lang).to_string()
    }

    /// 답변과 함께 매칭 단계/트리거를 돌려준다.
    pub fn classify(&self, input: &str) -> Resolution<'_> {
        let text = normalize(input);
        let entries = self.table.entries();

        let hit = move |kind: MatchKind, idx: usize| Resolution {
            kind,
            trigger: Some(entries[idx].trigger.as_str()),
            reply: &entries[idx].reply,
        };

        if let Some(idx) = entries.iter().position(|e| e.trigger == text) {
            return hit(MatchKind::Exact, idx);
        }

        if let Some(idx) = entries.iter().position(|e| text.contains(e.trigger.as_str())) {
            return hit(MatchKind::Substring, idx);
        }

        for word in text.split_whitespace() {
            let token = strip_punctuation(word);
            if token.is_empty() {
                continue;
            }
            if let Some(idx) = entries.iter().position(|e| e.trigger == token) {
                return hit(MatchKind::Token, idx);
            }
        }

        Resolution {
            kind: MatchKind::Fallback,
            trigger: None,
            reply: self.table.fallback(),
        }
    }
}

/// 앞뒤 공백 제거 후 소문자화.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// 토큰 안의 `. , ? !` 를 모두 지운다. 그 외 유니코드 문장부호는 그대로 둔다.
pub fn strip_punctuation(token: &str) -> String {
    token
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{ResponseEntry, ResponseTable};

    fn table(triggers: &[&str]) -> ResponseTable {
        let entries = triggers
            .iter()
            .map(|t| ResponseEntry {
                trigger: t.to_string(),
                reply: ResponsePair::new(format!("{t}-en"), format!("{t}-hi")),
            })
            .collect();
        ResponseTable::new(entries, ResponsePair::new("fallback-en", "fallback-hi"))
            .expect("test table")
    }

    #[test]
    fn exact_beats_earlier_substring() {
        let m = Matcher::new(table(&["go", "go home"]));
        let r = m.classify("Go Home");
        assert_eq!(r.kind, MatchKind::Exact);
        assert_eq!(r.trigger, Some("go home"));
    }

    #[test]
    fn substring_picks_first_declared() {
        let m = Matcher::new(table(&["go", "go home"]));
        let r = m.classify("i want to go home now");
        assert_eq!(r.kind, MatchKind::Substring);
        assert_eq!(r.trigger, Some("go"));

        let reversed = Matcher::new(table(&["go home", "go"]));
        assert_eq!(
            reversed.classify("i want to go home now").trigger,
            Some("go home")
        );
    }

    #[test]
    fn token_stage_handles_punctuation_inside_words() {
        // "wa.it" 는 부분 문자열로는 안 걸리고 문장부호 제거 후에야 걸린다.
        let m = Matcher::new(table(&["wait"]));
        let r = m.classify("should i wa.it?");
        assert_eq!(r.kind, MatchKind::Token);
        assert_eq!(m.resolve("should i wa.it?", Language::English), "wait-en");
    }

    #[test]
    fn only_ascii_punctuation_is_stripped() {
        assert_eq!(strip_punctuation("wait?!."), "wait");
        assert_eq!(strip_punctuation("wait¿"), "wait¿");
        assert_eq!(strip_punctuation("?!"), "");
    }

    #[test]
    fn blank_input_falls_back() {
        let m = Matcher::new(table(&["hi"]));
        for input in ["", "   ", "\t\n", "?!"] {
            let r = m.classify(input);
            assert_eq!(r.kind, MatchKind::Fallback, "input {input:?}");
            assert_eq!(r.trigger, None);
        }
        assert_eq!(m.resolve("", Language::Hinglish), "fallback-hi");
    }

    #[test]
    fn unicode_input_is_lowercased() {
        let m = Matcher::new(table(&["straße"]));
        assert_eq!(m.classify("STRAẞE").kind, MatchKind::Exact);
        assert_eq!(m.classify("  ЁЖИК  ").kind, MatchKind::Fallback);
    }
}
