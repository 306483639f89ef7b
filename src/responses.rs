//! 트리거 문구 → 응답 쌍 테이블.
//!
//! 테이블은 선언 순서를 그대로 유지하는 `Vec` 이다. 부분 문자열 매칭은 이 순서대로
//! 첫 번째 트리거를 고르므로, 짧은 트리거가 앞에 있으면 뒤의 긴 트리거를 가린다.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::i18n::Language;

/// 같은 답변의 두 언어 버전.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponsePair {
    /// English
    pub primary: String,
    /// Hinglish
    pub alternate: String,
}

impl ResponsePair {
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            alternate: alternate.into(),
        }
    }

    /// 언어에 맞는 문자열을 고른다.
    pub fn pick(&self, lang: Language) -> &str {
        match lang {
            Language::Hinglish => &self.alternate,
            Language::English => &self.primary,
        }
    }
}

/// 트리거 하나와 그 답변.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry {
    pub trigger: String,
    pub reply: ResponsePair,
}

/// 테이블 구성/로드 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("빈 트리거가 있습니다 (항목 {index})")]
    EmptyTrigger { index: usize },
    #[error("트리거가 정규화되어 있지 않습니다: {trigger:?}")]
    NotNormalized { trigger: String },
    #[error("중복된 트리거: {trigger:?}")]
    DuplicateTrigger { trigger: String },
    #[error("빈 답변이 있습니다: {trigger:?}")]
    EmptyReply { trigger: String },
    #[error("응답 테이블에 항목이 없습니다")]
    Empty,
    #[error("응답 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("응답 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
}

/// 불변 응답 테이블과 매칭 실패 시의 기본 답변.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    entries: Vec<ResponseEntry>,
    fallback: ResponsePair,
}

impl ResponseTable {
    /// 항목을 검증한 뒤 테이블을 만든다. 순서는 그대로 보존한다.
    pub fn new(entries: Vec<ResponseEntry>, fallback: ResponsePair) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.trigger.is_empty() {
                return Err(TableError::EmptyTrigger { index });
            }
            if normalize_trigger(&entry.trigger) != entry.trigger {
                return Err(TableError::NotNormalized {
                    trigger: entry.trigger.clone(),
                });
            }
            if !seen.insert(entry.trigger.as_str()) {
                return Err(TableError::DuplicateTrigger {
                    trigger: entry.trigger.clone(),
                });
            }
            check_reply(&entry.trigger, &entry.reply)?;
        }
        check_reply("<fallback>", &fallback)?;
        Ok(Self { entries, fallback })
    }

    /// 내장 Seen-Zone 테이블.
    pub fn built_in() -> Self {
        Self {
            entries: BUILT_IN
                .iter()
                .map(|raw| ResponseEntry {
                    trigger: raw.trigger.to_string(),
                    reply: ResponsePair::new(raw.english, raw.hinglish),
                })
                .collect(),
            fallback: ResponsePair::new(FALLBACK_ENGLISH, FALLBACK_HINGLISH),
        }
    }

    /// TOML 응답 파일을 읽는다. 형식은 [`parse_table`] 참고.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let content = fs::read_to_string(path)?;
        parse_table(&content)
    }

    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &ResponsePair {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 트리거와 정확히 같은 키를 찾는다.
    pub fn get(&self, trigger: &str) -> Option<&ResponseEntry> {
        self.entries.iter().find(|e| e.trigger == trigger)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.trigger.as_str())
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::built_in()
    }
}

fn check_reply(trigger: &str, reply: &ResponsePair) -> Result<(), TableError> {
    if reply.primary.trim().is_empty() || reply.alternate.trim().is_empty() {
        return Err(TableError::EmptyReply {
            trigger: trigger.to_string(),
        });
    }
    Ok(())
}

/// 입력 정규화와 같은 규칙(trim + 소문자)으로 트리거를 정리한다.
pub fn normalize_trigger(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Deserialize)]
struct TableFile {
    fallback: Option<ResponsePair>,
    #[serde(default, rename = "response")]
    responses: Vec<EntryFile>,
}

#[derive(Debug, Deserialize)]
struct EntryFile {
    trigger: String,
    primary: String,
    alternate: String,
}

/// TOML 문자열로부터 테이블을 만든다.
///
/// ```toml
/// [fallback]
/// primary = "..."
/// alternate = "..."
///
/// [[response]]
/// trigger = "hi"
/// primary = "Hey there!"
/// alternate = "Arre, hello!"
/// ```
///
/// `[[response]]` 배열의 순서가 곧 매칭 순서다. 트리거는 정규화해서 저장하며,
/// `fallback` 이 없으면 내장 기본 답변을 쓴다.
pub fn parse_table(src: &str) -> Result<ResponseTable, TableError> {
    let file: TableFile = toml::from_str(src)?;
    let entries = file
        .responses
        .into_iter()
        .map(|e| ResponseEntry {
            trigger: normalize_trigger(&e.trigger),
            reply: ResponsePair::new(e.primary, e.alternate),
        })
        .collect();
    let fallback = file
        .fallback
        .unwrap_or_else(|| ResponsePair::new(FALLBACK_ENGLISH, FALLBACK_HINGLISH));
    ResponseTable::new(entries, fallback)
}

struct RawEntry {
    trigger: &'static str,
    english: &'static str,
    hinglish: &'static str,
}

const fn raw(trigger: &'static str, english: &'static str, hinglish: &'static str) -> RawEntry {
    RawEntry {
        trigger,
        english,
        hinglish,
    }
}

pub const FALLBACK_ENGLISH: &str = "I might have seen your message... still thinking what to say 😅";
pub const FALLBACK_HINGLISH: &str = "Haan, maine tumhara message dekh liya hai... abhi soch raha hoon ki kya reply karun! Thoda wait karo na yaar 😅";

const BUILT_IN: &[RawEntry] = &[
    // 인사
    raw(
        "hi",
        "Hey there! Thanks for not leaving me on seen like the others 😅",
        "Arre, Hello! Thank God, tumne mujhe seen nahi kiya 😅",
    ),
    raw(
        "hello",
        "Hi! You actually replied — I’m impressed!",
        "Hi 👋, tumne sach mein reply kiya — Impressed hoon!",
    ),
    raw(
        "yo",
        "Yo! Thanks for not ghosting me already 😂",
        "Yo! Shukriya, tumne abhi tak ghosting shuru nahi ki 😂",
    ),
    // 일반
    raw(
        "why did you leave me on seen",
        "Oops, my bad! I was reading your message emotionally before replying 😅",
        "Oops, sorry! Main tumhare message ko pehle 'feel' kar raha tha, phir reply karta 😅",
    ),
    raw(
        "kyun",
        "Oops, my bad! I was reading your message emotionally before replying 😅",
        "Kyun reply nahi kiya? Main tumhare message ko pehle 'feel' kar raha tha, phir jawab deta 😅",
    ),
    raw(
        "ignore",
        "Never! I’m just buffering feelings before sending words 💭",
        "Kabhi nahi! Bas thoda 'feelings' ko buffer kar raha hoon, taaki sahi shabd mil jayein 💭",
    ),
    raw(
        "reply",
        "I did mentally… just forgot to hit send! 😬",
        "Maine mentally toh reply kar diya tha... bas 'send' button dabana bhool gaya! 😬",
    ),
    raw(
        "online but not replying",
        "Online ≠ mentally available. Sometimes I’m just scrolling pain 😔",
        "Online hone ka matlab mentally available hona nahi hota. Kabhi-kabhi bas scrolling pain dekh raha hota hoon 😔",
    ),
    raw(
        "jawab",
        "I did mentally… just forgot to hit send! 😬",
        "Maine mentally toh jawab de diya tha... bas 'send' button dabana bhool gaya! 😬",
    ),
    raw(
        "busy",
        "Everyone's busy, but if they care, they make 5 seconds for a text 🕰",
        "Sab busy hain, par agar care karte hain, toh 5 second nikal hi lete hain text ke liye 🕰",
    ),
    raw(
        "fast reply",
        "I believe in slow and meaningful replies… not speed typing 🐢",
        "Main jaldi type karne mein nahi, 'slow and meaningful' replies mein believe karta hoon 🐢",
    ),
    raw(
        "did you see",
        "I did, and I’m processing it like a deep thinker 🧠✨",
        "Maine dekh liya, aur main ise ek **deep thinker ki tarah process kar raha hoon 🧠✨",
    ),
    raw(
        "you there",
        "I’m here — just typing… deleting… retyping… overthinking 😅",
        "Main yahin hoon — bas type kar raha hoon... delete kar raha hoon... phir overthink kar raha hoon 😅",
    ),
    raw(
        "left me on read",
        "Okay okay, guilty 😬 — but my intentions are pure, I swear!",
        "Theek hai, theek hai, guilty hoon 😬 — par meri intentions achhi hain, I swear!",
    ),
    raw(
        "revenge",
        "Hmm… karma’s just balancing the chat logs 😏",
        "Hmm… karma bas chat logs ko balance kar raha hai 😏",
    ),
    // 감정/리액션
    raw(
        "hurts",
        "True. Silence speaks louder than seen 💔",
        "Sahi baat hai. Silence toh 'seen' se bhi zyada loud hota hai 💔",
    ),
    raw(
        "dukh",
        "True. Silence speaks louder than seen 💔",
        "Jab reply nahi aata toh dukh hota hai. Silence toh 'seen' se bhi zyada loud hota hai 💔",
    ),
    raw(
        "feels",
        "Like sending your heart and getting two blue ticks back 💙💙",
        "Aisa lagta hai jaise dil bheja, aur badle mein sirf **do blue ticks mile 💙💙",
    ),
    raw(
        "invisible",
        "You’re not invisible — just texting people with selective eyesight 😅",
        "Tum invisible nahi ho — bas selective eyesight waale logon ko text kar rahe ho 😅",
    ),
    raw(
        "ghosting",
        "Nah, I’m a friendly ghost — I come back after snacks 👻🍕",
        "Nah, main friendly ghost hoon — snacks kha kar wapas aa jaata hoon 👻🍕",
    ),
    raw(
        "bhoot",
        "Nah, I’m a friendly ghost — I come back after snacks 👻🍕",
        "Main bhoot nahi, friendly ghost hoon — snacks kha kar wapas aa jaata hoon 👻🍕",
    ),
    raw(
        "overthinking",
        "Don't overthink! 99% of 'seen' issues are just low battery or bad Wi-Fi. 🔋",
        "Overthink mat karo! 99% 'seen' issues low battery ya poor Wi-Fi ki wajah se hote hain. 🔋",
    ),
    raw(
        "rude",
        "Depends — sometimes peace > replies ✌",
        "Depend karta hai — kabhi-kabhi peace zyada zaroori hota hai reply se ✌",
    ),
    raw(
        "gossip",
        "Drama has better Wi-Fi connection 📶💅",
        "Drama ka Wi-Fi connection zyada strong hota hai 📶💅",
    ),
    // 진지한 이야기
    raw(
        "psychology",
        "People avoid what makes them feel uncomfortable, even online",
        "Log us cheez se door bhaagte hain jo unhe uncomfortable feel karati hai, online bhi",
    ),
    raw(
        "boundaries",
        "Yes — boundaries aren’t rude, they’re healthy 💪",
        "Haan — boundaries rude nahi hoti, healthy hoti hain 💪",
    ),
    raw(
        "respect",
        "Not always — sometimes it’s emotional overload, not disrespect",
        "Hamesha nahi — kabhi-kabhi yeh emotional overload hota hai, disrespect nahi",
    ),
    // 관계
    raw(
        "dost",
        "Maybe they’re going through something. Try talking in person 🫶",
        "Ho sakta hai tumhara dost kisi problem se guzar raha ho. Face-to-face baat karne ki koshish karo 🫶",
    ),
    raw(
        "crush",
        "Don’t cry — maybe they’re drafting the perfect response… since 2018 😂",
        "Rona band karo — ho sakta hai woh 'perfect reply' draft kar rahe hon... 2018 se 😂",
    ),
    raw(
        "partner",
        "Depends — once is okay, pattern means problem 🚩",
        "Ek baar chalta hai, par agar baar-baar ho toh problem hai 🚩",
    ),
    raw(
        "interest",
        "Most times, yes — interest doesn’t need reminders ⚡",
        "Zyadatar time, haan — **interest ko baar-baar reminders ki zaroorat nahi hoti ⚡",
    ),
    raw(
        "double text",
        "Double text if it matters. Move on if it’s one-sided ❤",
        "Double text tab karo jab matter karta ho. Move on karo agar one-sided hai ❤",
    ),
    // 실전 조언
    raw(
        "kya karu",
        "Give it 24 hours. If they don't reply, assume they are busy and focus on your day. ☀",
        "24 ghante wait karo. Agar reply nahi aaya, toh maan lo ki woh busy hain aur apne din par focus karo. ☀",
    ),
    raw(
        "wait",
        "Wait once, text twice max, then walk away 🚶‍♂",
        "Ek baar wait karo, do baar text karo max, phir walk away 🚶‍♂",
    ),
    raw(
        "confront",
        "Confront calmly. Say: 'Hey, noticed you've been busy. Is everything okay, or should I not message for a while?'",
        "Shaanti se baat karo. Bolo: 'Hey, dekha ki tum busy ho. Sab theek hai, ya main thode din message na karun?'",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_table_passes_validation() {
        let table = ResponseTable::built_in();
        assert_eq!(table.len(), 35);
        let rebuilt = ResponseTable::new(table.entries().to_vec(), table.fallback().clone())
            .expect("built-in table is valid");
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn built_in_order_starts_with_greetings() {
        let table = ResponseTable::built_in();
        let first: Vec<&str> = table.triggers().take(3).collect();
        assert_eq!(first, ["hi", "hello", "yo"]);
        assert_eq!(table.triggers().last(), Some("confront"));
    }

    #[test]
    fn exact_lookup_by_trigger() {
        let table = ResponseTable::built_in();
        let entry = table.get("kya karu").expect("kya karu");
        assert!(entry.reply.pick(Language::English).starts_with("Give it 24 hours"));
        assert!(entry.reply.pick(Language::Hinglish).starts_with("24 ghante"));
        assert!(table.get("Kya Karu").is_none());
    }

    #[test]
    fn rejects_duplicate_and_unnormalized_triggers() {
        let pair = ResponsePair::new("a", "b");
        let entry = |t: &str| ResponseEntry {
            trigger: t.to_string(),
            reply: pair.clone(),
        };
        let dup = ResponseTable::new(vec![entry("hi"), entry("hi")], pair.clone());
        assert!(matches!(dup, Err(TableError::DuplicateTrigger { .. })));

        let upper = ResponseTable::new(vec![entry("Hi")], pair.clone());
        assert!(matches!(upper, Err(TableError::NotNormalized { .. })));

        let empty = ResponseTable::new(vec![entry("")], pair.clone());
        assert!(matches!(empty, Err(TableError::EmptyTrigger { index: 0 })));

        assert!(matches!(
            ResponseTable::new(Vec::new(), pair),
            Err(TableError::Empty)
        ));
    }

    #[test]
    fn rejects_blank_reply() {
        let entries = vec![ResponseEntry {
            trigger: "hi".into(),
            reply: ResponsePair::new("hello", "   "),
        }];
        let err = ResponseTable::new(entries, ResponsePair::new("x", "y")).unwrap_err();
        assert!(matches!(err, TableError::EmptyReply { trigger } if trigger == "hi"));
    }

    #[test]
    fn parse_table_keeps_file_order_and_normalizes() {
        let src = r#"
[[response]]
trigger = "  Good Morning "
primary = "Morning!"
alternate = "Subah bakhair!"

[[response]]
trigger = "morning"
primary = "Still morning."
alternate = "Abhi bhi subah."
"#;
        let table = parse_table(src).expect("valid table");
        let triggers: Vec<&str> = table.triggers().collect();
        assert_eq!(triggers, ["good morning", "morning"]);
        assert_eq!(table.fallback().primary, FALLBACK_ENGLISH);
    }
}
