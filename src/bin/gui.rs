#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 채팅 창 진입점.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use eframe::{egui, App, Frame};
use seen_zone_chatbot::{
    app::{ChatSession, PendingReply, SessionOptions},
    config,
    i18n::{keys, Translator},
    logging,
    transcript::{ChatMessage, Role},
};

const USER_BUBBLE: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const BOT_BUBBLE: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
const BOT_TEXT: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(67, 56, 202);

fn main() -> Result<(), eframe::Error> {
    logging::init();
    let args = parse_args(std::env::args().skip(1));

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let app_cfg = config::load_or_default(&config_path).unwrap_or_else(|err| {
        log::warn!("설정을 읽지 못해 기본값을 사용합니다: {err}");
        config::Config::default()
    });
    let session = match ChatSession::from_config(&app_cfg, &args.session) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("오류: {err}");
            std::process::exit(1);
        }
    };

    let title = Translator::new(session.language()).t(keys::APP_TITLE);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([420.0, 640.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(session))),
    )
}

#[derive(Debug, Default)]
struct GuiArgs {
    config: Option<PathBuf>,
    session: SessionOptions,
}

/// `--lang xx`, `--lang=xx`, `-L xx`, `--config path`, `--responses path`, `--no-delay`
fn parse_args(args: impl Iterator<Item = String>) -> GuiArgs {
    let mut out = GuiArgs::default();
    let args: Vec<String> = args.collect();
    let mut i = 0;
    while i < args.len() {
        let a = args[i].as_str();
        let next = args.get(i + 1).cloned();
        if let Some(val) = a.strip_prefix("--lang=") {
            out.session.language = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--config=") {
            out.config = Some(PathBuf::from(val));
        } else if let Some(val) = a.strip_prefix("--responses=") {
            out.session.responses_path = Some(PathBuf::from(val));
        } else if a == "--no-delay" {
            out.session.no_delay = true;
        } else if let Some(val) = next {
            match a {
                "--lang" | "-L" => out.session.language = Some(val),
                "--config" => out.config = Some(PathBuf::from(val)),
                "--responses" => out.session.responses_path = Some(PathBuf::from(val)),
                _ => {
                    i += 1;
                    continue;
                }
            }
            i += 1;
        }
        i += 1;
    }
    out
}

struct GuiApp {
    session: ChatSession,
    tr: Translator,
    input: String,
    pending: VecDeque<PendingReply>,
}

impl GuiApp {
    fn new(session: ChatSession) -> Self {
        Self {
            tr: Translator::new(session.language()),
            session,
            input: String::new(),
            pending: VecDeque::new(),
        }
    }

    fn submit(&mut self) {
        if let Some(reply) = self.session.send(&self.input) {
            self.pending.push_back(reply);
        }
        self.input.clear();
    }

    fn toggle_language(&mut self) {
        let lang = self.session.toggle_language();
        self.tr.set_language(lang);
    }

    /// 표시 시각이 지난 답변을 기록에 옮긴다.
    fn deliver_due(&mut self, now: Instant) {
        while self.pending.front().is_some_and(|p| p.is_ready(now)) {
            if let Some(reply) = self.pending.pop_front() {
                self.session.deliver(reply);
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now = Instant::now();
        self.deliver_due(now);
        if let Some(next) = self.pending.front() {
            ctx.request_repaint_after(next.remaining(now));
        }

        let mut toggle = false;
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::default().fill(HEADER_FILL).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.tr.t(keys::APP_TITLE))
                            .strong()
                            .size(18.0)
                            .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        toggle = ui.button(self.tr.t(keys::CHAT_SWITCH_LANGUAGE)).clicked();
                    });
                });
            });
        if toggle {
            self.toggle_language();
        }

        let mut send = false;
        egui::TopBottomPanel::bottom("input")
            .frame(egui::Frame::default().fill(egui::Color32::WHITE).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let can_send = !self.input.trim().is_empty();
                    let button = egui::Button::new(self.tr.t(keys::CHAT_SEND)).fill(USER_BUBBLE);
                    let clicked = ui.add_enabled(can_send, button).clicked();
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut self.input)
                            .hint_text(self.tr.t(keys::CHAT_PLACEHOLDER))
                            .desired_width(f32::INFINITY),
                    );
                    let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if clicked || entered {
                        send = true;
                        edit.request_focus();
                    }
                });
            });
        if send {
            self.submit();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for msg in self.session.transcript().messages() {
                        message_bubble(ui, msg);
                    }
                    if !self.pending.is_empty() {
                        ui.weak(self.tr.t(keys::CHAT_TYPING));
                    }
                });
        });
    }
}

fn message_bubble(ui: &mut egui::Ui, msg: &ChatMessage) {
    let (fill, text_color, layout) = match msg.role {
        Role::User => (
            USER_BUBBLE,
            egui::Color32::WHITE,
            egui::Layout::right_to_left(egui::Align::TOP),
        ),
        Role::Bot => (
            BOT_BUBBLE,
            BOT_TEXT,
            egui::Layout::left_to_right(egui::Align::TOP),
        ),
    };
    let max_width = ui.available_width() * 0.85;
    ui.with_layout(layout, |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(10.0)
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.add(
                    egui::Label::new(egui::RichText::new(msg.text.as_str()).color(text_color))
                        .wrap(true),
                );
            });
    });
    ui.add_space(6.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use seen_zone_chatbot::{Language, Matcher};
    use std::time::Duration;

    fn app(delay: Duration) -> GuiApp {
        GuiApp::new(ChatSession::new(Matcher::default(), Language::English, delay))
    }

    #[test]
    fn reply_waits_until_due() {
        let mut app = app(Duration::from_secs(60));
        app.input = "busy?".into();
        app.submit();
        assert!(app.input.is_empty());
        assert_eq!(app.pending.len(), 1);

        app.deliver_due(Instant::now());
        assert_eq!(app.session.transcript().len(), 2);

        app.deliver_due(Instant::now() + Duration::from_secs(61));
        assert!(app.pending.is_empty());
        let last = app.session.transcript().last().expect("bot reply");
        assert_eq!(last.role, Role::Bot);
        assert!(last.text.starts_with("Everyone's busy"));
    }

    #[test]
    fn blank_input_is_not_sent() {
        let mut app = app(Duration::ZERO);
        app.input = "   ".into();
        app.submit();
        assert!(app.pending.is_empty());
        assert_eq!(app.session.transcript().len(), 1);
    }

    #[test]
    fn toggle_switches_button_label() {
        let mut app = app(Duration::ZERO);
        assert_eq!(app.tr.t(keys::CHAT_SWITCH_LANGUAGE), "Switch to Hinglish");
        app.toggle_language();
        assert_eq!(app.session.language(), Language::Hinglish);
        assert_eq!(app.tr.t(keys::CHAT_SWITCH_LANGUAGE), "Switch to English");
    }

    #[test]
    fn parses_lang_and_paths() {
        let args = parse_args(
            ["--lang=english", "--responses", "r.toml", "--no-delay", "--config", "c.toml"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(args.session.language.as_deref(), Some("english"));
        assert_eq!(args.session.responses_path, Some(PathBuf::from("r.toml")));
        assert!(args.session.no_delay);
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
    }
}
