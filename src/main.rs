use std::path::PathBuf;

use clap::Parser;
use seen_zone_chatbot::app::{self, ChatSession, SessionOptions};
use seen_zone_chatbot::{config, logging};

/// 터미널용 Seen-Zone 챗봇.
#[derive(Debug, Parser)]
#[command(name = "seen_zone_chatbot_cli", version)]
struct Cli {
    /// 답변 언어 (english / hinglish / auto)
    #[arg(short = 'L', long)]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 내장 테이블 대신 쓸 TOML 응답 파일
    #[arg(long)]
    responses: Option<PathBuf>,
    /// 답변 표시 지연을 끈다
    #[arg(long)]
    no_delay: bool,
    /// 한 번만 묻고 답변을 출력한 뒤 종료한다
    #[arg(short, long)]
    ask: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 대화 루프 또는 단발 질의를 실행한다.
fn main() {
    logging::init();
    if let Err(err) = try_run(Cli::parse()) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let cfg = config::load_or_default(&cli.config).unwrap_or_else(|err| {
        log::warn!("설정을 읽지 못해 기본값을 사용합니다: {err}");
        config::Config::default()
    });
    let opts = SessionOptions {
        language: cli.lang,
        responses_path: cli.responses,
        no_delay: cli.no_delay,
    };
    let mut session = ChatSession::from_config(&cfg, &opts)?;

    if let Some(question) = cli.ask {
        println!("{}", session.matcher().resolve(&question, session.language()));
        return Ok(());
    }
    app::run(&mut session)
}
