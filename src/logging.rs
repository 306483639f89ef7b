//! env_logger 초기화. RUST_LOG 가 있으면 그 필터를 쓴다.

use log::LevelFilter;

/// 로거를 초기화한다. 두 번 호출해도 패닉하지 않는다.
pub fn init() {
    let mut builder = env_logger::Builder::new();

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(LevelFilter::Warn);
        // GUI 의존성 로그는 너무 많다
        builder.filter_module("eframe", LevelFilter::Warn);
        builder.filter_module("egui", LevelFilter::Warn);
        builder.filter_module("wgpu", LevelFilter::Warn);
    }

    builder.format_timestamp_secs().format_target(true);

    if builder.try_init().is_ok() {
        log::debug!("logger initialized");
    }
}
