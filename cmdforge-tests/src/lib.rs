use cmdforge_core::Command;
use log::LevelFilter;
use std::{collections::HashSet, env};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Every `<prefix>name` marker of the text is bound to exactly one parameter, and every
/// parameter has a marker.
pub fn assert_markers_bound(command: &Command, prefix: char) {
    let mut markers = HashSet::new();
    let mut rest = command.text.as_str();
    while let Some(position) = rest.find(prefix) {
        rest = &rest[position + prefix.len_utf8()..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        markers.insert(&rest[..len]);
    }
    for marker in &markers {
        assert_eq!(
            command.parameters.iter().filter(|p| p.name == *marker).count(),
            1,
            "marker `{}` of {}",
            marker,
            command
        );
    }
    assert_eq!(
        markers.len(),
        command.parameters.len(),
        "markers and parameters of {}",
        command
    );
}
