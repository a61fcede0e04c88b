use panf_log::{Color, Level, LevelFmt, LogError, LogFmt};

// One test so the before/after `init` states cannot interleave.
#[test]
fn global_logger_lifecycle() {
    assert!(!panf_log::is_initialized());
    assert!(!panf_log::error!("dropped before init"));
    assert!(matches!(
        panf_log::info_fmt(|builder| {
            builder.message(|spec| spec);
        }),
        Err(LogError::Uninitialized),
    ));
    assert!(matches!(
        panf_log::custom_fmt(LogFmt::default()),
        Err(LogError::Uninitialized),
    ));

    panf_log::init();
    panf_log::init();
    assert!(panf_log::is_initialized());

    panf_log::warn_fmt(|builder| {
        builder
            .text("[", |spec| spec)
            .level(|spec| spec.with_color_spec(|color_spec| {
                color_spec.set_fg(Some(Color::Yellow));
            }))
            .text("] ", |spec| spec)
            .message(|spec| spec);
    }).unwrap();

    let fmt = panf_log::custom_fmt(LogFmt::build(|builder| {
        builder.message(|spec| spec);
    })).unwrap();
    // `Always` bypasses every filter, including the default `error` base level.
    assert!(panf_log::log(
        module_path!(),
        LevelFmt::Other(fmt, Level::Always),
        format_args!("custom format"),
    ).unwrap());
}
