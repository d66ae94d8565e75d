use cmdkit_logger::{LogFormat, Logger, LoggerError};

#[test]
fn rejected_settings_leave_the_global_slot_free() {
    let err = Logger::builder("slot").directives("slot=chatty").init().unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

    let _logger = Logger::builder("slot")
        .console(Some(LogFormat::Compact))
        .init()
        .expect("first valid init installs the subscriber");

    let err = Logger::builder("slot-json")
        .console(Some(LogFormat::Json))
        .init()
        .expect_err("a second subscriber cannot be installed");
    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
