
/// Routes the crate's `log` output through the test harness. Safe to call from every test.
pub(crate) fn init_logging() {
    use simplelog::{Config, LevelFilter, TestLogger};

    // Another test may have installed it already.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
