/// Initializes `env_logger` once per test binary, matching the teacher's
/// `tests/` convention of plain `#[test]` functions rather than a custom
/// harness. Safe to call from every test; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
