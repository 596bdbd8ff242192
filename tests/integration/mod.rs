//! Shared setup for the HTTP integration tests.

pub mod document_fetch_test;
pub mod form_post_test;
pub mod json_fetch_test;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging (run once).
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
