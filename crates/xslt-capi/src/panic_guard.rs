//! Keep panics from unwinding across the C boundary

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::types::XsltStatus;

pub(crate) fn guard<F>(name: &'static str, f: F) -> XsltStatus
where
    F: FnOnce() -> XsltStatus,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => {
            tracing::error!(function = name, "panic caught at the C boundary");
            XsltStatus::InternalError
        }
    }
}

/// Like [`guard`] for functions without a status to report
pub(crate) fn guard_unit<F>(name: &'static str, f: F)
where
    F: FnOnce(),
{
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        tracing::error!(function = name, "panic caught at the C boundary");
    }
}
