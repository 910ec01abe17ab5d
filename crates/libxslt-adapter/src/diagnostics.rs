//! Scoped access to the engine's last-error state
//!
//! libxml2 records parse problems in a last-error slot that is shared by
//! every caller. All engine work happens inside a [`Diagnostics`] scope,
//! which holds the engine lock for its lifetime and leaves the slot clear
//! on entry and on exit, so one call's diagnostics can never be attributed
//! to another.
//!
//! The libraries also print human-readable messages through their generic
//! error handlers. Those are routed to `tracing` (target `libxslt`) and
//! collected per scope so error values can carry the library's own text.

use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::sys;

static ENGINE_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static MESSAGES: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Severity of a recorded diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
    Fatal,
}

impl Level {
    fn from_raw(level: i32) -> Self {
        match level {
            sys::XML_ERR_WARNING => Level::Warning,
            sys::XML_ERR_FATAL => Level::Fatal,
            _ => Level::Error,
        }
    }
}

/// Snapshot of one libxml2 error record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub domain: i32,
    pub code: i32,
    pub level: Level,
    pub line: i32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Exclusive, self-clearing view of the engine's error state
///
/// The lock is not re-entrant. A scope is only ever held inside one engine
/// entry point (`initialize_with`, `compile_bytes`, `apply_flat`, or the
/// stylesheet's drop) and is released before that function returns, so no
/// engine call or [`Stylesheet`](crate::Stylesheet) drop happens while a
/// scope is alive. This type stays crate-private to keep it that way.
pub(crate) struct Diagnostics {
    _guard: MutexGuard<'static, ()>,
}

impl Diagnostics {
    /// Take the engine lock and clear any stale error record
    pub(crate) fn acquire() -> Self {
        let guard = ENGINE_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        unsafe { sys::xmlResetLastError() };
        // libxml2 keeps its handler per thread
        route_parser_messages();
        clear_messages();
        Self { _guard: guard }
    }

    /// Read the last recorded error, if any, and clear it
    pub(crate) fn take(&mut self) -> Option<Diagnostic> {
        let diagnostic = unsafe { read_last_error() };
        if diagnostic.is_some() {
            unsafe { sys::xmlResetLastError() };
            tracing::trace!("diagnostics cleared");
        }
        diagnostic
    }

    /// Messages the libraries printed since the scope was acquired, one
    /// per line joined with `"; "`, and clear them
    pub(crate) fn take_messages(&mut self) -> Option<String> {
        let raw = MESSAGES
            .try_with(|buf| buf.try_borrow_mut().map(|mut buf| std::mem::take(&mut *buf)))
            .ok()?
            .ok()?;
        let joined = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        (!joined.is_empty()).then_some(joined)
    }
}

impl Drop for Diagnostics {
    fn drop(&mut self) {
        unsafe { sys::xmlResetLastError() };
        clear_messages();
    }
}

/// Install the message handler for libxslt (process-wide) and for libxml2
/// on the calling thread
pub(crate) fn route_library_messages() {
    unsafe {
        sys::xsltSetGenericErrorFunc(sink_context(), Some(sys::libxslt_adapter_generic_error));
    }
    route_parser_messages();
}

fn route_parser_messages() {
    unsafe {
        sys::xmlSetGenericErrorFunc(sink_context(), Some(sys::libxslt_adapter_generic_error));
    }
}

fn sink_context() -> *mut c_void {
    collect_message as unsafe extern "C" fn(*const c_char) as *mut c_void
}

fn clear_messages() {
    let _ = MESSAGES.try_with(|buf| {
        if let Ok(mut buf) = buf.try_borrow_mut() {
            buf.clear();
        }
    });
}

/// Receives formatted text from `csrc/error_shim.c`
unsafe extern "C" fn collect_message(message: *const c_char) {
    if message.is_null() {
        return;
    }
    let text = CStr::from_ptr(message).to_string_lossy();
    // Must not unwind into C
    let _ = std::panic::catch_unwind(|| {
        let trimmed = text.trim_end();
        if !trimmed.is_empty() {
            tracing::debug!(target: "libxslt", "{trimmed}");
        }
        let _ = MESSAGES.try_with(|buf| {
            if let Ok(mut buf) = buf.try_borrow_mut() {
                buf.push_str(&text);
            }
        });
    });
}

unsafe fn read_last_error() -> Option<Diagnostic> {
    let err = sys::xmlGetLastError();
    if err.is_null() || (*err).code == 0 {
        return None;
    }
    let err = &*err;
    let message = if err.message.is_null() {
        String::from("unknown error")
    } else {
        CStr::from_ptr(err.message)
            .to_string_lossy()
            .trim_end()
            .to_string()
    };
    Some(Diagnostic {
        domain: err.domain,
        code: err.code,
        level: Level::from_raw(err.level),
        line: err.line,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_when_known() {
        let d = Diagnostic {
            domain: 1,
            code: 76,
            level: Level::Fatal,
            line: 3,
            message: "Opening and ending tag mismatch".into(),
        };
        assert_eq!(d.to_string(), "line 3: Opening and ending tag mismatch (code 76)");
    }

    #[test]
    fn level_mapping() {
        assert_eq!(Level::from_raw(sys::XML_ERR_WARNING), Level::Warning);
        assert_eq!(Level::from_raw(sys::XML_ERR_ERROR), Level::Error);
        assert_eq!(Level::from_raw(sys::XML_ERR_FATAL), Level::Fatal);
    }

    #[test]
    fn fresh_scope_has_nothing_to_take() {
        let mut diagnostics = Diagnostics::acquire();
        assert_eq!(diagnostics.take(), None);
        assert_eq!(diagnostics.take_messages(), None);
    }

    #[test]
    fn collected_messages_are_joined_per_line() {
        let mut diagnostics = Diagnostics::acquire();
        unsafe {
            collect_message(c"compilation error: element frobnicate\n".as_ptr());
            collect_message(c"  unknown element\n\n".as_ptr());
        }
        assert_eq!(
            diagnostics.take_messages().as_deref(),
            Some("compilation error: element frobnicate; unknown element")
        );
        assert_eq!(diagnostics.take_messages(), None);
    }

    #[test]
    fn messages_do_not_outlive_their_scope() {
        {
            let _diagnostics = Diagnostics::acquire();
            unsafe { collect_message(c"stale\n".as_ptr()) };
        }
        let mut diagnostics = Diagnostics::acquire();
        assert_eq!(diagnostics.take_messages(), None);
    }
}
