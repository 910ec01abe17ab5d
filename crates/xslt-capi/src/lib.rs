//! C-compatible facade over the libxslt adapter.
//!
//! This crate exposes `extern "C"` functions and `#[repr(C)]` types that
//! let C consumers compile stylesheets, apply them, and marshal parameters
//! without touching libxslt directly.
//!
//! # Symbol prefix
//!
//! - Functions: `xslt_*`
//! - Types: `Xslt*`
//!
//! # Lifecycle
//!
//! 1. `xslt_init()` once, before anything else.
//! 2. `xslt_make_style()` to compile; the handle is released with
//!    `xslt_free_style()`.
//! 3. `xslt_make_param_array()` / `xslt_set_param()` to build parameters,
//!    `xslt_free_param_array()` to release them.
//! 4. `xslt_apply_style()` as many times as needed; each successful call
//!    hands back a buffer that must be released with `xslt_free_output()`.
//!
//! # Thread safety
//!
//! Calls may come from any thread. Engine work is serialized internally.

pub mod functions;
mod panic_guard;
pub mod types;

pub use functions::*;
pub use types::{XsltParams, XsltStatus, XsltStyle, XSLT_CAPI_ABI_VERSION};
