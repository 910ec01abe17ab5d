//! `#[repr(C)]` and opaque types shared with C callers

use libxslt_adapter::{FlatParams, Stylesheet};
use xslt_engine_traits::{Error, ErrorKind};

/// Version of this C ABI
pub const XSLT_CAPI_ABI_VERSION: u32 = 1;

/// Status returned by every fallible facade function
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XsltStatus {
    Ok = 0,
    SizeError = 1,
    ParseError = 2,
    CompileError = 3,
    TransformError = 4,
    InvalidArgument = 5,
    NotInitialized = 6,
    InternalError = 7,
}

impl From<&Error> for XsltStatus {
    fn from(err: &Error) -> Self {
        match err.kind() {
            ErrorKind::Size => XsltStatus::SizeError,
            ErrorKind::Parse => XsltStatus::ParseError,
            ErrorKind::Compile => XsltStatus::CompileError,
            ErrorKind::Transform => XsltStatus::TransformError,
            ErrorKind::InvalidParameter => XsltStatus::InvalidArgument,
            ErrorKind::Config => XsltStatus::InternalError,
        }
    }
}

/// Opaque compiled stylesheet
pub struct XsltStyle(pub(crate) Stylesheet);

/// Opaque parameter array built with `xslt_set_param`
pub struct XsltParams(pub(crate) FlatParams);
