//! Compiled stylesheet handle

use std::ffi::CStr;
use std::ptr::NonNull;

use crate::diagnostics::Diagnostics;
use crate::sys;

/// A compiled XSLT stylesheet.
///
/// Owns the parsed stylesheet document as well as the compiled program;
/// both are released together, exactly once, when the handle is dropped.
/// The handle can be moved but not cloned.
#[derive(Debug)]
pub struct Stylesheet {
    ptr: NonNull<sys::xsltStylesheet>,
}

// Every engine call that touches the stylesheet, including the final free,
// runs while holding the `Diagnostics` lock.
unsafe impl Send for Stylesheet {}
unsafe impl Sync for Stylesheet {}

impl Stylesheet {
    /// Take ownership of a compiled stylesheet
    ///
    /// # Safety
    /// `ptr` must come from `xsltParseStylesheetDoc`, be error-free, and not
    /// be owned by anything else.
    pub(crate) unsafe fn from_raw(ptr: NonNull<sys::xsltStylesheet>) -> Self {
        Self { ptr }
    }

    pub(crate) fn as_ptr(&self) -> sys::xsltStylesheetPtr {
        self.ptr.as_ptr()
    }

    /// Declared `xsl:output/@method`, if any
    pub fn output_method(&self) -> Option<String> {
        unsafe { xml_str((*self.ptr.as_ptr()).method) }
    }

    /// Declared `xsl:output/@encoding`, if any
    pub fn output_encoding(&self) -> Option<String> {
        unsafe { xml_str((*self.ptr.as_ptr()).encoding) }
    }

    /// Release the stylesheet now rather than at end of scope
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for Stylesheet {
    fn drop(&mut self) {
        let _diagnostics = Diagnostics::acquire();
        unsafe { sys::xsltFreeStylesheet(self.ptr.as_ptr()) };
        tracing::trace!("stylesheet released");
    }
}

unsafe fn xml_str(p: *const sys::xmlChar) -> Option<String> {
    if p.is_null() {
        return None;
    }
    Some(
        CStr::from_ptr(p as *const std::ffi::c_char)
            .to_string_lossy()
            .into_owned(),
    )
}
