//! Owned libxml2 document trees

use std::ffi::c_char;
use std::ptr::NonNull;

use xslt_engine_traits::{Error, Result};

use crate::diagnostics::Diagnostics;
use crate::sys;

/// A parsed document tree, freed exactly once when dropped.
///
/// Trees are only created and dropped inside a [`Diagnostics`] scope, so
/// an `XmlDocument` must be declared after the scope that guards it.
#[derive(Debug)]
pub(crate) struct XmlDocument {
    ptr: NonNull<sys::xmlDoc>,
}

impl XmlDocument {
    /// Parse `text`, failing if the parser returns no tree or records
    /// any diagnostic. `len` is the already range-checked length of `text`.
    pub(crate) fn parse(diagnostics: &mut Diagnostics, text: &[u8], len: i32) -> Result<Self> {
        let raw = unsafe { sys::xmlParseMemory(text.as_ptr() as *const c_char, len) };
        let doc = NonNull::new(raw).map(|ptr| XmlDocument { ptr });

        if let Some(diagnostic) = diagnostics.take() {
            // `doc`, if any, is dropped here
            return Err(Error::parse(diagnostic.to_string()));
        }
        doc.ok_or_else(|| Error::parse("parser produced no document"))
    }

    /// Wrap a tree returned by the engine
    pub(crate) fn from_raw(raw: sys::xmlDocPtr) -> Option<Self> {
        NonNull::new(raw).map(|ptr| XmlDocument { ptr })
    }

    pub(crate) fn as_ptr(&self) -> sys::xmlDocPtr {
        self.ptr.as_ptr()
    }

    /// Give up ownership; the caller becomes responsible for freeing the tree
    pub(crate) fn into_raw(self) -> sys::xmlDocPtr {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }
}

impl Drop for XmlDocument {
    fn drop(&mut self) {
        unsafe { sys::xmlFreeDoc(self.ptr.as_ptr()) };
    }
}
