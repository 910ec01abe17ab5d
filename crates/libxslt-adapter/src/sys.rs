//! Raw bindings to the parts of libxml2, libxslt and libexslt this crate uses.
//!
//! Only the leading fields of `xsltStylesheet` are declared; the struct is
//! always handled through a pointer owned by libxslt, never constructed or
//! sized on the Rust side.

#![allow(non_camel_case_types, non_snake_case, non_upper_case_globals, dead_code)]

use std::ffi::{c_char, c_int, c_uchar, c_void};

pub type xmlChar = c_uchar;

#[repr(C)]
pub struct xmlDoc {
    _private: [u8; 0],
}

pub type xmlDocPtr = *mut xmlDoc;

/// `xmlError` from `xmlerror.h`
#[repr(C)]
pub struct xmlError {
    pub domain: c_int,
    pub code: c_int,
    pub message: *mut c_char,
    pub level: c_int,
    pub file: *mut c_char,
    pub line: c_int,
    pub str1: *mut c_char,
    pub str2: *mut c_char,
    pub str3: *mut c_char,
    pub int1: c_int,
    pub int2: c_int,
    pub ctxt: *mut c_void,
    pub node: *mut c_void,
}

pub const XML_ERR_NONE: c_int = 0;
pub const XML_ERR_WARNING: c_int = 1;
pub const XML_ERR_ERROR: c_int = 2;
pub const XML_ERR_FATAL: c_int = 3;

/// Leading fields of `xsltStylesheet` from `xsltInternals.h`, up to `errors`.
#[repr(C)]
pub struct xsltStylesheet {
    pub parent: *mut xsltStylesheet,
    pub next: *mut xsltStylesheet,
    pub imports: *mut xsltStylesheet,
    pub docList: *mut c_void,
    pub doc: xmlDocPtr,
    pub stripSpaces: *mut c_void,
    pub stripAll: c_int,
    pub cdataSection: *mut c_void,
    pub variables: *mut c_void,
    pub templates: *mut c_void,
    pub templatesHash: *mut c_void,
    pub rootMatch: *mut c_void,
    pub keyMatch: *mut c_void,
    pub elemMatch: *mut c_void,
    pub attrMatch: *mut c_void,
    pub parentMatch: *mut c_void,
    pub textMatch: *mut c_void,
    pub piMatch: *mut c_void,
    pub commentMatch: *mut c_void,
    pub nsAliases: *mut c_void,
    pub attributeSets: *mut c_void,
    pub nsHash: *mut c_void,
    pub nsDefs: *mut c_void,
    pub keys: *mut c_void,
    pub method: *mut xmlChar,
    pub methodURI: *mut xmlChar,
    pub version: *mut xmlChar,
    pub encoding: *mut xmlChar,
    pub omitXmlDeclaration: c_int,
    pub decimalFormat: *mut c_void,
    pub standalone: c_int,
    pub doctypePublic: *mut xmlChar,
    pub doctypeSystem: *mut xmlChar,
    pub indent: c_int,
    pub mediaType: *mut xmlChar,
    pub preComps: *mut c_void,
    pub warnings: c_int,
    pub errors: c_int,
}

pub type xsltStylesheetPtr = *mut xsltStylesheet;

pub type xmlFreeFunc = Option<unsafe extern "C" fn(mem: *mut c_void)>;

/// `xmlGenericErrorFunc`, shared by libxml2 and libxslt
pub type xmlGenericErrorFunc =
    Option<unsafe extern "C" fn(ctx: *mut c_void, msg: *const c_char, ...)>;

#[link(name = "xml2")]
extern "C" {
    pub static xmlFree: xmlFreeFunc;

    pub fn xmlCheckVersion(version: c_int);
    pub fn xmlInitParser();
    pub fn xmlParseMemory(buffer: *const c_char, size: c_int) -> xmlDocPtr;
    pub fn xmlFreeDoc(cur: xmlDocPtr);
    pub fn xmlGetLastError() -> *const xmlError;
    pub fn xmlResetLastError();
    pub fn xmlSetGenericErrorFunc(ctx: *mut c_void, handler: xmlGenericErrorFunc);
}

#[link(name = "xslt")]
extern "C" {
    pub static xsltLibxsltVersion: c_int;
    pub static xsltLibxmlVersion: c_int;

    pub fn xsltInit();
    pub fn xsltSetGenericErrorFunc(ctx: *mut c_void, handler: xmlGenericErrorFunc);
    pub fn xsltParseStylesheetDoc(doc: xmlDocPtr) -> xsltStylesheetPtr;
    pub fn xsltFreeStylesheet(style: xsltStylesheetPtr);
    pub fn xsltApplyStylesheet(
        style: xsltStylesheetPtr,
        doc: xmlDocPtr,
        params: *mut *const c_char,
    ) -> xmlDocPtr;
    pub fn xsltSaveResultToString(
        doc_txt_ptr: *mut *mut xmlChar,
        doc_txt_len: *mut c_int,
        result: xmlDocPtr,
        style: xsltStylesheetPtr,
    ) -> c_int;
}

// csrc/error_shim.c, built by build.rs. Formats the message and passes it to
// the `fn(*const c_char)` given as `ctx`.
extern "C" {
    pub fn libxslt_adapter_generic_error(ctx: *mut c_void, msg: *const c_char, ...);
}

#[link(name = "exslt")]
extern "C" {
    pub fn exsltRegisterAll();
}

/// libxml2 version the bindings above were written against (2.9.0)
pub const LIBXML_MIN_VERSION: c_int = 20900;
