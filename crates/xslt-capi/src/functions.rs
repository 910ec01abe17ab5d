//! Exported `extern "C"` functions

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use libxslt_adapter::{FlatParams, LibxsltEngine};
use xslt_engine_traits::TransformOutput;

use crate::panic_guard::{guard, guard_unit};
use crate::types::{XsltParams, XsltStatus, XsltStyle, XSLT_CAPI_ABI_VERSION};

/// Return the C ABI version supported by this library.
#[no_mangle]
pub extern "C" fn xslt_abi_version() -> u32 {
    XSLT_CAPI_ABI_VERSION
}

/// Initialize the parser and register the EXSLT extension functions.
///
/// Must be called before any other `xslt_*` function. Calling it again is
/// harmless.
#[no_mangle]
pub extern "C" fn xslt_init() {
    guard_unit("xslt_init", || {
        LibxsltEngine::initialize();
    })
}

/// Compile a NUL-terminated XSL document.
///
/// On success `*out_style` receives a handle to release with
/// `xslt_free_style`; on failure it is set to NULL.
///
/// # Safety
/// `xsl` must be a valid NUL-terminated string. `out_style` must be a valid
/// pointer to writable storage.
#[no_mangle]
pub unsafe extern "C" fn xslt_make_style(
    xsl: *const c_char,
    out_style: *mut *mut XsltStyle,
) -> XsltStatus {
    if out_style.is_null() {
        return XsltStatus::InvalidArgument;
    }
    *out_style = ptr::null_mut();
    if xsl.is_null() {
        return XsltStatus::InvalidArgument;
    }

    guard("xslt_make_style", || {
        let Some(engine) = LibxsltEngine::get() else {
            return XsltStatus::NotInitialized;
        };
        let xsl = CStr::from_ptr(xsl).to_bytes();
        match engine.compile_bytes(xsl) {
            Ok(style) => {
                *out_style = Box::into_raw(Box::new(XsltStyle(style)));
                XsltStatus::Ok
            }
            Err(err) => {
                tracing::debug!(error = %err, "xslt_make_style failed");
                XsltStatus::from(&err)
            }
        }
    })
}

/// Apply a compiled stylesheet to a NUL-terminated XML document.
///
/// On success `*out_txt` holds the serialized result and `*out_len` its
/// length in bytes; the buffer is not NUL-terminated and must be released
/// with `xslt_free_output`. A successful transform with no output sets
/// `*out_txt` to NULL and `*out_len` to 0. On failure both are cleared.
///
/// `params` may be NULL. Only the leading populated pairs of a parameter
/// array are seen by the engine: an unset pair ends the list.
///
/// # Safety
/// `style` must be a live handle from `xslt_make_style`, `xml` a valid
/// NUL-terminated string, `params` NULL or a live array from
/// `xslt_make_param_array`, and `out_txt`/`out_len` valid writable pointers.
#[no_mangle]
pub unsafe extern "C" fn xslt_apply_style(
    style: *const XsltStyle,
    xml: *const c_char,
    params: *mut XsltParams,
    out_txt: *mut *mut c_char,
    out_len: *mut usize,
) -> XsltStatus {
    if out_txt.is_null() || out_len.is_null() {
        return XsltStatus::InvalidArgument;
    }
    *out_txt = ptr::null_mut();
    *out_len = 0;
    if style.is_null() || xml.is_null() {
        return XsltStatus::InvalidArgument;
    }

    guard("xslt_apply_style", || {
        let Some(engine) = LibxsltEngine::get() else {
            return XsltStatus::NotInitialized;
        };
        let xml = CStr::from_ptr(xml).to_bytes();
        let mut no_params = FlatParams::new(0);
        let flat = match params.as_mut() {
            Some(params) => &mut params.0,
            None => &mut no_params,
        };

        match engine.apply_flat(&(*style).0, xml, flat) {
            Ok(output) => {
                write_output(output, out_txt, out_len);
                XsltStatus::Ok
            }
            Err(err) => {
                tracing::debug!(error = %err, "xslt_apply_style failed");
                XsltStatus::from(&err)
            }
        }
    })
}

/// Release a compiled stylesheet and set `*style` to NULL.
///
/// The stylesheet's source document is released with it.
///
/// # Safety
/// `style` must be NULL or point to NULL or to a handle from
/// `xslt_make_style` that has not been released yet.
#[no_mangle]
pub unsafe extern "C" fn xslt_free_style(style: *mut *mut XsltStyle) {
    if style.is_null() || (*style).is_null() {
        return;
    }
    let handle = *style;
    *style = ptr::null_mut();
    guard_unit("xslt_free_style", || drop(Box::from_raw(handle)))
}

/// Compile `xsl`, apply it to `xml`, and release the stylesheet.
///
/// Output conventions are the same as `xslt_apply_style`.
///
/// # Safety
/// Same requirements as `xslt_make_style` and `xslt_apply_style`.
#[no_mangle]
pub unsafe extern "C" fn xslt_transform(
    xsl: *const c_char,
    xml: *const c_char,
    params: *mut XsltParams,
    out_txt: *mut *mut c_char,
    out_len: *mut usize,
) -> XsltStatus {
    let mut style: *mut XsltStyle = ptr::null_mut();
    let status = xslt_make_style(xsl, &mut style);
    if status != XsltStatus::Ok {
        if !out_txt.is_null() {
            *out_txt = ptr::null_mut();
        }
        if !out_len.is_null() {
            *out_len = 0;
        }
        return status;
    }

    let status = xslt_apply_style(style, xml, params, out_txt, out_len);
    xslt_free_style(&mut style);
    status
}

/// Release a buffer returned by `xslt_apply_style` or `xslt_transform`.
///
/// # Safety
/// `txt` must be NULL or a buffer returned by this library, and `len` the
/// length reported with it. Each buffer may be released only once.
#[no_mangle]
pub unsafe extern "C" fn xslt_free_output(txt: *mut c_char, len: usize) {
    if txt.is_null() {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(txt as *mut u8, len);
    drop(Box::from_raw(slice));
}

/// Allocate a parameter array for `pair_count` name/value pairs.
///
/// Every slot starts unset. Returns NULL if `pair_count` is negative.
#[no_mangle]
pub extern "C" fn xslt_make_param_array(pair_count: c_int) -> *mut XsltParams {
    let Ok(pair_count) = usize::try_from(pair_count) else {
        return ptr::null_mut();
    };
    Box::into_raw(Box::new(XsltParams(FlatParams::new(pair_count))))
}

/// Set pair `index` of `params` to (`name`, `value`).
///
/// `value` is an XPath expression; quote string literals yourself, e.g.
/// `"'text'"`. Both strings are copied, so the caller keeps ownership of
/// its own buffers.
///
/// # Safety
/// `params` must be a live array from `xslt_make_param_array`; `name` and
/// `value` must be valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn xslt_set_param(
    params: *mut XsltParams,
    name: *const c_char,
    value: *const c_char,
    index: c_int,
) -> XsltStatus {
    if params.is_null() || name.is_null() || value.is_null() {
        return XsltStatus::InvalidArgument;
    }
    let Ok(index) = usize::try_from(index) else {
        return XsltStatus::InvalidArgument;
    };

    guard("xslt_set_param", || {
        let name = CString::from(CStr::from_ptr(name));
        let value = CString::from(CStr::from_ptr(value));
        match (*params).0.set_pair(index, name, value) {
            Ok(()) => XsltStatus::Ok,
            Err(err) => XsltStatus::from(&err),
        }
    })
}

/// Release a parameter array and every string stored in it.
///
/// Unset slots are skipped. `pair_count` must match the count the array
/// was created with; a mismatch is logged and the array is still released.
///
/// # Safety
/// `params` must be NULL or a live array from `xslt_make_param_array`.
/// Each array may be released only once.
#[no_mangle]
pub unsafe extern "C" fn xslt_free_param_array(params: *mut XsltParams, pair_count: c_int) {
    if params.is_null() {
        return;
    }
    let params = Box::from_raw(params);
    if usize::try_from(pair_count).ok() != Some(params.0.pair_count()) {
        tracing::warn!(
            expected = params.0.pair_count(),
            given = pair_count,
            "xslt_free_param_array called with mismatched pair count"
        );
    }
    guard_unit("xslt_free_param_array", || drop(params))
}

unsafe fn write_output(output: TransformOutput, out_txt: *mut *mut c_char, out_len: *mut usize) {
    if output.is_empty() {
        return;
    }
    let bytes = output.into_bytes().into_boxed_slice();
    *out_len = bytes.len();
    *out_txt = Box::into_raw(bytes) as *mut u8 as *mut c_char;
}
