//! Flat, null-terminated parameter array for `xsltApplyStylesheet`
//!
//! libxslt takes parameters as `[name0, value0, name1, value1, ..., NULL]`.
//! This is the only place that layout is built.

use std::ffi::{c_char, CString};
use std::ptr;

use xslt_engine_traits::{Error, ParameterList, Result};

/// Parameter array in libxslt's calling convention.
///
/// Holds `2 * pair_count + 1` slots. Slot `2i` is the name of pair `i`,
/// slot `2i + 1` its value, and the final slot is always null. The array
/// owns every string it points at and frees them, and itself, on drop.
#[derive(Debug)]
pub struct FlatParams {
    strings: Vec<Option<CString>>,
    slots: Vec<*const c_char>,
}

// The raw slots only point into `strings`, which the array owns.
unsafe impl Send for FlatParams {}

impl FlatParams {
    /// Allocate room for `pair_count` pairs, every slot null
    pub fn new(pair_count: usize) -> Self {
        let slot_count = 2 * pair_count;
        Self {
            strings: (0..slot_count).map(|_| None).collect(),
            slots: vec![ptr::null(); slot_count + 1],
        }
    }

    /// Build the array for `params`
    pub fn from_list(params: &ParameterList) -> Result<Self> {
        let mut flat = FlatParams::new(params.len());
        for (index, param) in params.iter().enumerate() {
            let name = to_cstring(&param.name, "name")?;
            let value = to_cstring(&param.value, "value")?;
            flat.set_pair(index, name, value)?;
        }
        Ok(flat)
    }

    pub fn pair_count(&self) -> usize {
        self.strings.len() / 2
    }

    /// Store `name` at slot `2 * index` and `value` at slot `2 * index + 1`
    pub fn set_pair(&mut self, index: usize, name: CString, value: CString) -> Result<()> {
        if index >= self.pair_count() {
            return Err(Error::invalid_parameter(format!(
                "pair index {index} out of range for {} pairs",
                self.pair_count()
            )));
        }
        self.store(2 * index, name);
        self.store(2 * index + 1, value);
        Ok(())
    }

    /// The raw slots, including the trailing null
    pub fn slots(&self) -> &[*const c_char] {
        &self.slots
    }

    /// Pointer suitable for the engine's `const char **params` argument
    pub(crate) fn as_engine_ptr(&mut self) -> *mut *const c_char {
        self.slots.as_mut_ptr()
    }

    fn store(&mut self, slot: usize, s: CString) {
        // The CString's heap buffer doesn't move when the CString does.
        self.slots[slot] = s.as_ptr();
        self.strings[slot] = Some(s);
    }
}

fn to_cstring(s: &str, what: &str) -> Result<CString> {
    CString::new(s).map_err(|_| {
        Error::invalid_parameter(format!("parameter {what} {s:?} contains a NUL byte"))
    })
}
