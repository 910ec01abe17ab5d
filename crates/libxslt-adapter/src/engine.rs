//! libxslt engine: initialization, compilation and transformation

use std::ffi::c_int;
use std::ptr::{self, NonNull};
use std::sync::OnceLock;

use xslt_engine_traits::{
    EngineConfig, Error, ParameterList, Result, TransformOutput, XsltEngine,
};

use crate::diagnostics::{self, Diagnostics};
use crate::document::XmlDocument;
use crate::params::FlatParams;
use crate::stylesheet::Stylesheet;
use crate::sys;

static ENGINE: OnceLock<LibxsltEngine> = OnceLock::new();

/// The process-wide libxslt engine.
///
/// Obtained through [`LibxsltEngine::initialize`], which sets up the parser
/// and registers EXSLT once per process.
#[derive(Debug)]
pub struct LibxsltEngine {
    config: EngineConfig,
}

impl LibxsltEngine {
    /// Initialize the engine with default settings
    pub fn initialize() -> &'static LibxsltEngine {
        Self::initialize_with(EngineConfig::default())
    }

    /// Initialize the engine. Only the first call's configuration takes
    /// effect; later calls return the engine that call set up.
    pub fn initialize_with(config: EngineConfig) -> &'static LibxsltEngine {
        ENGINE.get_or_init(|| {
            let _diagnostics = Diagnostics::acquire();
            unsafe {
                sys::xmlCheckVersion(sys::LIBXML_MIN_VERSION);
                sys::xmlInitParser();
                sys::xsltInit();
                if config.register_exslt {
                    sys::exsltRegisterAll();
                }
            }
            diagnostics::route_library_messages();
            tracing::debug!(
                libxslt = libxslt_version(),
                libxml = libxml_version(),
                exslt = config.register_exslt,
                max_input_len = config.input_limit(),
                "xslt engine initialized"
            );
            LibxsltEngine { config }
        })
    }

    /// The engine, if it has been initialized
    pub fn get() -> Option<&'static LibxsltEngine> {
        ENGINE.get()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile stylesheet source given as raw bytes
    pub fn compile_bytes(&self, xsl: &[u8]) -> Result<Stylesheet> {
        let len = self.config.check_input_len(xsl.len())?;

        let mut diagnostics = Diagnostics::acquire();
        let doc = XmlDocument::parse(&mut diagnostics, xsl, len)?;

        let doc = doc.into_raw();
        let style = unsafe { sys::xsltParseStylesheetDoc(doc) };
        let Some(style) = NonNull::new(style) else {
            unsafe { sys::xmlFreeDoc(doc) };
            tracing::debug!("stylesheet compilation returned nothing");
            return Err(Error::compile(with_detail(
                "stylesheet could not be compiled",
                diagnostics.take_messages(),
            )));
        };

        let errors = unsafe { (*style.as_ptr()).errors };
        if errors != 0 {
            // The stylesheet owns `doc` now; freeing it frees both.
            unsafe { sys::xsltFreeStylesheet(style.as_ptr()) };
            tracing::debug!(errors, "stylesheet compiled with errors");
            return Err(Error::compile(with_detail(
                &format!("stylesheet compiled with {errors} error(s)"),
                diagnostics.take_messages(),
            )));
        }

        tracing::debug!(len = xsl.len(), "stylesheet compiled");
        Ok(unsafe { Stylesheet::from_raw(style) })
    }

    /// Apply `stylesheet` to raw XML bytes
    pub fn apply_bytes(
        &self,
        stylesheet: &Stylesheet,
        xml: &[u8],
        params: &ParameterList,
    ) -> Result<TransformOutput> {
        let mut flat = FlatParams::from_list(params)?;
        self.apply_flat(stylesheet, xml, &mut flat)
    }

    /// Apply `stylesheet` with an already-built parameter array
    pub fn apply_flat(
        &self,
        stylesheet: &Stylesheet,
        xml: &[u8],
        params: &mut FlatParams,
    ) -> Result<TransformOutput> {
        let len = self.config.check_input_len(xml.len())?;

        let mut diagnostics = Diagnostics::acquire();
        let doc = XmlDocument::parse(&mut diagnostics, xml, len)?;

        let raw = unsafe {
            sys::xsltApplyStylesheet(stylesheet.as_ptr(), doc.as_ptr(), params.as_engine_ptr())
        };
        let Some(result) = XmlDocument::from_raw(raw) else {
            tracing::debug!(pairs = params.pair_count(), "transformation produced no result");
            return Err(Error::transform(with_detail(
                "transformation produced no result",
                diagnostics.take_messages(),
            )));
        };

        let output = serialize(stylesheet, &result)?;
        tracing::debug!(
            input_len = xml.len(),
            pairs = params.pair_count(),
            output_len = output.len(),
            "transformation applied"
        );
        Ok(output)
    }

    /// Compile, apply once, and release the stylesheet
    pub fn transform_bytes(
        &self,
        xsl: &[u8],
        xml: &[u8],
        params: &ParameterList,
    ) -> Result<TransformOutput> {
        let stylesheet = self.compile_bytes(xsl)?;
        self.apply_bytes(&stylesheet, xml, params)
    }

    /// Version of the linked libxslt, e.g. `10139`
    pub fn engine_version(&self) -> i32 {
        libxslt_version()
    }
}

/// Append the libraries' own messages, when there are any, to a summary
fn with_detail(summary: &str, detail: Option<String>) -> String {
    match detail {
        Some(detail) => format!("{summary}: {detail}"),
        None => summary.to_string(),
    }
}

fn libxslt_version() -> i32 {
    unsafe { sys::xsltLibxsltVersion }
}

fn libxml_version() -> i32 {
    unsafe { sys::xsltLibxmlVersion }
}

/// Serialize `result` with the stylesheet's output settings and copy the
/// bytes into Rust-owned memory
fn serialize(stylesheet: &Stylesheet, result: &XmlDocument) -> Result<TransformOutput> {
    let mut buf: *mut sys::xmlChar = ptr::null_mut();
    let mut len: c_int = 0;
    let status = unsafe {
        sys::xsltSaveResultToString(&mut buf, &mut len, result.as_ptr(), stylesheet.as_ptr())
    };

    let bytes = if !buf.is_null() && len > 0 {
        let bytes = unsafe { std::slice::from_raw_parts(buf, len as usize) }.to_vec();
        Some(bytes)
    } else {
        None
    };
    if !buf.is_null() {
        unsafe { free_xml(buf) };
    }

    if status != 0 {
        return Err(Error::transform("result could not be serialized"));
    }
    Ok(bytes.map(TransformOutput::new).unwrap_or_default())
}

unsafe fn free_xml(buf: *mut sys::xmlChar) {
    if let Some(free) = sys::xmlFree {
        free(buf.cast());
    }
}

impl XsltEngine for LibxsltEngine {
    type Stylesheet = Stylesheet;

    fn compile(&self, xsl: &str) -> Result<Stylesheet> {
        self.compile_bytes(xsl.as_bytes())
    }

    fn apply(
        &self,
        stylesheet: &Stylesheet,
        xml: &str,
        params: &ParameterList,
    ) -> Result<TransformOutput> {
        self.apply_bytes(stylesheet, xml.as_bytes(), params)
    }

    fn xslt_version(&self) -> &'static str {
        "1.0"
    }

    fn supported_features(&self) -> Vec<String> {
        let mut features = vec![
            "xslt-1.0".to_string(),
            "xpath-1.0".to_string(),
            "parameters".to_string(),
        ];
        if self.config.register_exslt {
            features.extend(
                ["exslt", "exslt-common", "exslt-math", "exslt-sets", "exslt-strings", "exslt-dates"]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        features
    }
}
