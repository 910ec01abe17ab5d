//! libxslt engine adapter for the XSLT engine abstraction
//!
//! This adapter wraps libxml2, libxslt and libexslt to implement the
//! xslt-engine-traits interfaces. Parsing, template matching and EXSLT
//! extension functions are all done by the C libraries; this crate owns
//! the handles, guards input lengths, marshals parameters and keeps the
//! libraries' shared error state scoped to one call at a time.

pub(crate) mod diagnostics;
mod document;
pub mod engine;
pub mod params;
pub mod stylesheet;
mod sys;

// Re-export main types
pub use diagnostics::{Diagnostic, Level};
pub use engine::LibxsltEngine;
pub use params::FlatParams;
pub use stylesheet::Stylesheet;

// Re-export the engine contract for convenience
pub use xslt_engine_traits::{
    EngineConfig, Error, ErrorKind, ExtendedXsltEngine, ParameterList, Result, TransformOutput,
    XsltEngine,
};
