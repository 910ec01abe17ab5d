//! Core trait abstractions for XSLT processing engines.
//!
//! This crate defines the contract an XSLT engine must satisfy: compile a
//! stylesheet once, apply it to any number of documents with a parameter
//! list, and hand back serialized bytes. Errors are classified by
//! [`ErrorKind`] so callers can tell a malformed input from a failed
//! compilation or transformation.

pub mod config;
pub mod error;
pub mod output;
pub mod params;
pub mod xslt;

pub use config::{check_input_len, EngineConfig, MAX_INPUT_LEN};
pub use error::{Error, ErrorKind, Result};
pub use output::TransformOutput;
pub use params::{quote_xpath_string, Parameter, ParameterList};
pub use xslt::{ExtendedXsltEngine, XsltEngine};
