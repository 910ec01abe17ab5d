//! XSLT engine abstraction trait

use crate::error::Result;
use crate::output::TransformOutput;
use crate::params::ParameterList;

/// Trait for XSLT transformation engines.
///
/// This trait abstracts over different XSLT implementation strategies,
/// allowing different engines to be used interchangeably. Each call is a
/// self-contained, blocking operation; a compiled stylesheet is the only
/// state that outlives a call, and it is released when dropped.
pub trait XsltEngine: Send + Sync {
    /// Type representing a compiled stylesheet
    type Stylesheet: Send + Sync;

    /// Compile an XSLT stylesheet from source text
    fn compile(&self, xsl: &str) -> Result<Self::Stylesheet>;

    /// Parse `xml`, apply `stylesheet` to it with `params` bound, and
    /// serialize the result using the stylesheet's output settings
    fn apply(
        &self,
        stylesheet: &Self::Stylesheet,
        xml: &str,
        params: &ParameterList,
    ) -> Result<TransformOutput>;

    /// Get the XSLT version supported by this engine
    fn xslt_version(&self) -> &'static str;

    /// Get the list of feature strings supported by this engine
    fn supported_features(&self) -> Vec<String>;

    /// Check if a specific feature is supported
    fn supports_feature(&self, feature: &str) -> bool {
        self.supported_features()
            .iter()
            .any(|f| f.eq_ignore_ascii_case(feature))
    }
}

/// Extended XSLT engine capabilities
pub trait ExtendedXsltEngine: XsltEngine {
    /// Apply without parameters
    fn apply_plain(&self, stylesheet: &Self::Stylesheet, xml: &str) -> Result<TransformOutput> {
        self.apply(stylesheet, xml, &ParameterList::new())
    }

    /// Transform with (name, XPath expression) pairs
    fn transform_with_params<I, N, V>(
        &self,
        stylesheet: &Self::Stylesheet,
        xml: &str,
        params: I,
    ) -> Result<TransformOutput>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let params: ParameterList = params.into_iter().collect();
        self.apply(stylesheet, xml, &params)
    }

    /// One-shot transformation: compile, apply, release the stylesheet
    fn transform_string(
        &self,
        xsl: &str,
        xml: &str,
        params: &ParameterList,
    ) -> Result<TransformOutput> {
        let stylesheet = self.compile(xsl)?;
        self.apply(&stylesheet, xml, params)
    }
}

// Blanket implementation for all XSLT engines
impl<T: XsltEngine> ExtendedXsltEngine for T {}
