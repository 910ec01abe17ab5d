//! Reference case catalog

use serde::{Deserialize, Serialize};
use xslt_engine_traits::{ErrorKind, ParameterList, Result};

const BUILTIN: &str = include_str!("../cases/reference.json");

/// A named set of reference cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    pub cases: Vec<ReferenceCase>,
}

/// One stylesheet/document pair and what applying it should produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCase {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub stylesheet: String,
    pub source: String,
    #[serde(default)]
    pub params: ParameterList,
    pub expect: Expectation,
}

/// Expected result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Exact output, compared after trimming trailing whitespace
    Output(String),
    /// Every fragment must appear in the output
    Contains(Vec<String>),
    /// Success with zero bytes of output
    Empty,
    /// Compilation or application fails with this kind of error
    Error(ErrorKind),
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The catalog shipped with this crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ReferenceCase> {
        self.cases.iter().find(|c| c.id == id)
    }
}
