//! Stylesheet parameters
//!
//! Parameters are kept as a typed, ordered list of name/value pairs. Engines
//! translate the list into whatever calling convention they need at the
//! point where they call into the underlying library.

use serde::{Deserialize, Serialize};

/// A single stylesheet parameter binding.
///
/// `value` is an XPath expression, evaluated by the engine at apply time.
/// Use [`ParameterList::push_string`] to bind a literal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// Ordered list of stylesheet parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterList {
    pairs: Vec<Parameter>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    /// Bind `name` to the XPath expression `value`, passed through untouched
    pub fn push<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        self.pairs.push(Parameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Bind `name` to the literal string `value`
    pub fn push_string<N: Into<String>>(&mut self, name: N, value: &str) -> &mut Self {
        self.push(name, quote_xpath_string(value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.pairs.iter()
    }

    /// Value of the first binding for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParameterList {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut list = ParameterList::new();
        list.extend(iter);
        list
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, V)> for ParameterList {
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.push(name, value);
        }
    }
}

/// Render `s` as an XPath 1.0 string literal.
///
/// XPath 1.0 has no escape syntax, so a string holding both quote
/// characters is assembled with `concat()`.
pub fn quote_xpath_string(s: &str) -> String {
    if !s.contains('\'') {
        return format!("'{s}'");
    }
    if !s.contains('"') {
        return format!("\"{s}\"");
    }

    let parts: Vec<String> = s
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
