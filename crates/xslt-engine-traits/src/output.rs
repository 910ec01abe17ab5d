//! Serialized transformation output

/// Bytes produced by serializing a result tree.
///
/// An empty output is a successful result, not an error: a stylesheet
/// whose templates emit nothing serializes to zero bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TransformOutput {
    bytes: Vec<u8>,
}

impl TransformOutput {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// View the output as UTF-8, if the stylesheet's output encoding allows it
    pub fn to_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Convert into a `String`, replacing invalid UTF-8 sequences
    pub fn into_string(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

impl From<Vec<u8>> for TransformOutput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for TransformOutput {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_output() {
        let out = TransformOutput::empty();
        assert!(out.is_empty());
        assert_eq!(out.len(), 0);
        assert_eq!(out.to_utf8(), Some(""));
    }

    #[test]
    fn lossy_conversion() {
        let out = TransformOutput::new(vec![b'a', 0xff]);
        assert_eq!(out.to_utf8(), None);
        assert_eq!(out.into_string(), "a\u{fffd}");
    }
}
