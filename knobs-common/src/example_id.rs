use std::fmt;

/// Identity of one catalog example.
///
/// Each example owns an independent knob set, so this is the outer key of
/// the registry's store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExampleId(String);

impl ExampleId {
    pub fn new(id: impl Into<String>) -> Self {
        ExampleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExampleId {
    fn from(id: &str) -> Self {
        ExampleId::new(id)
    }
}

impl From<String> for ExampleId {
    fn from(id: String) -> Self {
        ExampleId(id)
    }
}
