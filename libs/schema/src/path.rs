//! Field paths for locating validation failures inside a document.

/// A dotted path to a field, e.g. `spec.topology.hostGroup.name` or
/// `items[2].metadata.name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a root path.
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    /// Returns the path of a named child field.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Returns the path of a sequence element.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    /// Returns `other` nested under `self`.
    #[must_use]
    pub fn join(&self, other: &FieldPath) -> Self {
        match (self.0.is_empty(), other.0.is_empty()) {
            (true, _) => other.clone(),
            (false, true) => self.clone(),
            (false, false) => Self(format!("{}.{}", self.0, other.0)),
        }
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_and_index() {
        let path = FieldPath::new("items").index(3).child("spec").child("zone");
        assert_eq!(path.as_str(), "items[3].spec.zone");
    }

    #[test]
    fn test_join() {
        let prefix = FieldPath::new("items").index(1);
        let path = FieldPath::new("spec.topology");
        assert_eq!(prefix.join(&path).as_str(), "items[1].spec.topology");
        assert_eq!(FieldPath::new("").join(&path), path);
        assert_eq!(prefix.join(&FieldPath::new("")), prefix);
    }

    #[test]
    fn test_child_of_empty_root() {
        assert_eq!(FieldPath::new("").child("metadata").as_str(), "metadata");
    }
}
