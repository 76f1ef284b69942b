//! Resource name and UID definitions.
//!
//! Names are user-chosen and validated; UIDs are platform-assigned UUIDs.

use crate::IdError;

// =============================================================================
// Resource Name
// =============================================================================

/// A validated DNS-1123 subdomain used as the identity of a cluster-scoped
/// resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    /// Maximum length of a resource name.
    pub const MAX_LEN: usize = 253;

    /// Parses a resource name from a string.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        if s.len() > Self::MAX_LEN {
            return Err(IdError::TooLong {
                max: Self::MAX_LEN,
                actual: s.len(),
            });
        }

        if let Some((position, ch)) = s
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '.'))
        {
            return Err(IdError::InvalidCharacter { ch, position });
        }

        for segment in s.split('.') {
            let valid = segment
                .chars()
                .next()
                .zip(segment.chars().last())
                .is_some_and(|(first, last)| {
                    first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric()
                });
            if !valid {
                return Err(IdError::InvalidSegment {
                    segment: segment.to_string(),
                });
            }
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ResourceName {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ResourceName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ResourceName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// UID
// =============================================================================

/// Platform-assigned unique identifier of a stored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid(uuid::Uuid);

impl Uid {
    /// Creates a new random UID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a UID from a raw UUID.
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn uuid(&self) -> uuid::Uuid {
        self.0
    }

    /// Parses a UID from its hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| IdError::InvalidUid(e.to_string()))
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for Uid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Uid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Uid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resource_name_accepts_subdomains() {
        for name in ["dc1", "us-west-1a", "dc1.cluster-a.hg-01", "0", "a-b"] {
            let parsed = ResourceName::parse(name).unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_resource_name_empty() {
        let result: Result<ResourceName, _> = "".parse();
        assert!(matches!(result.unwrap_err(), IdError::Empty));
    }

    #[test]
    fn test_resource_name_too_long() {
        let name = "a".repeat(ResourceName::MAX_LEN + 1);
        let result = ResourceName::parse(&name);
        assert_eq!(
            result.unwrap_err(),
            IdError::TooLong {
                max: 253,
                actual: 254
            }
        );
    }

    #[test]
    fn test_resource_name_max_length_ok() {
        let name = "a".repeat(ResourceName::MAX_LEN);
        assert!(ResourceName::parse(&name).is_ok());
    }

    #[test]
    fn test_resource_name_uppercase_rejected() {
        let err = ResourceName::parse("Zone-A").unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidCharacter {
                ch: 'Z',
                position: 0
            }
        );
        assert!(err.is_format_error());
    }

    #[test]
    fn test_resource_name_bad_segments() {
        for name in ["-zone", "zone-", "dc1..zone", ".dc1", "dc1.", "dc1.-a"] {
            let err = ResourceName::parse(name).unwrap_err();
            assert!(
                matches!(err, IdError::InvalidSegment { .. }),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn test_resource_name_json_roundtrip() {
        let name = ResourceName::parse("zone-a").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"zone-a\"");
        let parsed: ResourceName = serde_json::from_str(&json).unwrap();
        assert_eq!(name, parsed);
    }

    #[test]
    fn test_resource_name_deserialize_rejects_invalid() {
        let result: Result<ResourceName, _> = serde_json::from_str("\"Not_Valid\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_uid_roundtrip() {
        let uid = Uid::new();
        let s = uid.to_string();
        let parsed: Uid = s.parse().unwrap();
        assert_eq!(uid, parsed);
    }

    #[test]
    fn test_uid_invalid() {
        assert!(matches!(Uid::parse("not-a-uuid"), Err(IdError::InvalidUid(_))));
        assert!(Uid::parse("").unwrap_err().is_empty());
    }

    #[test]
    fn test_uid_json_roundtrip() {
        let uid = Uid::new();
        let json = serde_json::to_string(&uid).unwrap();
        let parsed: Uid = serde_json::from_str(&json).unwrap();
        assert_eq!(uid, parsed);
    }

    proptest! {
        #[test]
        fn prop_valid_names_roundtrip(name in "[a-z0-9]([a-z0-9-]{0,20}[a-z0-9])?(\\.[a-z0-9]([a-z0-9-]{0,20}[a-z0-9])?){0,3}") {
            let parsed = ResourceName::parse(&name).unwrap();
            prop_assert_eq!(parsed.to_string(), name);
        }
    }
}
