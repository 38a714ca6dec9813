//! Qualifier values stored in policy nodes
//!
//! A node keeps the qualifiers of the certificate policy that produced it.
//! Values are shared between copies of a tree, so cloning a node's
//! qualifier set never duplicates the DER bytes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use vpt_parser::{ObjectIdentifier, PolicyQualifierInfo, Qualifier};

/// Immutable, hashable policy qualifier
///
/// Equal values have identical DER encodings, so a `HashSet` of qualifiers
/// collapses duplicates regardless of where they were decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyQualifierValue(Arc<PolicyQualifierInfo>);

impl PolicyQualifierValue {
    /// Decode from DER. Malformed input never yields a value.
    pub fn from_der(bytes: &[u8]) -> vpt_parser::Result<Self> {
        Ok(Self(Arc::new(PolicyQualifierInfo::from_der(bytes)?)))
    }

    /// CPS pointer qualifier
    pub fn cps_uri(uri: &str) -> vpt_parser::Result<Self> {
        Ok(Self(Arc::new(PolicyQualifierInfo::cps_uri(uri)?)))
    }

    pub fn qualifier_id(&self) -> ObjectIdentifier {
        self.0.qualifier_id()
    }

    pub fn encoded(&self) -> &[u8] {
        self.0.encoded()
    }

    pub fn qualifier(&self) -> &[u8] {
        self.0.qualifier()
    }

    pub fn interpret(&self) -> vpt_parser::Result<Qualifier> {
        self.0.interpret()
    }

    pub fn info(&self) -> &PolicyQualifierInfo {
        &self.0
    }
}

impl From<PolicyQualifierInfo> for PolicyQualifierValue {
    fn from(info: PolicyQualifierInfo) -> Self {
        Self(Arc::new(info))
    }
}

impl fmt::Display for PolicyQualifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for PolicyQualifierValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.encoded())
    }
}

impl<'de> Deserialize<'de> for PolicyQualifierValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::from_der(&bytes).map_err(serde::de::Error::custom)
    }
}
