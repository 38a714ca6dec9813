//! ```text
//! PolicyQualifierInfo ::= SEQUENCE {
//!      policyQualifierId  PolicyQualifierId,
//!      qualifier          ANY DEFINED BY policyQualifierId }
//! ```

use crate::notice::UserNotice;
use crate::oid::{ID_QT_CPS, ID_QT_UNOTICE};
use crate::Result;
use der::asn1::{Any, Ia5StringRef, ObjectIdentifier};
use der::{Decode, Encode, Sequence};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Sequence)]
struct QualifierInfoDer {
    policy_qualifier_id: ObjectIdentifier,
    qualifier: Any,
}

/// A decoded `PolicyQualifierInfo`
///
/// Immutable once constructed. Equality and hashing cover the complete DER
/// encoding, which determines every other field.
#[derive(Debug, Clone)]
pub struct PolicyQualifierInfo {
    encoded: Vec<u8>,
    qualifier_id: ObjectIdentifier,
    qualifier: Vec<u8>,
}

impl PolicyQualifierInfo {
    /// Decode from a complete DER encoding
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let info = QualifierInfoDer::from_der(bytes)?;
        Ok(Self {
            encoded: bytes.to_vec(),
            qualifier_id: info.policy_qualifier_id,
            qualifier: info.qualifier.to_der()?,
        })
    }

    /// Encode a qualifier identifier and a single DER qualifier element
    pub fn new(qualifier_id: ObjectIdentifier, qualifier_der: &[u8]) -> Result<Self> {
        let info = QualifierInfoDer {
            policy_qualifier_id: qualifier_id,
            qualifier: Any::from_der(qualifier_der)?,
        };
        Ok(Self {
            encoded: info.to_der()?,
            qualifier_id,
            qualifier: info.qualifier.to_der()?,
        })
    }

    /// A CPS pointer qualifier carrying `uri` as an IA5String
    pub fn cps_uri(uri: &str) -> Result<Self> {
        Self::new(ID_QT_CPS, &Ia5StringRef::new(uri)?.to_der()?)
    }

    /// A user notice qualifier
    pub fn user_notice(notice: &UserNotice) -> Result<Self> {
        Self::new(ID_QT_UNOTICE, &notice.to_der()?)
    }

    /// Complete DER encoding
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Qualifier identifier
    pub fn qualifier_id(&self) -> ObjectIdentifier {
        self.qualifier_id
    }

    /// DER encoding of the qualifier element
    pub fn qualifier(&self) -> &[u8] {
        &self.qualifier
    }

    /// Typed view of the qualifier for the identifiers PKIX defines
    pub fn interpret(&self) -> Result<Qualifier> {
        if self.qualifier_id == ID_QT_CPS {
            let uri = Ia5StringRef::from_der(&self.qualifier)?;
            Ok(Qualifier::CpsUri(uri.as_str().to_owned()))
        } else if self.qualifier_id == ID_QT_UNOTICE {
            Ok(Qualifier::UserNotice(UserNotice::from_der(&self.qualifier)?))
        } else {
            Ok(Qualifier::Unknown { id: self.qualifier_id, der: self.qualifier.clone() })
        }
    }
}

impl PartialEq for PolicyQualifierInfo {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for PolicyQualifierInfo {}

impl Hash for PolicyQualifierInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl fmt::Display for PolicyQualifierInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyQualifierInfo: [ qualifierID: {} qualifier: ", self.qualifier_id)?;
        for byte in &self.qualifier {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, " ]")
    }
}

/// Interpreted qualifier payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// id-qt-cps: URI of a certification practice statement
    CpsUri(String),
    /// id-qt-unotice: text to show the relying party
    UserNotice(UserNotice),
    /// Any other qualifier, kept as raw DER
    Unknown {
        /// Qualifier identifier
        id: ObjectIdentifier,
        /// DER encoding of the qualifier element
        der: Vec<u8>,
    },
}
