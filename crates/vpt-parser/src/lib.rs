// VPT Parser - DER decoding for certificate policy qualifiers

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use der::{ErrorKind, Tag};
use thiserror::Error;

/// User notice payload types
pub mod notice;

/// Object identifier parsing and the PKIX identifiers used by policies
pub mod oid;

/// `PolicyQualifierInfo` decoding and interpretation
pub mod qualifier;

pub use der::asn1::ObjectIdentifier;
pub use notice::{DisplayText, NoticeReference, UserNotice};
pub use oid::{parse_oid, ANY_POLICY, ID_QT_CPS, ID_QT_UNOTICE};
pub use qualifier::{PolicyQualifierInfo, Qualifier};

/// Error raised when DER input is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    /// Input ended before the structure was complete
    #[error("Unexpected end of input")]
    Truncated,

    /// Bytes left over after a complete structure
    #[error("Trailing data: {0} bytes")]
    TrailingData(usize),

    /// A tag other than the one required by the structure was found
    #[error("Unexpected tag: expected {expected:?}, got {actual}")]
    UnexpectedTag {
        /// Tag required at this position, if a single one was
        expected: Option<Tag>,
        /// Tag found in the input
        actual: Tag,
    },

    /// BER indefinite length (0x80)
    #[error("Indefinite length is not allowed in DER")]
    IndefiniteLength,

    /// Value not in its canonical DER form
    #[error("Non-canonical encoding of {0}")]
    NonCanonical(Tag),

    /// Object identifier content or dotted form is invalid
    #[error("Invalid object identifier: {0}")]
    InvalidOid(String),

    /// Character string content is invalid for its type
    #[error("Invalid string: {0}")]
    InvalidString(String),

    /// Content is invalid for its tag
    #[error("Invalid value for {0}")]
    InvalidValue(Tag),

    /// Any other structural failure reported by the DER decoder
    #[error("Malformed input: {0}")]
    Malformed(String),
}

fn is_string_tag(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::Ia5String | Tag::VisibleString | Tag::BmpString | Tag::Utf8String
    )
}

impl From<der::Error> for DecodingError {
    fn from(err: der::Error) -> Self {
        match err.kind() {
            ErrorKind::Incomplete { .. } => DecodingError::Truncated,
            ErrorKind::TrailingData { remaining, .. } => {
                DecodingError::TrailingData(u32::from(remaining) as usize)
            },
            ErrorKind::TagUnexpected { expected, actual } => {
                DecodingError::UnexpectedTag { expected, actual }
            },
            ErrorKind::IndefiniteLength => DecodingError::IndefiniteLength,
            ErrorKind::Noncanonical { tag } => DecodingError::NonCanonical(tag),
            ErrorKind::OidMalformed => DecodingError::InvalidOid(err.to_string()),
            ErrorKind::Utf8(e) => DecodingError::InvalidString(e.to_string()),
            ErrorKind::Value { tag } if is_string_tag(tag) => {
                DecodingError::InvalidString(format!("invalid {} content", tag))
            },
            ErrorKind::Value { tag } => DecodingError::InvalidValue(tag),
            other => DecodingError::Malformed(other.to_string()),
        }
    }
}

impl From<const_oid::Error> for DecodingError {
    fn from(err: const_oid::Error) -> Self {
        DecodingError::InvalidOid(err.to_string())
    }
}

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, DecodingError>;
