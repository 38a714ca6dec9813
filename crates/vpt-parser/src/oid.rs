use crate::{DecodingError, Result};
use der::asn1::ObjectIdentifier;

pub use const_oid::db::rfc5280::{ANY_POLICY, ID_QT_CPS, ID_QT_UNOTICE};

/// Parse a dotted decimal identifier
///
/// Every arc must be plain decimal digits without a leading zero, so that
/// the text round-trips through the DER encoding unchanged.
pub fn parse_oid(dotted: &str) -> Result<ObjectIdentifier> {
    for arc in dotted.split('.') {
        let canonical = !arc.is_empty()
            && arc.bytes().all(|b| b.is_ascii_digit())
            && (arc == "0" || !arc.starts_with('0'));
        if !canonical {
            return Err(DecodingError::InvalidOid(format!("invalid arc {:?} in {:?}", arc, dotted)));
        }
    }
    Ok(ObjectIdentifier::new(dotted)?)
}
