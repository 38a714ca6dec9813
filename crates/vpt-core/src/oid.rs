//! Well-known policy identifiers

pub use vpt_parser::{ObjectIdentifier, ANY_POLICY as ANY_POLICY_OID, ID_QT_CPS, ID_QT_UNOTICE};

/// anyPolicy (RFC 5280, section 4.2.1.4) in dotted form
pub const ANY_POLICY: &str = "2.5.29.32.0";

/// Check whether `policy` is the anyPolicy identifier
#[inline]
pub fn is_any_policy(policy: &str) -> bool {
    policy == ANY_POLICY
}

/// Display form of a policy identifier
pub fn policy_to_string(policy: &str) -> &str {
    if is_any_policy(policy) {
        "anyPolicy"
    } else {
        policy
    }
}
