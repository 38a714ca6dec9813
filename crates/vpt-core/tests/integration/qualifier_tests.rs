//! Qualifier decoding as seen by tree construction

use vpt_core::oid::{ID_QT_CPS, ID_QT_UNOTICE};
use vpt_core::testing::cps_qualifier_der;
use vpt_core::{BuilderConfig, DecodingError, Error, NodeSpec, PolicyQualifierValue, TreeBuilder};
use vpt_parser::{DisplayText, PolicyQualifierInfo, Qualifier, UserNotice};

#[test]
fn test_decode_cps_qualifier() {
    let value = PolicyQualifierValue::from_der(&cps_qualifier_der()).unwrap();
    assert_eq!(value.qualifier_id(), ID_QT_CPS);
    assert_eq!(
        value.interpret().unwrap(),
        Qualifier::CpsUri("http://www.qq.com/stmt.txt".to_string())
    );
    assert_eq!(value.encoded(), cps_qualifier_der().as_slice());
}

#[test]
fn test_user_notice_qualifier() {
    let notice = UserNotice {
        notice_ref: None,
        explicit_text: Some(DisplayText::Utf8String("Use only for testing".to_string())),
    };
    let info = PolicyQualifierInfo::user_notice(&notice).unwrap();
    let value = PolicyQualifierValue::from(info);

    assert_eq!(value.qualifier_id(), ID_QT_UNOTICE);
    assert_eq!(value.interpret().unwrap(), Qualifier::UserNotice(notice));
}

#[test]
fn test_malformed_qualifier_propagates_to_builder() {
    fn build(der: &[u8]) -> vpt_core::Result<usize> {
        let value = PolicyQualifierValue::from_der(der)?;
        let mut builder = TreeBuilder::new(BuilderConfig::default());
        builder.set_root(NodeSpec::any_policy().with_qualifiers([value]))?;
        Ok(builder.len())
    }

    assert_eq!(build(&cps_qualifier_der()).unwrap(), 1);

    let mut bad = cps_qualifier_der();
    bad.push(0x00);
    assert!(matches!(build(&bad), Err(Error::Decoding(DecodingError::TrailingData(1)))));

    assert!(matches!(build(&[]), Err(Error::Decoding(_))));
}

#[test]
fn test_display_shows_id_and_payload() {
    let value = PolicyQualifierValue::from_der(&cps_qualifier_der()).unwrap();
    let shown = value.to_string();
    assert!(shown.starts_with("PolicyQualifierInfo: [ qualifierID: 1.3.6.1.5.5.7.2.1"));
}
