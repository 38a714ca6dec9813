//! ```text
//! UserNotice ::= SEQUENCE {
//!      noticeRef        NoticeReference OPTIONAL,
//!      explicitText     DisplayText OPTIONAL }
//!
//! NoticeReference ::= SEQUENCE {
//!      organization     DisplayText,
//!      noticeNumbers    SEQUENCE OF INTEGER }
//!
//! DisplayText ::= CHOICE {
//!      ia5String        IA5String      (SIZE (1..200)),
//!      visibleString    VisibleString  (SIZE (1..200)),
//!      bmpString        BMPString      (SIZE (1..200)),
//!      utf8String       UTF8String     (SIZE (1..200)) }
//! ```

use der::asn1::{AnyRef, Ia5StringRef, VisibleStringRef};
use der::{Choice, Decode, EncodeValue, Length, Reader, Sequence, Tag, Tagged, Writer};
use std::fmt;

/// User notice qualifier
#[derive(Clone, Debug, Default, Eq, PartialEq, Sequence)]
pub struct UserNotice {
    /// Reference to an organization's numbered notices
    #[asn1(optional = "true")]
    pub notice_ref: Option<NoticeReference>,

    /// Text included directly in the certificate
    #[asn1(optional = "true")]
    pub explicit_text: Option<DisplayText>,
}

/// Reference to notices published by an organization
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct NoticeReference {
    /// Organization name
    pub organization: DisplayText,

    /// Notice numbers within that organization's texts
    pub notice_numbers: Vec<i64>,
}

/// Text in one of the four string types PKIX allows for notices
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DisplayText {
    /// IA5String (ASCII)
    Ia5String(String),
    /// VisibleString (printable ASCII)
    VisibleString(String),
    /// BMPString (UCS-2, big endian)
    BmpString(String),
    /// UTF8String
    Utf8String(String),
}

impl DisplayText {
    /// The text regardless of its string type
    pub fn as_str(&self) -> &str {
        match self {
            DisplayText::Ia5String(s)
            | DisplayText::VisibleString(s)
            | DisplayText::BmpString(s)
            | DisplayText::Utf8String(s) => s,
        }
    }

    fn bmp_units(s: &str) -> impl Iterator<Item = u16> + '_ {
        s.encode_utf16()
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Decode<'a> for DisplayText {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        match reader.peek_tag()? {
            Tag::Ia5String => {
                Ok(DisplayText::Ia5String(Ia5StringRef::decode(reader)?.as_str().to_owned()))
            },
            Tag::VisibleString => Ok(DisplayText::VisibleString(
                VisibleStringRef::decode(reader)?.as_str().to_owned(),
            )),
            Tag::Utf8String => Ok(DisplayText::Utf8String(String::decode(reader)?)),
            Tag::BmpString => {
                let content = AnyRef::decode(reader)?.value();
                if content.len() % 2 != 0 {
                    return Err(Tag::BmpString.length_error());
                }
                let units = content.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .collect::<Result<String, _>>()
                    .map(DisplayText::BmpString)
                    .map_err(|_| Tag::BmpString.value_error())
            },
            actual => Err(der::ErrorKind::TagUnexpected { expected: None, actual }.into()),
        }
    }
}

impl Choice<'_> for DisplayText {
    fn can_decode(tag: Tag) -> bool {
        matches!(
            tag,
            Tag::Ia5String | Tag::VisibleString | Tag::BmpString | Tag::Utf8String
        )
    }
}

impl Tagged for DisplayText {
    fn tag(&self) -> Tag {
        match self {
            DisplayText::Ia5String(_) => Tag::Ia5String,
            DisplayText::VisibleString(_) => Tag::VisibleString,
            DisplayText::BmpString(_) => Tag::BmpString,
            DisplayText::Utf8String(_) => Tag::Utf8String,
        }
    }
}

impl EncodeValue for DisplayText {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            DisplayText::Ia5String(s) if !s.is_ascii() => Err(Tag::Ia5String.value_error()),
            DisplayText::VisibleString(s) if !s.bytes().all(|b| (0x20..=0x7e).contains(&b)) => {
                Err(Tag::VisibleString.value_error())
            },
            DisplayText::BmpString(s) => Length::try_from(Self::bmp_units(s).count() * 2),
            other => Length::try_from(other.as_str().len()),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.value_len()?;
        match self {
            DisplayText::BmpString(s) => {
                for unit in Self::bmp_units(s) {
                    writer.write(&unit.to_be_bytes())?;
                }
                Ok(())
            },
            other => writer.write(other.as_str().as_bytes()),
        }
    }
}
