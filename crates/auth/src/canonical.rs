//! Data-check string: the canonical serialization that gets signed.

use std::borrow::Cow;

use crate::IdentityClaim;

/// The value of one claim field, as seen by the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Integer field, rendered in base 10. `0` means absent.
    Int(i64),
    /// Text field, rendered verbatim. Empty means absent.
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    /// Rendered value, or `None` when the field is absent.
    pub fn render(self) -> Option<Cow<'a, str>> {
        match self {
            Self::Int(0) => None,
            Self::Int(value) => Some(Cow::Owned(value.to_string())),
            Self::Text("") => None,
            Self::Text(value) => Some(Cow::Borrowed(value)),
        }
    }
}

/// Reads one field out of a claim.
pub type Accessor = fn(&IdentityClaim) -> FieldValue<'_>;

/// Signed fields in the order the widget serializes them (sorted by name).
///
/// The signature itself is never part of the data-check string.
pub const CANONICAL_FIELDS: [(&str, Accessor); 6] = [
    ("auth_date", field::auth_date),
    ("first_name", field::first_name),
    ("id", field::id),
    ("last_name", field::last_name),
    ("photo_url", field::photo_url),
    ("username", field::username),
];

mod field {
    use super::FieldValue;
    use crate::IdentityClaim;

    pub(super) fn auth_date(claim: &IdentityClaim) -> FieldValue<'_> {
        FieldValue::Int(claim.auth_date())
    }

    pub(super) fn first_name(claim: &IdentityClaim) -> FieldValue<'_> {
        FieldValue::Text(claim.first_name())
    }

    pub(super) fn id(claim: &IdentityClaim) -> FieldValue<'_> {
        FieldValue::Int(claim.id())
    }

    pub(super) fn last_name(claim: &IdentityClaim) -> FieldValue<'_> {
        FieldValue::Text(claim.last_name())
    }

    pub(super) fn photo_url(claim: &IdentityClaim) -> FieldValue<'_> {
        FieldValue::Text(claim.photo_url())
    }

    pub(super) fn username(claim: &IdentityClaim) -> FieldValue<'_> {
        FieldValue::Text(claim.username())
    }
}

impl IdentityClaim {
    /// Build the data-check string: `name=value` for every present field,
    /// joined by `\n`, with no trailing newline.
    pub fn canonical_string(&self) -> String {
        CANONICAL_FIELDS
            .iter()
            .filter_map(|(name, accessor)| {
                accessor(self).render().map(|value| format!("{name}={value}"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_sorted_by_name() {
        let names: Vec<_> = CANONICAL_FIELDS.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_full_claim() {
        let claim = IdentityClaim::new()
            .with_id(1)
            .with_first_name("Klim")
            .with_last_name("Sidorov")
            .with_username("klimsidorov")
            .with_photo_url("https://t.me/klimsidorov")
            .with_auth_date(976_255_200)
            .with_signature("ignored");

        assert_eq!(
            claim.canonical_string(),
            "auth_date=976255200\n\
             first_name=Klim\n\
             id=1\n\
             last_name=Sidorov\n\
             photo_url=https://t.me/klimsidorov\n\
             username=klimsidorov"
        );
    }

    #[test]
    fn test_only_first_name() {
        let claim = IdentityClaim::new().with_first_name("Klim");
        assert_eq!(claim.canonical_string(), "first_name=Klim");
    }

    #[test]
    fn test_absent_fields_leave_no_separator() {
        let claim = IdentityClaim::new().with_id(7).with_username("durov");
        assert_eq!(claim.canonical_string(), "id=7\nusername=durov");
    }

    #[test]
    fn test_empty_claim() {
        assert_eq!(IdentityClaim::new().canonical_string(), "");
        assert_eq!(
            IdentityClaim::new().with_signature("abc").canonical_string(),
            ""
        );
    }

    #[test]
    fn test_negative_and_verbatim_values() {
        let claim = IdentityClaim::new()
            .with_id(-100)
            .with_first_name("a=b\nc");
        assert_eq!(claim.canonical_string(), "first_name=a=b\nc\nid=-100");
    }

    #[test]
    fn test_render() {
        assert_eq!(FieldValue::Int(0).render(), None);
        assert_eq!(FieldValue::Int(42).render().as_deref(), Some("42"));
        assert_eq!(FieldValue::Text("").render(), None);
        assert_eq!(FieldValue::Text("x").render().as_deref(), Some("x"));
    }
}
