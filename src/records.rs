//! Closed string-backed enumerations used across the schema tree.
//!
//! Every enum here (and in the section modules) maps each member to the exact
//! string the document uses. Reconciliation resolves input strings through
//! [`StringEnum::from_text`]; emission goes back through [`StringEnum::text`].
//! An input string matching no member is a wrong-type diagnostic, never a
//! panic.

/// String↔member mapping shared by all document enums.
pub trait StringEnum: Copy + Sized + 'static {
    /// Resolve the document string form to a member.
    fn from_text(text: &str) -> Option<Self>;
    /// The string form written back to the document.
    fn text(self) -> &'static str;
}

/// Declare a string-backed enum together with its `StringEnum` impl and a
/// `MEMBERS` table (used by pickers in the editing surface).
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const MEMBERS: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl $crate::records::StringEnum for $name {
            fn from_text(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn text(self) -> &'static str {
                self.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use string_enum;

string_enum! {
    /// Discriminant of the known provider variants.
    pub enum ProviderKind {
        Feature => "feature",
        Tile => "tile",
        Map => "map",
    }
}

string_enum! {
    /// Languages offered by the language pickers.
    pub enum Language {
        Unset => "",
        EnUs => "en-US",
        EnGb => "en-GB",
        FrCa => "fr-CA",
        FrFr => "fr-FR",
        PtPt => "pt-PT",
    }
}

string_enum! {
    /// Temporal reference systems for temporal extents.
    pub enum TrsAuthority {
        Iso8601 => "http://www.opengis.net/def/uom/ISO-8601/0/Gregorian",
    }
}

string_enum! {
    /// CRS authorities recognized by the CRS picker.
    pub enum CrsAuthority {
        Ogc13 => "OGC/1.3",
        Ogc0 => "OGC/0",
        Auto => "AUTO/1.3",
        Epsg0 => "EPSG/0",
        Epsg85 => "EPSG/8.5",
        Epsg892 => "EPSG/8.9.2",
        Epsg942 => "EPSG/9.4.2",
        Epsg953 => "EPSG/9.5.3",
        Epsg954 => "EPSG/9.5.4",
        Epsg96 => "EPSG/9.6",
        Epsg961 => "EPSG/9.6.1",
        Epsg963 => "EPSG/9.6.3",
        Epsg965 => "EPSG/9.6.5",
        Epsg981 => "EPSG/9.8.1",
        Epsg982 => "EPSG/9.8.2",
        Epsg983 => "EPSG/9.8.3",
        Epsg984 => "EPSG/9.8.4",
        Epsg986 => "EPSG/9.8.6",
        Epsg987 => "EPSG/9.8.7",
        Epsg9811 => "EPSG/9.8.11",
        Epsg9813 => "EPSG/9.8.13",
        Epsg9814 => "EPSG/9.8.14",
        Epsg9815 => "EPSG/9.8.15",
        Epsg99 => "EPSG/9.9",
        Epsg991 => "EPSG/9.9.1",
        Iau0 => "IAU/0",
        Iau2015 => "IAU/2015",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_round_trips() {
        for kind in ProviderKind::MEMBERS {
            assert_eq!(ProviderKind::from_text(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn unknown_text_is_none() {
        assert_eq!(ProviderKind::from_text("vector"), None);
        assert_eq!(Language::from_text("de-DE"), None);
    }

    #[test]
    fn empty_string_is_a_language_member() {
        assert_eq!(Language::from_text(""), Some(Language::Unset));
    }

    #[test]
    fn crs_authority_table_is_complete() {
        assert_eq!(CrsAuthority::MEMBERS.len(), 27);
        assert_eq!(CrsAuthority::from_text("EPSG/9.8.15"), Some(CrsAuthority::Epsg9815));
    }

    #[test]
    fn display_uses_document_form() {
        assert_eq!(ProviderKind::Feature.to_string(), "feature");
        assert_eq!(CrsAuthority::Ogc13.to_string(), "OGC/1.3");
    }
}
