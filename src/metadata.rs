//! The `metadata` section: service identification, license, publishing
//! organization, and point of contact.

use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::merge::{Section, merge_enum, merge_keywords, merge_nested, merge_string, merge_text, put};
use crate::records::string_enum;
use crate::value::{Keywords, LocalizedText};

string_enum! {
    /// ISO keyword classification for the service keywords.
    pub enum KeywordsType {
        Discipline => "discipline",
        Temporal => "temporal",
        Place => "place",
        Theme => "theme",
        Stratum => "stratum",
    }
}

string_enum! {
    /// Responsible-party role of the contact.
    pub enum ContactRole {
        Author => "author",
        CoAuthor => "coAuthor",
        Collaborator => "collaborator",
        Contributor => "contributor",
        Custodian => "custodian",
        Distributor => "distributor",
        Editor => "editor",
        Funder => "funder",
        Mediator => "mediator",
        Originator => "originator",
        Owner => "owner",
        PointOfContact => "pointOfContact",
        PrincipalInvestigator => "principalInvestigator",
        Processor => "processor",
        Publisher => "publisher",
        ResourceProvider => "resourceProvider",
        RightsHolder => "rightsHolder",
        Sponsor => "sponsor",
        Stakeholder => "stakeholder",
        User => "user",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub keywords: Keywords,
    pub keywords_type: KeywordsType,
    pub terms_of_service: String,
    pub url: String,
}

impl Default for Identification {
    fn default() -> Self {
        Identification {
            title: LocalizedText::default(),
            description: LocalizedText::default(),
            keywords: Keywords::default(),
            keywords_type: KeywordsType::Theme,
            terms_of_service: "https://creativecommons.org/licenses/by/4.0/".into(),
            url: "https://example.org".into(),
        }
    }
}

impl Section for Identification {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_text(&mut self.title, raw, "title", path, diag);
        merge_text(&mut self.description, raw, "description", path, diag);
        merge_keywords(&mut self.keywords, raw, "keywords", path, diag);
        merge_enum(&mut self.keywords_type, raw, "keywords_type", path, diag);
        merge_string(&mut self.terms_of_service, raw, "terms_of_service", path, diag);
        merge_string(&mut self.url, raw, "url", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "title", self.title.emit());
        put(&mut map, "description", self.description.emit());
        put(&mut map, "keywords", self.keywords.emit());
        put(
            &mut map,
            "keywords_type",
            Value::String(self.keywords_type.as_str().into()),
        );
        put(
            &mut map,
            "terms_of_service",
            Value::String(self.terms_of_service.clone()),
        );
        put(&mut map, "url", Value::String(self.url.clone()));
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub name: String,
    pub url: String,
}

impl Default for License {
    fn default() -> Self {
        License {
            name: "CC-BY 4.0 license".into(),
            url: "https://creativecommons.org/licenses/by/4.0/".into(),
        }
    }
}

impl Section for License {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.url, raw, "url", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "url", Value::String(self.url.clone()));
        map
    }
}

/// The organization publishing the service.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishingOrg {
    pub name: String,
    pub url: String,
}

impl Default for PublishingOrg {
    fn default() -> Self {
        PublishingOrg {
            name: "Organization Name".into(),
            url: "https://pygeoapi.io".into(),
        }
    }
}

impl Section for PublishingOrg {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.url, raw, "url", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "url", Value::String(self.url.clone()));
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub position: String,
    pub address: String,
    pub city: String,
    pub stateorprovince: String,
    pub postalcode: String,
    pub country: String,
    pub phone: String,
    pub fax: String,
    pub email: String,
    pub url: String,
    pub hours: String,
    pub instructions: String,
    pub role: ContactRole,
}

impl Default for Contact {
    fn default() -> Self {
        Contact {
            name: "Lastname, Firstname".into(),
            position: "Position Title".into(),
            address: "Mailing Address".into(),
            city: "City".into(),
            stateorprovince: "Administrative Area".into(),
            postalcode: "Zip or Postal Code".into(),
            country: "Country".into(),
            phone: "+xx-xxx-xxx-xxxx".into(),
            fax: "+xx-xxx-xxx-xxxx".into(),
            email: "you@example.org".into(),
            url: "Contact URL".into(),
            hours: "Mo-Fr 08:00-17:00".into(),
            instructions: "During hours of service. Off on weekends.".into(),
            role: ContactRole::PointOfContact,
        }
    }
}

impl Section for Contact {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.position, raw, "position", path, diag);
        merge_string(&mut self.address, raw, "address", path, diag);
        merge_string(&mut self.city, raw, "city", path, diag);
        merge_string(&mut self.stateorprovince, raw, "stateorprovince", path, diag);
        merge_string(&mut self.postalcode, raw, "postalcode", path, diag);
        merge_string(&mut self.country, raw, "country", path, diag);
        merge_string(&mut self.phone, raw, "phone", path, diag);
        merge_string(&mut self.fax, raw, "fax", path, diag);
        merge_string(&mut self.email, raw, "email", path, diag);
        merge_string(&mut self.url, raw, "url", path, diag);
        merge_string(&mut self.hours, raw, "hours", path, diag);
        merge_string(&mut self.instructions, raw, "instructions", path, diag);
        merge_enum(&mut self.role, raw, "role", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "position", Value::String(self.position.clone()));
        put(&mut map, "address", Value::String(self.address.clone()));
        put(&mut map, "city", Value::String(self.city.clone()));
        put(
            &mut map,
            "stateorprovince",
            Value::String(self.stateorprovince.clone()),
        );
        put(&mut map, "postalcode", Value::String(self.postalcode.clone()));
        put(&mut map, "country", Value::String(self.country.clone()));
        put(&mut map, "phone", Value::String(self.phone.clone()));
        put(&mut map, "fax", Value::String(self.fax.clone()));
        put(&mut map, "email", Value::String(self.email.clone()));
        put(&mut map, "url", Value::String(self.url.clone()));
        put(&mut map, "hours", Value::String(self.hours.clone()));
        put(
            &mut map,
            "instructions",
            Value::String(self.instructions.clone()),
        );
        put(&mut map, "role", Value::String(self.role.as_str().into()));
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataConfig {
    pub identification: Identification,
    pub license: License,
    pub provider: PublishingOrg,
    pub contact: Contact,
}

impl Section for MetadataConfig {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_nested(&mut self.identification, raw, "identification", path, diag);
        merge_nested(&mut self.license, raw, "license", path, diag);
        merge_nested(&mut self.provider, raw, "provider", path, diag);
        merge_nested(&mut self.contact, raw, "contact", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(
            &mut map,
            "identification",
            Value::Mapping(self.identification.emit()),
        );
        put(&mut map, "license", Value::Mapping(self.license.emit()));
        put(&mut map, "provider", Value::Mapping(self.provider.emit()));
        put(&mut map, "contact", Value::Mapping(self.contact.emit()));
        map
    }
}

impl MetadataConfig {
    /// Business-rule check. Paths are relative to the section. The
    /// identification URL must carry both a scheme and a host.
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        if self.identification.title.is_empty() {
            invalid.push("identification.title".into());
        }
        if self.identification.description.is_empty() {
            invalid.push("identification.description".into());
        }
        if self.identification.keywords.is_empty() {
            invalid.push("identification.keywords".into());
        }
        if self.license.name.is_empty() {
            invalid.push("license.name".into());
        }
        if self.provider.name.is_empty() {
            invalid.push("provider.name".into());
        }
        if self.contact.name.is_empty() {
            invalid.push("contact.name".into());
        }
        let url_ok = url::Url::parse(&self.identification.url)
            .map(|u| u.has_host())
            .unwrap_or(false);
        if !url_ok {
            invalid.push("identification.url".into());
        }
        invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(yaml: &str) -> (MetadataConfig, Diagnostics) {
        let raw: Mapping = serde_yaml::from_str(yaml).unwrap();
        let mut section = MetadataConfig::default();
        let mut diag = Diagnostics::new();
        section.merge_fields(&raw, "metadata", &mut diag);
        (section, diag)
    }

    const FULL: &str = "\
identification:
  title: Observations API
  description: Sensor observations
  keywords: [sensors, observations]
  keywords_type: theme
  terms_of_service: https://creativecommons.org/licenses/by/4.0/
  url: https://data.example.org
license:
  name: CC-BY 4.0 license
  url: https://creativecommons.org/licenses/by/4.0/
provider:
  name: Example Org
  url: https://example.org
contact:
  name: 'Doe, Jan'
  position: Analyst
  address: 1 Main St
  city: Springfield
  stateorprovince: State
  postalcode: '12345'
  country: Country
  phone: '+1-555-0100'
  fax: '+1-555-0101'
  email: jan@example.org
  url: https://example.org/contact
  hours: Mo-Fr 09:00-17:00
  instructions: Email first.
  role: pointOfContact
";

    #[test]
    fn full_section_merges_clean() {
        let (section, diag) = merged(FULL);
        assert!(diag.is_empty());
        assert_eq!(
            section.identification.title,
            LocalizedText::plain("Observations API")
        );
        assert_eq!(section.contact.role, ContactRole::PointOfContact);
    }

    #[test]
    fn localized_title_accepted() {
        let (section, diag) = merged(&FULL.replace(
            "title: Observations API",
            "title: {en: Observations, fr: Observations FR}",
        ));
        assert!(diag.is_empty());
        match &section.identification.title {
            LocalizedText::Localized(m) => assert_eq!(m.len(), 2),
            other => panic!("Expected localized title, got {other:?}"),
        }
    }

    #[test]
    fn localized_keywords_accepted() {
        let (section, diag) = merged(&FULL.replace(
            "keywords: [sensors, observations]",
            "keywords: {en: [sensors], fr: [capteurs]}",
        ));
        assert!(diag.is_empty());
        match &section.identification.keywords {
            Keywords::Localized(m) => assert_eq!(m.len(), 2),
            other => panic!("Expected localized keywords, got {other:?}"),
        }
    }

    #[test]
    fn unknown_role_keeps_default() {
        let (section, diag) = merged(&FULL.replace("role: pointOfContact", "role: wizard"));
        assert_eq!(diag.wrong_type, vec!["metadata.contact.role"]);
        assert_eq!(section.contact.role, ContactRole::PointOfContact);
    }

    #[test]
    fn empty_input_reports_all_subsections() {
        let (_, diag) = merged("{}");
        assert_eq!(
            diag.missing,
            vec![
                "metadata.identification",
                "metadata.license",
                "metadata.provider",
                "metadata.contact",
            ]
        );
    }

    #[test]
    fn emit_round_trips() {
        let (section, _) = merged(FULL);
        let mut again = MetadataConfig::default();
        let mut diag = Diagnostics::new();
        again.merge_fields(&section.emit(), "metadata", &mut diag);
        assert!(diag.is_empty());
        assert_eq!(again, section);
    }

    // --- validation ---

    #[test]
    fn default_identification_text_is_invalid_until_filled() {
        // a fresh section still needs its identification written
        assert_eq!(
            MetadataConfig::default().invalid_fields(),
            vec![
                "identification.title",
                "identification.description",
                "identification.keywords",
            ]
        );
    }

    #[test]
    fn filled_identification_passes_validation() {
        let (section, _) = merged(FULL);
        assert!(section.invalid_fields().is_empty());
    }

    #[test]
    fn empty_title_fails_validation() {
        let (mut section, _) = merged(FULL);
        section.identification.title = LocalizedText::plain("");
        assert_eq!(section.invalid_fields(), vec!["identification.title"]);
    }

    #[test]
    fn url_without_scheme_fails_validation() {
        let (mut section, _) = merged(FULL);
        section.identification.url = "example.org/no-scheme".into();
        assert_eq!(section.invalid_fields(), vec!["identification.url"]);
    }

    #[test]
    fn url_without_host_fails_validation() {
        let (mut section, _) = merged(FULL);
        section.identification.url = "mailto:x@example.org".into();
        assert_eq!(section.invalid_fields(), vec!["identification.url"]);
    }
}
