//! The configuration document root: one server, logging and metadata section
//! plus the named resource collection, with the editing operations the form
//! surface drives.

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::error::GeocfgError;
use crate::logging::LoggingConfig;
use crate::merge::{Section, put};
use crate::metadata::MetadataConfig;
use crate::provider::Provider;
use crate::resource::Resource;
use crate::server::ServerConfig;
use crate::value::dotted;

/// The fully typed configuration document.
///
/// Always structurally complete: every section exists with defaults from the
/// moment of construction, and one [`apply`](ConfigDocument::apply) pass per
/// load overwrites the whole mutable state. Resource names are unique by
/// construction (the map key) and keep their document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metadata: MetadataConfig,
    pub resources: IndexMap<String, Resource>,
}

impl ConfigDocument {
    /// One reconciliation pass: overwrite this document from an untyped tree.
    ///
    /// Total — any input produces a usable, fully populated document. The
    /// returned diagnostics aggregate the server, logging, metadata and
    /// resource sections with dotted path prefixes; the caller decides
    /// whether they matter.
    pub fn apply(&mut self, raw: &Value) -> Diagnostics {
        *self = ConfigDocument::default();
        let mut diag = Diagnostics::new();
        let empty = Mapping::new();
        let root = match raw {
            Value::Mapping(m) => m,
            Value::Null => &empty,
            _ => {
                diag.push_wrong_type("document");
                &empty
            }
        };

        merge_section(&mut self.server, root, "server", &mut diag);
        merge_section(&mut self.logging, root, "logging", &mut diag);
        merge_section(&mut self.metadata, root, "metadata", &mut diag);
        self.merge_resources(root, &mut diag);

        tracing::debug!(
            missing = diag.missing.len(),
            wrong_type = diag.wrong_type.len(),
            resources = self.resources.len(),
            "document reconciled"
        );
        diag
    }

    fn merge_resources(&mut self, root: &Mapping, diag: &mut Diagnostics) {
        match root.get("resources") {
            None => {}
            Some(Value::Mapping(entries)) => {
                for (name, value) in entries {
                    let Some(name) = name.as_str() else {
                        diag.push_wrong_type("resources");
                        continue;
                    };
                    let path = dotted("resources", name);
                    match value {
                        Value::Mapping(m) => {
                            let mut resource = Resource::default();
                            resource.merge_fields(m, &path, diag);
                            self.resources.insert(name.to_string(), resource);
                        }
                        _ => diag.push_wrong_type(path),
                    }
                }
            }
            Some(_) => diag.push_wrong_type("resources"),
        }
    }

    /// Re-emit the document as an untyped tree for the external writer.
    ///
    /// All four sections are always present; optional fields that are absent
    /// in the typed tree are omitted, enums emit their document strings, and
    /// opaque blobs come back verbatim.
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::new();
        put(&mut map, "server", Value::Mapping(self.server.emit()));
        put(&mut map, "logging", Value::Mapping(self.logging.emit()));
        put(&mut map, "metadata", Value::Mapping(self.metadata.emit()));
        let mut resources = Mapping::new();
        for (name, resource) in &self.resources {
            resources.insert(Value::String(name.clone()), Value::Mapping(resource.emit()));
        }
        put(&mut map, "resources", Value::Mapping(resources));
        Value::Mapping(map)
    }

    /// Insert a placeholder resource under a fresh name and return the name.
    pub fn add_resource(&mut self) -> String {
        let mut name = String::from("new_resource");
        let mut counter = 1;
        while self.resources.contains_key(&name) {
            counter += 1;
            name = format!("new_resource_{counter}");
        }
        self.resources.insert(name.clone(), Resource::default());
        name
    }

    /// Remove a resource. Removing an unknown name is a no-op.
    pub fn delete_resource(&mut self, name: &str) {
        self.resources.shift_remove(name);
    }

    /// Rename a resource: remove and reinsert under the new key. The renamed
    /// resource moves to the end of the document order.
    pub fn rename_resource(&mut self, old: &str, new: &str) -> Result<(), GeocfgError> {
        if !self.resources.contains_key(old) {
            return Err(GeocfgError::UnknownResource(old.to_string()));
        }
        if old != new && self.resources.contains_key(new) {
            return Err(GeocfgError::DuplicateResource(new.to_string()));
        }
        if let Some(resource) = self.resources.shift_remove(old) {
            self.resources.insert(new.to_string(), resource);
        }
        Ok(())
    }

    /// Validate a provider coming from the edit surface and, when it is
    /// complete, append it to the resource (or replace the provider at
    /// `index`). Returns the provider's invalid fields; a non-empty list
    /// means nothing was changed.
    pub fn set_provider(
        &mut self,
        resource: &str,
        provider: Provider,
        index: Option<usize>,
    ) -> Result<Vec<String>, GeocfgError> {
        let target = self
            .resources
            .get_mut(resource)
            .ok_or_else(|| GeocfgError::UnknownResource(resource.to_string()))?;
        let invalid = provider.invalid_fields();
        if invalid.is_empty() {
            match index {
                None => target.providers.push(provider),
                Some(i) if i < target.providers.len() => target.providers[i] = provider,
                Some(i) => {
                    return Err(GeocfgError::ProviderIndex {
                        index: i,
                        count: target.providers.len(),
                    });
                }
            }
        }
        Ok(invalid)
    }
}

fn merge_section<T: Section>(target: &mut T, root: &Mapping, key: &str, diag: &mut Diagnostics) {
    let empty = Mapping::new();
    match root.get(key) {
        None => target.merge_fields(&empty, key, diag),
        Some(Value::Mapping(m)) => target.merge_fields(m, key, diag),
        Some(_) => {
            diag.push_wrong_type(key);
            target.merge_fields(&empty, key, diag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{SAMPLE_YAML, sample_document};
    use crate::logging::LogLevel;
    use crate::provider::{PostgresqlProvider, Provider};

    fn applied(raw: &Value) -> (ConfigDocument, Diagnostics) {
        let mut doc = ConfigDocument::default();
        let diag = doc.apply(raw);
        (doc, diag)
    }

    #[test]
    fn sample_document_applies_clean() {
        let (doc, diag) = applied(&sample_document());
        assert!(diag.is_empty(), "unexpected diagnostics: {diag:?}");
        assert_eq!(doc.resources.len(), 2);
        assert_eq!(doc.server.bind.port, 5000);
        assert_eq!(doc.logging.level, LogLevel::Error);
    }

    #[test]
    fn resource_order_follows_document() {
        let (doc, _) = applied(&sample_document());
        let names: Vec<&String> = doc.resources.keys().collect();
        assert_eq!(names, vec!["obs", "basemap"]);
    }

    #[test]
    fn minimal_feature_resource_scenario() {
        let raw: Value = serde_yaml::from_str(
            "resources:\n  a:\n    providers:\n      - type: feature\n        name: PostgreSQL\n        data: {host: h, dbname: d, user: u, password: p, search_path: [public]}\n        id_field: id\n        table: t\n        geom_field: g\n",
        )
        .unwrap();
        let (doc, diag) = applied(&raw);
        let resource = doc.resources.get("a").unwrap();
        assert_eq!(resource.providers.len(), 1);
        assert!(matches!(resource.providers[0], Provider::Postgresql(_)));
        assert!(
            diag.all().iter().all(|p| !p.contains("providers")),
            "provider reconciliation must produce no diagnostics: {diag:?}"
        );
    }

    #[test]
    fn short_bbox_scenario() {
        let raw: Value = serde_yaml::from_str(
            "resources:\n  a:\n    extents:\n      spatial:\n        bbox: [1, 2, 3]\n",
        )
        .unwrap();
        let (doc, diag) = applied(&raw);
        assert!(
            diag.wrong_type
                .contains(&"resources.a.extents.spatial.bbox".to_string())
        );
        let bbox = &doc.resources.get("a").unwrap().extents.spatial.bbox;
        let ints: Vec<i64> = bbox.items().iter().map(|v| v.as_i64().unwrap()).collect();
        assert_eq!(ints, vec![-180, -90, 180, 90]);
    }

    #[test]
    fn absent_sections_report_their_mandatory_fields() {
        let (doc, diag) = applied(&Value::Null);
        assert!(diag.missing.contains(&"server.url".to_string()));
        assert!(diag.missing.contains(&"logging.level".to_string()));
        assert!(diag.missing.contains(&"metadata.identification".to_string()));
        assert!(diag.wrong_type.is_empty());
        assert!(doc.resources.is_empty());
        // defaults intact
        assert_eq!(doc.server.url, "http://localhost:5000");
    }

    #[test]
    fn non_mapping_section_is_wrong_type_and_defaulted() {
        let raw: Value = serde_yaml::from_str("server: oops\n").unwrap();
        let (doc, diag) = applied(&raw);
        assert!(diag.wrong_type.contains(&"server".to_string()));
        assert_eq!(doc.server.bind.port, 5000);
    }

    #[test]
    fn non_mapping_resource_entry_is_skipped() {
        let raw: Value = serde_yaml::from_str("resources:\n  a: 5\n").unwrap();
        let (doc, diag) = applied(&raw);
        assert!(doc.resources.is_empty());
        assert!(diag.wrong_type.contains(&"resources.a".to_string()));
    }

    #[test]
    fn apply_overwrites_previous_state() {
        let mut doc = ConfigDocument::default();
        doc.apply(&sample_document());
        assert_eq!(doc.resources.len(), 2);
        let smaller: Value = serde_yaml::from_str("server: {url: http://other}\n").unwrap();
        doc.apply(&smaller);
        assert!(doc.resources.is_empty());
        assert_eq!(doc.server.url, "http://other");
    }

    #[test]
    fn reapplying_emitted_form_is_identity() {
        let (doc, _) = applied(&sample_document());
        let emitted = doc.to_value();
        let (again, rediag) = applied(&emitted);
        assert!(rediag.is_empty(), "re-apply diagnostics: {rediag:?}");
        assert_eq!(again, doc);
    }

    #[test]
    fn opaque_provider_survives_emission() {
        let (doc, _) = applied(&sample_document());
        let Value::Mapping(root) = doc.to_value() else {
            panic!("Emission must be a mapping");
        };
        let providers = root
            .get("resources")
            .and_then(|r| r.get("basemap"))
            .and_then(|b| b.get("providers"))
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(
            providers[1].get("type"),
            Some(&Value::String("sensorthings".into()))
        );
        assert_eq!(providers[1].get("intensity"), Some(&Value::from(3)));
    }

    // --- editing operations ---

    #[test]
    fn add_resource_generates_unique_names() {
        let mut doc = ConfigDocument::default();
        assert_eq!(doc.add_resource(), "new_resource");
        assert_eq!(doc.add_resource(), "new_resource_2");
        assert_eq!(doc.add_resource(), "new_resource_3");
        assert_eq!(doc.resources.len(), 3);
    }

    #[test]
    fn delete_resource_ignores_unknown_names() {
        let mut doc = ConfigDocument::default();
        doc.add_resource();
        doc.delete_resource("nope");
        assert_eq!(doc.resources.len(), 1);
        doc.delete_resource("new_resource");
        assert!(doc.resources.is_empty());
    }

    #[test]
    fn rename_moves_resource_to_end() {
        let (mut doc, _) = applied(&sample_document());
        doc.rename_resource("obs", "observations").unwrap();
        let names: Vec<&String> = doc.resources.keys().collect();
        assert_eq!(names, vec!["basemap", "observations"]);
    }

    #[test]
    fn rename_rejects_unknown_and_duplicate() {
        let (mut doc, _) = applied(&sample_document());
        assert!(matches!(
            doc.rename_resource("nope", "x"),
            Err(GeocfgError::UnknownResource(_))
        ));
        assert!(matches!(
            doc.rename_resource("obs", "basemap"),
            Err(GeocfgError::DuplicateResource(_))
        ));
    }

    #[test]
    fn set_provider_appends_complete_provider() {
        let (mut doc, _) = applied(&sample_document());
        let raw: Mapping = serde_yaml::from_str(
            "type: feature\nname: PostgreSQL\ndata: {host: h, port: 5432, dbname: d, user: u, password: p, search_path: [public]}\nid_field: id\ntable: t\ngeom_field: g\n",
        )
        .unwrap();
        let provider = Provider::from_mapping(&raw);
        let invalid = doc.set_provider("obs", provider, None).unwrap();
        assert!(invalid.is_empty());
        assert_eq!(doc.resources.get("obs").unwrap().providers.len(), 2);
    }

    #[test]
    fn set_provider_with_incomplete_data_reports_without_mutation() {
        let (mut doc, _) = applied(&sample_document());
        let provider = Provider::Postgresql(PostgresqlProvider::default());
        let invalid = doc.set_provider("obs", provider, None).unwrap();
        assert!(invalid.contains(&"data.host".to_string()));
        assert_eq!(doc.resources.get("obs").unwrap().providers.len(), 1);
    }

    #[test]
    fn set_provider_replaces_at_index() {
        let (mut doc, _) = applied(&sample_document());
        let raw: Mapping = serde_yaml::from_str(
            "type: feature\nname: Replacement\ndata: {host: h, port: 5432, dbname: d, user: u, password: p, search_path: [public]}\nid_field: id\ntable: t\ngeom_field: g\n",
        )
        .unwrap();
        let provider = Provider::from_mapping(&raw);
        doc.set_provider("obs", provider, Some(0)).unwrap();
        let Provider::Postgresql(p) = &doc.resources.get("obs").unwrap().providers[0] else {
            panic!("Expected postgresql");
        };
        assert_eq!(p.name, "Replacement");
    }

    #[test]
    fn set_provider_index_out_of_range_is_an_error() {
        let (mut doc, _) = applied(&sample_document());
        let raw: Mapping = serde_yaml::from_str(
            "type: feature\nname: X\ndata: {host: h, port: 5432, dbname: d, user: u, password: p, search_path: [public]}\nid_field: id\ntable: t\ngeom_field: g\n",
        )
        .unwrap();
        let provider = Provider::from_mapping(&raw);
        assert!(matches!(
            doc.set_provider("obs", provider, Some(9)),
            Err(GeocfgError::ProviderIndex { index: 9, count: 1 })
        ));
    }

    #[test]
    fn set_provider_unknown_resource_is_an_error() {
        let mut doc = ConfigDocument::default();
        let provider = Provider::Postgresql(PostgresqlProvider::default());
        assert!(matches!(
            doc.set_provider("nope", provider, None),
            Err(GeocfgError::UnknownResource(_))
        ));
    }

    #[test]
    fn sample_yaml_and_value_fixture_agree() {
        let parsed: Value = serde_yaml::from_str(SAMPLE_YAML).unwrap();
        assert_eq!(parsed, sample_document());
    }
}
