//! A named resource: a dataset collection exposed through one or more
//! data-access providers, with its extents, links and identification text.

use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::merge::{
    Section, merge_bbox, merge_enum, merge_keywords, merge_nested, merge_opt_enum,
    merge_opt_int, merge_opt_mapping, merge_opt_nested, merge_opt_scalar, merge_opt_sections,
    merge_opt_string, merge_string, merge_text, put, put_opt,
};
use crate::provider::Provider;
use crate::records::{CrsAuthority, StringEnum, string_enum};
use crate::value::{FlowList, Keywords, LocalizedText, default_bbox, dotted, indexed};

string_enum! {
    /// What kind of collection the resource is.
    pub enum ResourceType {
        Collection => "collection",
        Stac => "stac-collection",
    }
}

string_enum! {
    /// Whether the resource is advertised by the service.
    pub enum Visibility {
        Unset => "",
        Default => "default",
        Hidden => "hidden",
    }
}

/// An outbound link attached to a resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    /// Document key `type`.
    pub kind: String,
    pub rel: String,
    pub href: String,
    pub title: Option<String>,
    pub hreflang: Option<String>,
    pub length: Option<i64>,
}

impl Section for Link {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.kind, raw, "type", path, diag);
        merge_string(&mut self.rel, raw, "rel", path, diag);
        merge_string(&mut self.href, raw, "href", path, diag);
        merge_opt_string(&mut self.title, raw, "title", path, diag);
        merge_opt_string(&mut self.hreflang, raw, "hreflang", path, diag);
        merge_opt_int(&mut self.length, raw, "length", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "type", Value::String(self.kind.clone()));
        put(&mut map, "rel", Value::String(self.rel.clone()));
        put(&mut map, "href", Value::String(self.href.clone()));
        put_opt(&mut map, "title", self.title.clone().map(Value::String));
        put_opt(&mut map, "hreflang", self.hreflang.clone().map(Value::String));
        put_opt(&mut map, "length", self.length.map(Value::from));
        map
    }
}

/// Spatial extent: a flow-style bbox plus an optional CRS URI.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialExtent {
    pub bbox: FlowList,
    pub crs: Option<String>,
}

impl Default for SpatialExtent {
    fn default() -> Self {
        SpatialExtent {
            bbox: default_bbox(),
            crs: None,
        }
    }
}

impl Section for SpatialExtent {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_bbox(&mut self.bbox, raw, "bbox", path, diag);
        merge_opt_string(&mut self.crs, raw, "crs", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "bbox", self.bbox.emit());
        put_opt(&mut map, "crs", self.crs.clone().map(Value::String));
        map
    }
}

const CRS_URI_PREFIX: &str = "http://www.opengis.net/def/crs/";

impl SpatialExtent {
    /// The CRS authority encoded in the `crs` URI, for the authority picker.
    ///
    /// Falls back to OGC/1.3 when the URI is absent or unparseable.
    pub fn crs_authority(&self) -> CrsAuthority {
        let Some(crs) = self.crs.as_deref() else {
            return CrsAuthority::Ogc13;
        };
        let tail = crs.rsplit(CRS_URI_PREFIX).next().unwrap_or("");
        let authority = tail.rsplit_once('/').map(|(head, _)| head).unwrap_or("");
        CrsAuthority::from_text(authority).unwrap_or_else(|| {
            tracing::debug!(crs, "unparseable CRS URI; using the default authority");
            CrsAuthority::Ogc13
        })
    }

    /// The trailing CRS identifier of the `crs` URI (e.g. `CRS84`).
    pub fn crs_id(&self) -> String {
        match self.crs.as_deref() {
            Some(crs) => crs.rsplit('/').next().unwrap_or("").to_string(),
            None => String::new(),
        }
    }
}

/// Temporal extent. Timestamps are kept as the scalar the document used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalExtent {
    pub begin: Option<Value>,
    pub end: Option<Value>,
    pub trs: Option<String>,
}

impl Section for TemporalExtent {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_opt_scalar(&mut self.begin, raw, "begin", path, diag);
        merge_opt_scalar(&mut self.end, raw, "end", path, diag);
        merge_opt_string(&mut self.trs, raw, "trs", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put_opt(&mut map, "begin", self.begin.clone());
        put_opt(&mut map, "end", self.end.clone());
        put_opt(&mut map, "trs", self.trs.clone().map(Value::String));
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extents {
    pub spatial: SpatialExtent,
    pub temporal: Option<TemporalExtent>,
}

impl Section for Extents {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_nested(&mut self.spatial, raw, "spatial", path, diag);
        merge_opt_nested(&mut self.temporal, raw, "temporal", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "spatial", Value::Mapping(self.spatial.emit()));
        put_opt(
            &mut map,
            "temporal",
            self.temporal.as_ref().map(|t| Value::Mapping(t.emit())),
        );
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Document key `type`.
    pub kind: ResourceType,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub keywords: Keywords,
    pub extents: Extents,
    pub providers: Vec<Provider>,
    pub links: Option<Vec<Link>>,
    pub visibility: Option<Visibility>,
    /// Document key `linked-data`; an opaque blob passed through unchanged.
    pub linked_data: Option<Mapping>,
}

impl Default for Resource {
    fn default() -> Self {
        Resource {
            kind: ResourceType::Collection,
            title: LocalizedText::default(),
            description: LocalizedText::default(),
            keywords: Keywords::default(),
            extents: Extents::default(),
            providers: Vec::new(),
            links: None,
            visibility: None,
            linked_data: None,
        }
    }
}

impl Section for Resource {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_enum(&mut self.kind, raw, "type", path, diag);
        merge_text(&mut self.title, raw, "title", path, diag);
        merge_text(&mut self.description, raw, "description", path, diag);
        merge_keywords(&mut self.keywords, raw, "keywords", path, diag);
        merge_nested(&mut self.extents, raw, "extents", path, diag);
        self.merge_providers(raw, path, diag);
        merge_opt_sections(&mut self.links, raw, "links", path, diag);
        merge_opt_enum(&mut self.visibility, raw, "visibility", path, diag);
        merge_opt_mapping(&mut self.linked_data, raw, "linked-data", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "type", Value::String(self.kind.as_str().into()));
        put(&mut map, "title", self.title.emit());
        put(&mut map, "description", self.description.emit());
        put(&mut map, "keywords", self.keywords.emit());
        put(&mut map, "extents", Value::Mapping(self.extents.emit()));
        put(
            &mut map,
            "providers",
            Value::Sequence(self.providers.iter().map(Provider::emit).collect()),
        );
        put_opt(
            &mut map,
            "links",
            self.links
                .as_ref()
                .map(|links| Value::Sequence(links.iter().map(|l| Value::Mapping(l.emit())).collect())),
        );
        put_opt(
            &mut map,
            "visibility",
            self.visibility.map(|v| Value::String(v.as_str().into())),
        );
        put_opt(
            &mut map,
            "linked-data",
            self.linked_data.clone().map(Value::Mapping),
        );
        map
    }
}

impl Resource {
    /// Merge the polymorphic provider list. Mapping elements go through
    /// registry dispatch (unknown shapes stay opaque); other elements are
    /// dropped with a wrong-type diagnostic.
    fn merge_providers(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        match raw.get("providers") {
            None => diag.push_missing(dotted(path, "providers")),
            Some(Value::Sequence(items)) => {
                self.providers.clear();
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::Mapping(m) => self.providers.push(Provider::from_mapping(m)),
                        _ => diag.push_wrong_type(indexed(&dotted(path, "providers"), i)),
                    }
                }
            }
            Some(_) => diag.push_wrong_type(dotted(path, "providers")),
        }
    }

    /// Business-rule check. Paths relative to the resource.
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        if self.title.is_empty() {
            invalid.push("title".into());
        }
        if self.description.is_empty() {
            invalid.push("description".into());
        }
        if self.keywords.is_empty() {
            invalid.push("keywords".into());
        }
        if self.providers.is_empty() {
            invalid.push("providers".into());
        }
        let bbox_len = self.extents.spatial.bbox.len();
        if bbox_len != 4 && bbox_len != 6 {
            invalid.push("extents.spatial.bbox".into());
        }
        for (i, provider) in self.providers.iter().enumerate() {
            for field in provider.invalid_fields() {
                invalid.push(format!("providers[{i}].{field}"));
            }
        }
        invalid
    }
}
