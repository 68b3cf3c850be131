//! Data-access provider variants and their flat-list interchange format.
//!
//! A resource's `providers` sequence is heterogeneous: each element is a
//! mapping whose `type` field names one of a closed set of shapes. Dispatch is
//! an explicit tagged-union lookup — the discriminant picks the variant, a
//! one-level structural check confirms the variant's own nested records are
//! present, and anything that matches no registered shape is retained
//! verbatim as an opaque blob. Unknown shapes therefore survive a load/save
//! cycle untouched, which is the forward-compatibility contract of the
//! document format.
//!
//! Each known shape also defines a positional pack/unpack contract used by
//! the flat-list edit surface. That format is internal: a wrong arity or a
//! malformed cell is a contract violation and aborts the call with an error,
//! unlike document input which only ever produces diagnostics.

use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::error::GeocfgError;
use crate::merge::{
    Section, merge_flow_list, merge_int, merge_list, merge_nested, merge_opt_list,
    merge_opt_mapping, merge_opt_string, merge_scalar, merge_string, put, put_opt,
};
use crate::records::{ProviderKind, StringEnum};
use crate::value::FlowList;

/// Positions in the postgresql flat list.
pub const POSTGRESQL_ARITY: usize = 16;
/// Positions in the mvt-proxy flat list.
pub const MVT_PROXY_ARITY: usize = 10;
/// Positions in the wms-facade flat list.
pub const WMS_FACADE_ARITY: usize = 10;

/// Connection details of the postgresql feature provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresqlData {
    pub host: String,
    /// Port as written in the document: a number or a quoted string.
    pub port: Value,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub search_path: FlowList,
}

impl Default for PostgresqlData {
    fn default() -> Self {
        PostgresqlData {
            host: String::new(),
            port: Value::String(String::new()),
            dbname: String::new(),
            user: String::new(),
            password: String::new(),
            search_path: FlowList::default(),
        }
    }
}

impl Section for PostgresqlData {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.host, raw, "host", path, diag);
        merge_scalar(&mut self.port, raw, "port", path, diag);
        merge_string(&mut self.dbname, raw, "dbname", path, diag);
        merge_string(&mut self.user, raw, "user", path, diag);
        merge_string(&mut self.password, raw, "password", path, diag);
        merge_flow_list(&mut self.search_path, raw, "search_path", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "host", Value::String(self.host.clone()));
        put(&mut map, "port", self.port.clone());
        put(&mut map, "dbname", Value::String(self.dbname.clone()));
        put(&mut map, "user", Value::String(self.user.clone()));
        put(&mut map, "password", Value::String(self.password.clone()));
        put(&mut map, "search_path", self.search_path.emit());
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostgresqlProvider {
    pub name: String,
    pub data: PostgresqlData,
    pub id_field: String,
    pub table: String,
    pub geom_field: String,
    pub crs: Option<Vec<Value>>,
    pub storage_crs: Option<String>,
    pub options: Option<Mapping>,
    pub time_field: Option<String>,
    pub properties: Option<Vec<Value>>,
}

impl Default for PostgresqlProvider {
    fn default() -> Self {
        PostgresqlProvider {
            name: "PostgreSQL".into(),
            data: PostgresqlData::default(),
            id_field: String::new(),
            table: String::new(),
            geom_field: String::new(),
            crs: None,
            storage_crs: None,
            options: None,
            time_field: None,
            properties: None,
        }
    }
}

impl Section for PostgresqlProvider {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_nested(&mut self.data, raw, "data", path, diag);
        merge_string(&mut self.id_field, raw, "id_field", path, diag);
        merge_string(&mut self.table, raw, "table", path, diag);
        merge_string(&mut self.geom_field, raw, "geom_field", path, diag);
        merge_opt_list(&mut self.crs, raw, "crs", path, diag);
        merge_opt_string(&mut self.storage_crs, raw, "storage_crs", path, diag);
        merge_opt_mapping(&mut self.options, raw, "options", path, diag);
        merge_opt_string(&mut self.time_field, raw, "time_field", path, diag);
        merge_opt_list(&mut self.properties, raw, "properties", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(
            &mut map,
            "type",
            Value::String(ProviderKind::Feature.as_str().into()),
        );
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "data", Value::Mapping(self.data.emit()));
        put(&mut map, "id_field", Value::String(self.id_field.clone()));
        put(&mut map, "table", Value::String(self.table.clone()));
        put(&mut map, "geom_field", Value::String(self.geom_field.clone()));
        put_opt(&mut map, "crs", self.crs.clone().map(Value::Sequence));
        put_opt(
            &mut map,
            "storage_crs",
            self.storage_crs.clone().map(Value::String),
        );
        put_opt(&mut map, "options", self.options.clone().map(Value::Mapping));
        put_opt(
            &mut map,
            "time_field",
            self.time_field.clone().map(Value::String),
        );
        put_opt(
            &mut map,
            "properties",
            self.properties.clone().map(Value::Sequence),
        );
        map
    }
}

impl PostgresqlProvider {
    /// Positional order: type, name, table, id_field, host, dbname, user,
    /// crs, geom_field, storage_crs, password, port, search_path, options,
    /// time_field, properties.
    pub fn pack(&self) -> Vec<Value> {
        vec![
            Value::String(ProviderKind::Feature.as_str().into()),
            Value::String(self.name.clone()),
            Value::String(self.table.clone()),
            Value::String(self.id_field.clone()),
            Value::String(self.data.host.clone()),
            Value::String(self.data.dbname.clone()),
            Value::String(self.data.user.clone()),
            opt_list_cell(&self.crs),
            Value::String(self.geom_field.clone()),
            opt_string_cell(&self.storage_crs),
            Value::String(self.data.password.clone()),
            self.data.port.clone(),
            self.data.search_path.emit(),
            self.options
                .clone()
                .map(Value::Mapping)
                .unwrap_or(Value::Null),
            opt_string_cell(&self.time_field),
            self.properties
                .clone()
                .map(Value::Sequence)
                .unwrap_or(Value::Null),
        ]
    }

    pub fn unpack(values: &[Value]) -> Result<Self, GeocfgError> {
        const P: &str = "postgresql";
        check_arity(P, values, POSTGRESQL_ARITY)?;
        check_discriminant(P, values, ProviderKind::Feature)?;
        Ok(PostgresqlProvider {
            name: cell_string(P, values, 1)?,
            table: cell_string(P, values, 2)?,
            id_field: cell_string(P, values, 3)?,
            data: PostgresqlData {
                host: cell_string(P, values, 4)?,
                dbname: cell_string(P, values, 5)?,
                user: cell_string(P, values, 6)?,
                password: cell_string(P, values, 10)?,
                port: cell_scalar(P, values, 11)?,
                search_path: FlowList::new(cell_list(P, values, 12)?),
            },
            crs: cell_opt_list(P, values, 7)?,
            geom_field: cell_string(P, values, 8)?,
            storage_crs: cell_opt_string(P, values, 9)?,
            options: cell_opt_mapping(P, values, 13)?,
            time_field: cell_opt_string(P, values, 14)?,
            properties: cell_opt_list(P, values, 15)?,
        })
    }

    /// Mandatory fields that are still empty. Paths relative to the provider.
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        if self.name.is_empty() {
            invalid.push("name".into());
        }
        if self.data.host.is_empty() {
            invalid.push("data.host".into());
        }
        if scalar_is_empty(&self.data.port) {
            invalid.push("data.port".into());
        }
        if self.data.dbname.is_empty() {
            invalid.push("data.dbname".into());
        }
        if self.data.user.is_empty() {
            invalid.push("data.user".into());
        }
        if self.data.password.is_empty() {
            invalid.push("data.password".into());
        }
        if self.data.search_path.is_empty() {
            invalid.push("data.search_path".into());
        }
        if self.id_field.is_empty() {
            invalid.push("id_field".into());
        }
        if self.table.is_empty() {
            invalid.push("table".into());
        }
        if self.geom_field.is_empty() {
            invalid.push("geom_field".into());
        }
        invalid
    }
}

/// Output format advertised by the tile and map providers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderFormat {
    pub name: String,
    pub mimetype: String,
}

impl Section for ProviderFormat {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.mimetype, raw, "mimetype", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "mimetype", Value::String(self.mimetype.clone()));
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WmsOptions {
    pub layer: String,
    pub style: String,
    pub version: String,
}

impl Section for WmsOptions {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.layer, raw, "layer", path, diag);
        merge_string(&mut self.style, raw, "style", path, diag);
        merge_string(&mut self.version, raw, "version", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "layer", Value::String(self.layer.clone()));
        put(&mut map, "style", Value::String(self.style.clone()));
        put(&mut map, "version", Value::String(self.version.clone()));
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WmsFacadeProvider {
    pub name: String,
    pub data: String,
    pub options: WmsOptions,
    pub format: ProviderFormat,
    pub crs: Option<Vec<Value>>,
    pub storage_crs: Option<String>,
}

impl Default for WmsFacadeProvider {
    fn default() -> Self {
        WmsFacadeProvider {
            name: "WMSFacade".into(),
            data: String::new(),
            options: WmsOptions::default(),
            format: ProviderFormat::default(),
            crs: None,
            storage_crs: None,
        }
    }
}

impl Section for WmsFacadeProvider {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.data, raw, "data", path, diag);
        merge_nested(&mut self.options, raw, "options", path, diag);
        merge_nested(&mut self.format, raw, "format", path, diag);
        merge_opt_list(&mut self.crs, raw, "crs", path, diag);
        merge_opt_string(&mut self.storage_crs, raw, "storage_crs", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(
            &mut map,
            "type",
            Value::String(ProviderKind::Map.as_str().into()),
        );
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "data", Value::String(self.data.clone()));
        put(&mut map, "options", Value::Mapping(self.options.emit()));
        put(&mut map, "format", Value::Mapping(self.format.emit()));
        put_opt(&mut map, "crs", self.crs.clone().map(Value::Sequence));
        put_opt(
            &mut map,
            "storage_crs",
            self.storage_crs.clone().map(Value::String),
        );
        map
    }
}

impl WmsFacadeProvider {
    /// Positional order: type, name, data, crs, storage_crs, options.layer,
    /// options.style, options.version, format.name, format.mimetype.
    pub fn pack(&self) -> Vec<Value> {
        vec![
            Value::String(ProviderKind::Map.as_str().into()),
            Value::String(self.name.clone()),
            Value::String(self.data.clone()),
            opt_list_cell(&self.crs),
            opt_string_cell(&self.storage_crs),
            Value::String(self.options.layer.clone()),
            Value::String(self.options.style.clone()),
            Value::String(self.options.version.clone()),
            Value::String(self.format.name.clone()),
            Value::String(self.format.mimetype.clone()),
        ]
    }

    pub fn unpack(values: &[Value]) -> Result<Self, GeocfgError> {
        const P: &str = "wms-facade";
        check_arity(P, values, WMS_FACADE_ARITY)?;
        check_discriminant(P, values, ProviderKind::Map)?;
        Ok(WmsFacadeProvider {
            name: cell_string(P, values, 1)?,
            data: cell_string(P, values, 2)?,
            crs: cell_opt_list(P, values, 3)?,
            storage_crs: cell_opt_string(P, values, 4)?,
            options: WmsOptions {
                layer: cell_string(P, values, 5)?,
                style: cell_string(P, values, 6)?,
                version: cell_string(P, values, 7)?,
            },
            format: ProviderFormat {
                name: cell_string(P, values, 8)?,
                mimetype: cell_string(P, values, 9)?,
            },
        })
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        if self.name.is_empty() {
            invalid.push("name".into());
        }
        if self.crs.as_ref().is_none_or(|c| c.is_empty()) {
            invalid.push("crs".into());
        }
        if self.data.is_empty() {
            invalid.push("data".into());
        }
        if self.format.name.is_empty() {
            invalid.push("format.name".into());
        }
        if self.format.mimetype.is_empty() {
            invalid.push("format.mimetype".into());
        }
        if self.options.layer.is_empty() {
            invalid.push("options.layer".into());
        }
        if self.options.style.is_empty() {
            invalid.push("options.style".into());
        }
        if self.options.version.is_empty() {
            invalid.push("options.version".into());
        }
        invalid
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MvtZoom {
    pub min: i64,
    pub max: i64,
}

impl Default for MvtZoom {
    fn default() -> Self {
        MvtZoom { min: 0, max: 15 }
    }
}

impl Section for MvtZoom {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_int(&mut self.min, raw, "min", path, diag);
        merge_int(&mut self.max, raw, "max", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "min", Value::from(self.min));
        put(&mut map, "max", Value::from(self.max));
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MvtOptions {
    pub zoom: MvtZoom,
    pub schemes: Vec<Value>,
}

impl Section for MvtOptions {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_nested(&mut self.zoom, raw, "zoom", path, diag);
        merge_list(&mut self.schemes, raw, "schemes", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "zoom", Value::Mapping(self.zoom.emit()));
        put(&mut map, "schemes", Value::Sequence(self.schemes.clone()));
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MvtProxyProvider {
    pub name: String,
    pub data: String,
    pub options: MvtOptions,
    pub format: ProviderFormat,
    pub crs: Option<Vec<Value>>,
    pub storage_crs: Option<String>,
}

impl Default for MvtProxyProvider {
    fn default() -> Self {
        MvtProxyProvider {
            name: "MVT-proxy".into(),
            data: String::new(),
            options: MvtOptions::default(),
            format: ProviderFormat::default(),
            crs: None,
            storage_crs: None,
        }
    }
}

impl Section for MvtProxyProvider {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.data, raw, "data", path, diag);
        merge_nested(&mut self.options, raw, "options", path, diag);
        merge_nested(&mut self.format, raw, "format", path, diag);
        merge_opt_list(&mut self.crs, raw, "crs", path, diag);
        merge_opt_string(&mut self.storage_crs, raw, "storage_crs", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(
            &mut map,
            "type",
            Value::String(ProviderKind::Tile.as_str().into()),
        );
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "data", Value::String(self.data.clone()));
        put(&mut map, "options", Value::Mapping(self.options.emit()));
        put(&mut map, "format", Value::Mapping(self.format.emit()));
        put_opt(&mut map, "crs", self.crs.clone().map(Value::Sequence));
        put_opt(
            &mut map,
            "storage_crs",
            self.storage_crs.clone().map(Value::String),
        );
        map
    }
}

impl MvtProxyProvider {
    /// Positional order: type, name, data, crs, storage_crs, zoom.min,
    /// zoom.max, schemes, format.name, format.mimetype.
    pub fn pack(&self) -> Vec<Value> {
        vec![
            Value::String(ProviderKind::Tile.as_str().into()),
            Value::String(self.name.clone()),
            Value::String(self.data.clone()),
            opt_list_cell(&self.crs),
            opt_string_cell(&self.storage_crs),
            Value::from(self.options.zoom.min),
            Value::from(self.options.zoom.max),
            Value::Sequence(self.options.schemes.clone()),
            Value::String(self.format.name.clone()),
            Value::String(self.format.mimetype.clone()),
        ]
    }

    pub fn unpack(values: &[Value]) -> Result<Self, GeocfgError> {
        const P: &str = "mvt-proxy";
        check_arity(P, values, MVT_PROXY_ARITY)?;
        check_discriminant(P, values, ProviderKind::Tile)?;
        Ok(MvtProxyProvider {
            name: cell_string(P, values, 1)?,
            data: cell_string(P, values, 2)?,
            crs: cell_opt_list(P, values, 3)?,
            storage_crs: cell_opt_string(P, values, 4)?,
            options: MvtOptions {
                zoom: MvtZoom {
                    min: cell_int(P, values, 5)?,
                    max: cell_int(P, values, 6)?,
                },
                schemes: cell_list(P, values, 7)?,
            },
            format: ProviderFormat {
                name: cell_string(P, values, 8)?,
                mimetype: cell_string(P, values, 9)?,
            },
        })
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        if self.name.is_empty() {
            invalid.push("name".into());
        }
        if self.crs.as_ref().is_none_or(|c| c.is_empty()) {
            invalid.push("crs".into());
        }
        if self.data.is_empty() {
            invalid.push("data".into());
        }
        if self.format.name.is_empty() {
            invalid.push("format.name".into());
        }
        if self.format.mimetype.is_empty() {
            invalid.push("format.mimetype".into());
        }
        if self.options.schemes.is_empty() {
            invalid.push("options.schemes".into());
        }
        invalid
    }
}

/// One element of a resource's provider list.
#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    Postgresql(PostgresqlProvider),
    MvtProxy(MvtProxyProvider),
    WmsFacade(WmsFacadeProvider),
    /// A mapping matching no registered shape, preserved verbatim.
    Opaque(Mapping),
}

impl Provider {
    /// The discriminant of a known shape; `None` for opaque blobs.
    pub fn kind(&self) -> Option<ProviderKind> {
        match self {
            Provider::Postgresql(_) => Some(ProviderKind::Feature),
            Provider::MvtProxy(_) => Some(ProviderKind::Tile),
            Provider::WmsFacade(_) => Some(ProviderKind::Map),
            Provider::Opaque(_) => None,
        }
    }

    /// An empty provider of the given kind, for the editing surface.
    pub fn empty(kind: ProviderKind) -> Provider {
        match kind {
            ProviderKind::Feature => Provider::Postgresql(PostgresqlProvider::default()),
            ProviderKind::Tile => Provider::MvtProxy(MvtProxyProvider::default()),
            ProviderKind::Map => Provider::WmsFacade(WmsFacadeProvider::default()),
        }
    }

    /// Registry dispatch over a raw provider mapping.
    ///
    /// Shapes are tried in registry order (feature, tile, map); a shape
    /// claims the element when the discriminant matches and the shape's own
    /// nested records are present as mappings. Field-level problems inside a
    /// claimed shape fall back to defaults without entering the load report.
    pub fn from_mapping(raw: &Mapping) -> Provider {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .and_then(ProviderKind::from_text);
        match kind {
            Some(ProviderKind::Feature) if has_mapping(raw, "data") => {
                Provider::Postgresql(merge_variant(raw, "feature"))
            }
            Some(ProviderKind::Tile) if has_mapping(raw, "options") && has_mapping(raw, "format") => {
                Provider::MvtProxy(merge_variant(raw, "tile"))
            }
            Some(ProviderKind::Map) if has_mapping(raw, "options") && has_mapping(raw, "format") => {
                Provider::WmsFacade(merge_variant(raw, "map"))
            }
            _ => {
                tracing::debug!(
                    discriminant = raw.get("type").and_then(|v| v.as_str()).unwrap_or("<none>"),
                    "provider matches no registered shape; keeping it opaque"
                );
                Provider::Opaque(raw.clone())
            }
        }
    }

    pub(crate) fn emit(&self) -> Value {
        match self {
            Provider::Postgresql(p) => Value::Mapping(p.emit()),
            Provider::MvtProxy(p) => Value::Mapping(p.emit()),
            Provider::WmsFacade(p) => Value::Mapping(p.emit()),
            Provider::Opaque(m) => Value::Mapping(m.clone()),
        }
    }

    /// Mandatory fields still empty, relative to the provider. Opaque blobs
    /// are not validated.
    pub fn invalid_fields(&self) -> Vec<String> {
        match self {
            Provider::Postgresql(p) => p.invalid_fields(),
            Provider::MvtProxy(p) => p.invalid_fields(),
            Provider::WmsFacade(p) => p.invalid_fields(),
            Provider::Opaque(_) => Vec::new(),
        }
    }

    /// Flat-list form for the edit surface; `None` for opaque blobs.
    pub fn pack(&self) -> Option<Vec<Value>> {
        match self {
            Provider::Postgresql(p) => Some(p.pack()),
            Provider::MvtProxy(p) => Some(p.pack()),
            Provider::WmsFacade(p) => Some(p.pack()),
            Provider::Opaque(_) => None,
        }
    }

    /// Rebuild a provider from its flat-list form.
    pub fn unpack(kind: ProviderKind, values: &[Value]) -> Result<Provider, GeocfgError> {
        match kind {
            ProviderKind::Feature => PostgresqlProvider::unpack(values).map(Provider::Postgresql),
            ProviderKind::Tile => MvtProxyProvider::unpack(values).map(Provider::MvtProxy),
            ProviderKind::Map => WmsFacadeProvider::unpack(values).map(Provider::WmsFacade),
        }
    }
}

fn has_mapping(raw: &Mapping, key: &str) -> bool {
    matches!(raw.get(key), Some(Value::Mapping(_)))
}

fn merge_variant<T: Section>(raw: &Mapping, label: &'static str) -> T {
    let mut variant = T::default();
    let mut scratch = Diagnostics::new();
    variant.merge_fields(raw, label, &mut scratch);
    if !scratch.is_empty() {
        tracing::debug!(
            provider = label,
            defaulted = scratch.len(),
            "provider merged with defaults for unreadable fields"
        );
    }
    variant
}

fn scalar_is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Number(_) => false,
        _ => true,
    }
}

// --- flat-list cells ---

fn opt_string_cell(field: &Option<String>) -> Value {
    field.clone().map(Value::String).unwrap_or(Value::Null)
}

fn opt_list_cell(field: &Option<Vec<Value>>) -> Value {
    field.clone().map(Value::Sequence).unwrap_or(Value::Null)
}

fn check_arity(
    provider: &'static str,
    values: &[Value],
    expected: usize,
) -> Result<(), GeocfgError> {
    if values.len() != expected {
        return Err(GeocfgError::ProviderArity {
            provider,
            expected,
            got: values.len(),
        });
    }
    Ok(())
}

fn check_discriminant(
    provider: &'static str,
    values: &[Value],
    kind: ProviderKind,
) -> Result<(), GeocfgError> {
    if values[0].as_str() != Some(kind.as_str()) {
        return Err(GeocfgError::ProviderCell {
            provider,
            position: 0,
            expected: kind.as_str(),
        });
    }
    Ok(())
}

fn cell_string(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<String, GeocfgError> {
    match &values[position] {
        Value::String(s) => Ok(s.clone()),
        _ => Err(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "string",
        }),
    }
}

fn cell_opt_string(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<Option<String>, GeocfgError> {
    match &values[position] {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "string or null",
        }),
    }
}

fn cell_scalar(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<Value, GeocfgError> {
    match &values[position] {
        value @ (Value::String(_) | Value::Number(_)) => Ok(value.clone()),
        _ => Err(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "string or number",
        }),
    }
}

fn cell_int(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<i64, GeocfgError> {
    values[position]
        .as_i64()
        .ok_or(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "integer",
        })
}

fn cell_list(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<Vec<Value>, GeocfgError> {
    match &values[position] {
        Value::Sequence(items) => Ok(items.clone()),
        _ => Err(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "sequence",
        }),
    }
}

fn cell_opt_list(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<Option<Vec<Value>>, GeocfgError> {
    match &values[position] {
        Value::Null => Ok(None),
        Value::Sequence(items) => Ok(Some(items.clone())),
        _ => Err(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "sequence or null",
        }),
    }
}

fn cell_opt_mapping(
    provider: &'static str,
    values: &[Value],
    position: usize,
) -> Result<Option<Mapping>, GeocfgError> {
    match &values[position] {
        Value::Null => Ok(None),
        Value::Mapping(m) => Ok(Some(m.clone())),
        _ => Err(GeocfgError::ProviderCell {
            provider,
            position,
            expected: "mapping or null",
        }),
    }
}
