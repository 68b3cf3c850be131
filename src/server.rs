//! The `server` section of the document: bind address, public URL, content
//! defaults, the map preview backdrop, limits, and optional subsystems.

use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::merge::{
    Section, merge_bool, merge_int, merge_nested, merge_opt_enum, merge_opt_list,
    merge_opt_nested, merge_opt_string, merge_string, put, put_opt,
};
use crate::records::string_enum;

string_enum! {
    /// What the service does when a request exceeds the item limits.
    pub enum OnExceed {
        Unset => "",
        Throttle => "throttle",
        Error => "error",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerBind {
    pub host: String,
    pub port: i64,
}

impl Default for ServerBind {
    fn default() -> Self {
        ServerBind {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl Section for ServerBind {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.host, raw, "host", path, diag);
        merge_int(&mut self.port, raw, "port", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "host", Value::String(self.host.clone()));
        put(&mut map, "port", Value::from(self.port));
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerLimits {
    pub default_items: i64,
    pub max_items: i64,
    pub on_exceed: Option<OnExceed>,
}

impl Default for ServerLimits {
    fn default() -> Self {
        ServerLimits {
            default_items: 20,
            max_items: 50,
            on_exceed: None,
        }
    }
}

impl Section for ServerLimits {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_int(&mut self.default_items, raw, "default_items", path, diag);
        merge_int(&mut self.max_items, raw, "max_items", path, diag);
        merge_opt_enum(&mut self.on_exceed, raw, "on_exceed", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "default_items", Value::from(self.default_items));
        put(&mut map, "max_items", Value::from(self.max_items));
        put_opt(
            &mut map,
            "on_exceed",
            self.on_exceed.map(|e| Value::String(e.as_str().into())),
        );
        map
    }
}

/// Backdrop tiles for the interactive map preview.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerMap {
    pub url: String,
    pub attribution: String,
}

impl Default for ServerMap {
    fn default() -> Self {
        ServerMap {
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution:
                "&copy; <a href=\"https://openstreetmap.org/copyright\">OpenStreetMap contributors</a>"
                    .into(),
        }
    }
}

impl Section for ServerMap {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.url, raw, "url", path, diag);
        merge_string(&mut self.attribution, raw, "attribution", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "url", Value::String(self.url.clone()));
        put(
            &mut map,
            "attribution",
            Value::String(self.attribution.clone()),
        );
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerTemplates {
    pub path: String,
    /// Document key `static`.
    pub static_dir: String,
}

impl Section for ServerTemplates {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.path, raw, "path", path, diag);
        merge_string(&mut self.static_dir, raw, "static", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "path", Value::String(self.path.clone()));
        put(&mut map, "static", Value::String(self.static_dir.clone()));
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerManager {
    pub name: String,
    pub connection: String,
    pub output_dir: String,
}

impl Section for ServerManager {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.name, raw, "name", path, diag);
        merge_string(&mut self.connection, raw, "connection", path, diag);
        merge_string(&mut self.output_dir, raw, "output_dir", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "name", Value::String(self.name.clone()));
        put(&mut map, "connection", Value::String(self.connection.clone()));
        put(&mut map, "output_dir", Value::String(self.output_dir.clone()));
        map
    }
}

/// API versioning rules. Not exposed in the editing surface, but carried so
/// documents using them survive a load/save cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerApiRules {
    pub api_version: String,
    pub strict_slashes: bool,
    pub url_prefix: String,
    pub version_header: String,
}

impl Default for ServerApiRules {
    fn default() -> Self {
        ServerApiRules {
            api_version: "1.2.3".into(),
            strict_slashes: true,
            url_prefix: "v{api_major}".into(),
            version_header: "X-API-Version".into(),
        }
    }
}

impl Section for ServerApiRules {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_string(&mut self.api_version, raw, "api_version", path, diag);
        merge_bool(&mut self.strict_slashes, raw, "strict_slashes", path, diag);
        merge_string(&mut self.url_prefix, raw, "url_prefix", path, diag);
        merge_string(&mut self.version_header, raw, "version_header", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(
            &mut map,
            "api_version",
            Value::String(self.api_version.clone()),
        );
        put(&mut map, "strict_slashes", Value::Bool(self.strict_slashes));
        put(&mut map, "url_prefix", Value::String(self.url_prefix.clone()));
        put(
            &mut map,
            "version_header",
            Value::String(self.version_header.clone()),
        );
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: ServerBind,
    pub url: String,
    pub mimetype: String,
    pub encoding: String,
    pub map: ServerMap,
    pub gzip: bool,
    pub language: Option<String>,
    pub languages: Option<Vec<Value>>,
    pub cors: bool,
    pub pretty_print: bool,
    pub limits: ServerLimits,
    pub admin: bool,
    pub templates: Option<ServerTemplates>,
    pub manager: Option<ServerManager>,
    pub api_rules: Option<ServerApiRules>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: ServerBind::default(),
            url: "http://localhost:5000".into(),
            mimetype: "application/json; charset=UTF-8".into(),
            encoding: "utf-8".into(),
            map: ServerMap::default(),
            gzip: false,
            language: None,
            languages: None,
            cors: false,
            pretty_print: false,
            limits: ServerLimits::default(),
            admin: false,
            templates: None,
            manager: None,
            api_rules: None,
        }
    }
}

impl Section for ServerConfig {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_nested(&mut self.bind, raw, "bind", path, diag);
        merge_string(&mut self.url, raw, "url", path, diag);
        merge_string(&mut self.mimetype, raw, "mimetype", path, diag);
        merge_string(&mut self.encoding, raw, "encoding", path, diag);
        merge_nested(&mut self.map, raw, "map", path, diag);
        merge_bool(&mut self.gzip, raw, "gzip", path, diag);
        merge_opt_string(&mut self.language, raw, "language", path, diag);
        merge_opt_list(&mut self.languages, raw, "languages", path, diag);
        merge_bool(&mut self.cors, raw, "cors", path, diag);
        merge_bool(&mut self.pretty_print, raw, "pretty_print", path, diag);
        merge_nested(&mut self.limits, raw, "limits", path, diag);
        merge_bool(&mut self.admin, raw, "admin", path, diag);
        merge_opt_nested(&mut self.templates, raw, "templates", path, diag);
        merge_opt_nested(&mut self.manager, raw, "manager", path, diag);
        merge_opt_nested(&mut self.api_rules, raw, "api_rules", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "bind", Value::Mapping(self.bind.emit()));
        put(&mut map, "url", Value::String(self.url.clone()));
        put(&mut map, "mimetype", Value::String(self.mimetype.clone()));
        put(&mut map, "encoding", Value::String(self.encoding.clone()));
        put(&mut map, "map", Value::Mapping(self.map.emit()));
        put(&mut map, "gzip", Value::Bool(self.gzip));
        put_opt(&mut map, "language", self.language.clone().map(Value::String));
        put_opt(
            &mut map,
            "languages",
            self.languages.clone().map(Value::Sequence),
        );
        put(&mut map, "cors", Value::Bool(self.cors));
        put(&mut map, "pretty_print", Value::Bool(self.pretty_print));
        put(&mut map, "limits", Value::Mapping(self.limits.emit()));
        put(&mut map, "admin", Value::Bool(self.admin));
        put_opt(
            &mut map,
            "templates",
            self.templates.as_ref().map(|t| Value::Mapping(t.emit())),
        );
        put_opt(
            &mut map,
            "manager",
            self.manager.as_ref().map(|m| Value::Mapping(m.emit())),
        );
        put_opt(
            &mut map,
            "api_rules",
            self.api_rules.as_ref().map(|r| Value::Mapping(r.emit())),
        );
        map
    }
}

impl ServerConfig {
    /// Business-rule check of the mandatory server fields. Paths are relative
    /// to the section.
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        if self.bind.host.is_empty() {
            invalid.push("bind.host".into());
        }
        if self.bind.port <= 0 {
            invalid.push("bind.port".into());
        }
        if self.url.is_empty() {
            invalid.push("url".into());
        }
        if self.mimetype.is_empty() {
            invalid.push("mimetype".into());
        }
        if self.encoding.is_empty() {
            invalid.push("encoding".into());
        }
        if self.map.url.is_empty() {
            invalid.push("map.url".into());
        }
        if self.map.attribution.is_empty() {
            invalid.push("map.attribution".into());
        }
        invalid
    }
}
