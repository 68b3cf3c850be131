//! The `logging` section of the document.

use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::merge::{
    Section, merge_enum, merge_opt_int, merge_opt_nested, merge_opt_string, put, put_opt,
};
use crate::records::string_enum;

string_enum! {
    /// Log severity threshold of the configured service.
    pub enum LogLevel {
        Critical => "CRITICAL",
        Error => "ERROR",
        Warning => "WARNING",
        Info => "INFO",
        Debug => "DEBUG",
        Notset => "NOTSET",
    }
}

/// Log file rotation settings. Optional as a whole and in every part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingRotation {
    pub mode: Option<String>,
    pub when: Option<String>,
    pub interval: Option<i64>,
    pub max_bytes: Option<i64>,
    pub backup_count: Option<i64>,
}

impl Section for LoggingRotation {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_opt_string(&mut self.mode, raw, "mode", path, diag);
        merge_opt_string(&mut self.when, raw, "when", path, diag);
        merge_opt_int(&mut self.interval, raw, "interval", path, diag);
        merge_opt_int(&mut self.max_bytes, raw, "max_bytes", path, diag);
        merge_opt_int(&mut self.backup_count, raw, "backup_count", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put_opt(&mut map, "mode", self.mode.clone().map(Value::String));
        put_opt(&mut map, "when", self.when.clone().map(Value::String));
        put_opt(&mut map, "interval", self.interval.map(Value::from));
        put_opt(&mut map, "max_bytes", self.max_bytes.map(Value::from));
        put_opt(&mut map, "backup_count", self.backup_count.map(Value::from));
        map
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub logfile: Option<String>,
    pub logformat: Option<String>,
    pub dateformat: Option<String>,
    pub rotation: Option<LoggingRotation>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Error,
            logfile: None,
            logformat: None,
            dateformat: None,
            rotation: None,
        }
    }
}

impl Section for LoggingConfig {
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics) {
        merge_enum(&mut self.level, raw, "level", path, diag);
        merge_opt_string(&mut self.logfile, raw, "logfile", path, diag);
        merge_opt_string(&mut self.logformat, raw, "logformat", path, diag);
        merge_opt_string(&mut self.dateformat, raw, "dateformat", path, diag);
        merge_opt_nested(&mut self.rotation, raw, "rotation", path, diag);
    }

    fn emit(&self) -> Mapping {
        let mut map = Mapping::new();
        put(&mut map, "level", Value::String(self.level.as_str().into()));
        put_opt(&mut map, "logfile", self.logfile.clone().map(Value::String));
        put_opt(
            &mut map,
            "logformat",
            self.logformat.clone().map(Value::String),
        );
        put_opt(
            &mut map,
            "dateformat",
            self.dateformat.clone().map(Value::String),
        );
        put_opt(
            &mut map,
            "rotation",
            self.rotation.as_ref().map(|r| Value::Mapping(r.emit())),
        );
        map
    }
}
