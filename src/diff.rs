//! Untyped-tree differencer: the round-trip correctness oracle.
//!
//! Compares two generic value trees and reports every added, removed and
//! changed leaf by path. Mapping comparison ignores key order; sequence
//! comparison is positional. After a load→merge→re-emit cycle, additions are
//! benign (defaults materializing in the output) while removals and changes
//! mean the cycle lost information — unless the load already flagged the
//! path, which [`DiffReport::without_flagged`] accounts for.

use serde::Serialize;
use serde_yaml::Value;

use crate::value::{dotted, indexed};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub path: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedEntry {
    pub path: String,
    pub old: Value,
    pub new: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffReport {
    /// Paths present only in the second tree.
    pub added: Vec<DiffEntry>,
    /// Paths present only in the first tree.
    pub removed: Vec<DiffEntry>,
    /// Paths present in both with different values.
    pub changed: Vec<ChangedEntry>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// True when nothing from the first tree was lost. Additions do not
    /// count: a save may legitimately materialize defaults.
    pub fn is_lossless(&self) -> bool {
        self.removed.is_empty() && self.changed.is_empty()
    }

    /// Drop differences already explained by the load report:
    /// removed nulls, removed paths that were flagged on load, and changes
    /// to null at flagged paths.
    pub fn without_flagged(mut self, flagged: &[String]) -> DiffReport {
        self.removed
            .retain(|entry| !entry.value.is_null() && !flagged.contains(&entry.path));
        self.changed
            .retain(|entry| !(entry.new.is_null() && flagged.contains(&entry.path)));
        self
    }
}

/// Compare two value trees.
pub fn diff(a: &Value, b: &Value) -> DiffReport {
    let mut report = DiffReport::default();
    diff_at(a, b, "", &mut report);
    report
}

fn diff_at(a: &Value, b: &Value, path: &str, report: &mut DiffReport) {
    match (a, b) {
        (Value::Mapping(ma), Value::Mapping(mb)) => {
            for (key, va) in ma {
                let key_path = dotted(path, &key_text(key));
                match mb.get(key) {
                    Some(vb) => diff_at(va, vb, &key_path, report),
                    None => report.removed.push(DiffEntry {
                        path: key_path,
                        value: va.clone(),
                    }),
                }
            }
            for (key, vb) in mb {
                if ma.get(key).is_none() {
                    report.added.push(DiffEntry {
                        path: dotted(path, &key_text(key)),
                        value: vb.clone(),
                    });
                }
            }
        }
        (Value::Sequence(sa), Value::Sequence(sb)) => {
            for i in 0..sa.len().max(sb.len()) {
                let item_path = indexed(path, i);
                match (sa.get(i), sb.get(i)) {
                    (Some(va), Some(vb)) => diff_at(va, vb, &item_path, report),
                    (Some(va), None) => report.removed.push(DiffEntry {
                        path: item_path,
                        value: va.clone(),
                    }),
                    (None, Some(vb)) => report.added.push(DiffEntry {
                        path: item_path,
                        value: vb.clone(),
                    }),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if a != b {
                report.changed.push(ChangedEntry {
                    path: path.to_string(),
                    old: a.clone(),
                    new: b.clone(),
                });
            }
        }
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConfigDocument;
    use crate::fixtures::test::sample_document;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn identical_trees_diff_empty() {
        let tree = sample_document();
        assert!(diff(&tree, &tree).is_empty());
    }

    #[test]
    fn key_order_is_ignored() {
        let a = yaml("x: 1\ny: 2\n");
        let b = yaml("y: 2\nx: 1\n");
        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn sequence_order_matters() {
        let a = yaml("items: [1, 2]\n");
        let b = yaml("items: [2, 1]\n");
        let report = diff(&a, &b);
        assert_eq!(report.changed.len(), 2);
        assert_eq!(report.changed[0].path, "items[0]");
        assert_eq!(report.changed[1].path, "items[1]");
    }

    #[test]
    fn added_and_removed_keys_reported() {
        let a = yaml("keep: 1\ngone: 2\n");
        let b = yaml("keep: 1\nnew: 3\n");
        let report = diff(&a, &b);
        assert_eq!(report.removed.len(), 1);
        assert_eq!(report.removed[0].path, "gone");
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.added[0].path, "new");
    }

    #[test]
    fn nested_changes_carry_full_paths() {
        let a = yaml("server: {bind: {port: 5000}}\n");
        let b = yaml("server: {bind: {port: 8000}}\n");
        let report = diff(&a, &b);
        assert_eq!(report.changed.len(), 1);
        assert_eq!(report.changed[0].path, "server.bind.port");
        assert_eq!(report.changed[0].old, Value::from(5000));
        assert_eq!(report.changed[0].new, Value::from(8000));
    }

    #[test]
    fn shape_change_is_one_changed_entry() {
        let a = yaml("field: {x: 1}\n");
        let b = yaml("field: [1]\n");
        let report = diff(&a, &b);
        assert_eq!(report.changed.len(), 1);
        assert_eq!(report.changed[0].path, "field");
    }

    #[test]
    fn longer_second_sequence_is_added() {
        let a = yaml("items: [1]\n");
        let b = yaml("items: [1, 2, 3]\n");
        let report = diff(&a, &b);
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.added[0].path, "items[1]");
    }

    #[test]
    fn int_and_float_of_same_magnitude_differ() {
        let a = yaml("bbox: [10]\n");
        let b = yaml("bbox: [10.0]\n");
        let report = diff(&a, &b);
        assert_eq!(report.changed.len(), 1);
    }

    // --- filters ---

    #[test]
    fn removed_nulls_are_filtered() {
        let a = yaml("optional: null\nkept: 1\n");
        let b = yaml("kept: 1\n");
        let report = diff(&a, &b).without_flagged(&[]);
        assert!(report.is_lossless());
    }

    #[test]
    fn removed_flagged_paths_are_filtered() {
        let a = yaml("resources: {a: 5}\n");
        let b = yaml("resources: {}\n");
        let flagged = vec!["resources.a".to_string()];
        let report = diff(&a, &b).without_flagged(&flagged);
        assert!(report.is_lossless());
    }

    #[test]
    fn unflagged_removals_survive_the_filter() {
        let a = yaml("server: {flux: 1, url: u}\n");
        let b = yaml("server: {url: u}\n");
        let report = diff(&a, &b).without_flagged(&["server.other".to_string()]);
        assert!(!report.is_lossless());
        assert_eq!(report.removed[0].path, "server.flux");
    }

    #[test]
    fn changed_to_null_at_flagged_path_is_filtered() {
        let a = yaml("level: ERROR\n");
        let b = yaml("level: null\n");
        let flagged = vec!["level".to_string()];
        let report = diff(&a, &b).without_flagged(&flagged);
        assert!(report.is_lossless());
    }

    // --- the round-trip oracle ---

    #[test]
    fn sample_round_trip_is_identity() {
        let raw = sample_document();
        let mut doc = ConfigDocument::default();
        let diag = doc.apply(&raw);
        assert!(diag.is_empty());
        let report = diff(&raw, &doc.to_value());
        assert!(report.is_empty(), "round trip drifted: {report:?}");
    }

    #[test]
    fn sparse_round_trip_only_adds_defaults() {
        let raw = yaml(
            "server: {url: http://svc}\nresources:\n  a:\n    providers:\n      - type: feature\n        name: P\n        data: {host: h, port: 5432, dbname: d, user: u, password: p, search_path: [public]}\n        id_field: id\n        table: t\n        geom_field: g\n",
        );
        let mut doc = ConfigDocument::default();
        let diag = doc.apply(&raw);
        let report = diff(&raw, &doc.to_value()).without_flagged(&diag.all());
        assert!(report.is_lossless(), "round trip lost data: {report:?}");
        assert!(!report.added.is_empty(), "defaults should materialize");
    }

    #[test]
    fn bbox_normalization_is_the_only_round_trip_change() {
        let raw = yaml(
            "resources:\n  a:\n    type: collection\n    title: T\n    description: D\n    keywords: [k]\n    extents: {spatial: {bbox: ['10', '20.5', '30', '40']}}\n    providers: []\n",
        );
        let mut doc = ConfigDocument::default();
        let diag = doc.apply(&raw);
        let report = diff(&raw, &doc.to_value()).without_flagged(&diag.all());
        assert!(report.removed.is_empty());
        assert!(
            report
                .changed
                .iter()
                .all(|c| c.path.starts_with("resources.a.extents.spatial.bbox[")),
            "only the declared bbox normalization may change values: {report:?}"
        );
        assert_eq!(report.changed.len(), 4);
    }
}
