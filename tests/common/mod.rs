#![allow(dead_code)]

use bdb_expr::metadata::{Metadata, Node};
use serde_json::{Value as Json, json};

/// Builds a metadata tree from a JSON description.
///
/// Objects become groups (datasets when the name starts with `data`),
/// strings become text attributes, numbers long or double attributes.
pub fn metadata_from_json(description: &Json) -> Metadata {
    let mut meta = Metadata::new();
    if let Json::Object(children) = description {
        for (name, child) in children {
            add_json_node(&mut meta, "/", name, child);
        }
    }
    meta
}

fn add_json_node(meta: &mut Metadata, parent: &str, name: &str, value: &Json) {
    let node = match value {
        Json::Object(_) if name.starts_with("data") => Node::dataset(name),
        Json::Object(_) => Node::group(name),
        Json::String(s) => Node::attribute(name, s.as_str()),
        Json::Number(n) if n.is_i64() => Node::attribute(name, n.as_i64().unwrap()),
        Json::Number(n) => Node::attribute(name, n.as_f64().unwrap()),
        Json::Bool(b) => Node::attribute(name, if *b { "True" } else { "False" }),
        other => panic!("unsupported fixture value {other}"),
    };
    meta.add_node(parent, node).unwrap();

    if let Json::Object(children) = value {
        let path = if parent == "/" {
            format!("/{name}")
        } else {
            format!("{parent}/{name}")
        };
        for (child_name, child) in children {
            add_json_node(meta, &path, child_name, child);
        }
    }
}

/// A small polar volume: two scans, one of them with a bropo task.
pub fn pvol() -> Metadata {
    metadata_from_json(&json!({
        "what": {
            "object": "PVOL",
            "date": "20240501",
            "time": "120500",
            "source": "WMO:02606,RAD:SE50,PLC:Angelholm"
        },
        "where": {
            "lon": 12.82,
            "lat": 56.37,
            "height": 209.0
        },
        "dataset1": {
            "where": { "elangle": 0.5, "nbins": 120 },
            "how": { "task": "se.smhi.detector.beamblockage" },
            "data1": { "what": { "quantity": "DBZH" } }
        },
        "dataset2": {
            "where": { "elangle": 1.0, "nbins": 240 },
            "how": { "task": "bropo" },
            "data1": { "what": { "quantity": "TH" } }
        }
    }))
}

/// Tree with `/where/xsize=1` and `/dataset1/where/xsize=3`.
pub fn xsize_tree() -> Metadata {
    metadata_from_json(&json!({
        "where": { "xsize": 1 },
        "dataset1": { "where": { "xsize": 3 } }
    }))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
