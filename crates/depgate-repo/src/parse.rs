use depgate_domain::version::normalize_version;
use depgate_types::PackageRef;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

#[derive(Debug, thiserror::Error)]
pub enum ManifestParseError {
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest must be a JSON object")]
    NotAnObject,
    #[error("'{field}' must be an object mapping package names to versions")]
    FieldNotObject { field: &'static str },
    #[error("version of '{name}' in '{field}' must be a string")]
    VersionNotString { field: &'static str, name: String },
}

/// Extract `dependencies` (and `devDependencies` when `include_dev`) in manifest order.
///
/// A missing section contributes no entries. A name declared twice in a section yields
/// two entries.
pub fn extract_dependencies(
    content: &str,
    include_dev: bool,
) -> Result<Vec<PackageRef>, ManifestParseError> {
    let content = content.trim_start_matches('\u{feff}');
    let Node::Object(doc) = serde_json::from_str::<Node>(content)? else {
        return Err(ManifestParseError::NotAnObject);
    };

    let mut out = Vec::new();
    push_section(&doc, DEPENDENCIES, &mut out)?;
    if include_dev {
        push_section(&doc, DEV_DEPENDENCIES, &mut out)?;
    }
    Ok(out)
}

fn push_section(
    doc: &[(String, Node)],
    field: &'static str,
    out: &mut Vec<PackageRef>,
) -> Result<(), ManifestParseError> {
    // A repeated top-level key resolves to its last occurrence, as in JSON.parse.
    let Some((_, section)) = doc.iter().rev().find(|(key, _)| key == field) else {
        return Ok(());
    };
    let Node::Object(section) = section else {
        return Err(ManifestParseError::FieldNotObject { field });
    };

    for (name, version) in section {
        let Node::String(version) = version else {
            return Err(ManifestParseError::VersionNotString {
                field,
                name: name.clone(),
            });
        };
        out.push(PackageRef::new(name.clone(), normalize_version(version)));
    }
    Ok(())
}

/// JSON value reduced to what extraction needs. Objects keep every member in
/// document order, repeated names included.
enum Node {
    Object(Vec<(String, Node)>),
    String(String),
    Other,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(member) = map.next_entry::<String, Node>()? {
            members.push(member);
        }
        Ok(Node::Object(members))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Node::Other)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Node, E> {
        Ok(Node::Other)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Other)
    }
}
