//! Rendering stored records through a definition.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use sermodel_core::{Direction, Error, Record, Result, Store, Value};

use crate::classify;
use crate::definition::{FieldOverride, SerializerDefinition};

/// Output tree produced by [`render`]. Object keys keep definition order.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Value(Value),
    List(Vec<Rendered>),
    Object(Vec<(&'static str, Rendered)>),
}

impl Rendered {
    pub const NULL: Rendered = Rendered::Value(Value::Null);

    /// Value under `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<&Rendered> {
        match self {
            Rendered::Object(entries) => entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            Rendered::Object(entries) => entries.iter().map(|(k, _)| *k).collect(),
            _ => Vec::new(),
        }
    }
}

impl Serialize for Rendered {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Rendered::Value(value) => value.serialize(serializer),
            Rendered::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Rendered::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Render `record` with every field the definition exposes.
///
/// Forward relations follow the stored key; a missing key renders `null`.
/// Reverse single relations render `null` when no related row exists and
/// reverse multi relations render every related row in creation order.
pub fn render<S: Store + ?Sized>(
    definition: &SerializerDefinition,
    record: &Record,
    store: &S,
) -> Result<Rendered> {
    let model = definition.model();
    if record.model() != model {
        return Err(Error::Config(format!(
            "cannot render a {} record with a {} serializer",
            record.model().name,
            model.name
        )));
    }

    let mut entries = Vec::with_capacity(definition.fields().len());
    for &name in definition.fields() {
        let rendered = match definition.child(name) {
            Some(child) => {
                let many = definition.nested(name).is_some_and(|n| n.is_many());
                render_relation(definition, name, child, many, record, store)?
            }
            None => render_attribute(definition, name, record),
        };
        entries.push((name, rendered));
    }
    Ok(Rendered::Object(entries))
}

fn render_attribute(definition: &SerializerDefinition, name: &str, record: &Record) -> Rendered {
    let value = record.value_or_null(name);
    match definition.override_for(name) {
        Some(FieldOverride::ParsedJson) => Rendered::Value(parsed_json(name, value)),
        None => Rendered::Value(value.clone()),
    }
}

/// Structured values as documents. Text holding a JSON dump is parsed.
fn parsed_json(name: &str, value: &Value) -> Value {
    match value {
        Value::Text(text) => match serde_json::from_str(text) {
            Ok(json) => Value::Json(json),
            Err(e) => {
                tracing::debug!(field = name, error = %e, "Stored text is not JSON, rendering as text");
                value.clone()
            }
        },
        other => other.clone(),
    }
}

fn render_relation<S: Store + ?Sized>(
    definition: &SerializerDefinition,
    name: &str,
    child: &SerializerDefinition,
    many: bool,
    record: &Record,
    store: &S,
) -> Result<Rendered> {
    let model = definition.model();
    let info = classify::relation(model, name)?;
    let related = info.related_model();

    match info.direction {
        Direction::Forward => match record.foreign_key(name) {
            Some(key) => {
                let target = store.get(related, key).ok_or(Error::NotFound {
                    model: related.name,
                    key,
                })?;
                render(child, target, store)
            }
            None => Ok(Rendered::NULL),
        },
        Direction::Reverse => {
            let back = classify::related_back_reference(model, name)?;
            let rows = store.find_related(related, back, record.key());
            if many {
                rows.into_iter()
                    .map(|row| render(child, row, store))
                    .collect::<Result<Vec<_>>>()
                    .map(Rendered::List)
            } else {
                match rows.first() {
                    Some(row) => render(child, row, store),
                    None => Ok(Rendered::NULL),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::filter::SerializableModelFilter;
    use crate::testing::{AUTHOR, COMMENT, POST, PROFILE};
    use serde_json::json;
    use sermodel_core::FieldValues;
    use sermodel_session::Session;

    fn values(pairs: &[(&'static str, Value)]) -> FieldValues {
        pairs.iter().cloned().collect()
    }

    fn seed(session: &mut Session) -> Record {
        let author = session
            .create_row(
                &AUTHOR,
                values(&[
                    ("name", Value::from("Ann")),
                    ("settings", Value::Json(json!({"theme": "dark"}))),
                ]),
            )
            .unwrap();
        for title in ["first", "second"] {
            let post = session
                .create_row(
                    &POST,
                    values(&[
                        ("title", Value::from(title)),
                        ("author", Value::BigInt(author.key())),
                        ("metadata", Value::from(r#"{"words": 10}"#)),
                    ]),
                )
                .unwrap();
            session
                .create_row(
                    &COMMENT,
                    values(&[("body", Value::from("ok")), ("post", Value::BigInt(post.key()))]),
                )
                .unwrap();
        }
        author
    }

    fn to_json(rendered: &Rendered) -> serde_json::Value {
        serde_json::to_value(rendered).unwrap()
    }

    #[test]
    fn test_render_attributes_only() {
        let mut session = Session::new();
        let author = seed(&mut session);
        let def = build(&AUTHOR, &SerializableModelFilter::default().scope_for("author")).unwrap();
        let out = render(&def, &author, &session).unwrap();
        assert_eq!(out.keys(), vec!["name", "bio", "settings"]);
        assert_eq!(
            to_json(&out),
            json!({"name": "Ann", "bio": null, "settings": {"theme": "dark"}})
        );
    }

    #[test]
    fn test_render_reverse_relations() {
        let mut session = Session::new();
        let author = seed(&mut session);
        let filter = SerializableModelFilter::default().with_max_depth(2);
        let def = build(&AUTHOR, &filter.scope_for("author")).unwrap();
        let out = to_json(&render(&def, &author, &session).unwrap());

        assert_eq!(out["profile"], json!(null));
        let posts = out["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["title"], "first");
        assert_eq!(posts[1]["title"], "second");
        // string-stored document is parsed
        assert_eq!(posts[0]["metadata"], json!({"words": 10}));
        assert_eq!(posts[0]["comments"], json!([{"body": "ok"}]));
    }

    #[test]
    fn test_render_forward_relation() {
        let mut session = Session::new();
        let author = seed(&mut session);
        let profile = session
            .create_row(
                &PROFILE,
                values(&[
                    ("author", Value::BigInt(author.key())),
                    ("website", Value::from("https://ann.dev")),
                ]),
            )
            .unwrap();
        let filter = SerializableModelFilter::default().with_max_depth(1);
        let def = build(&PROFILE, &filter.scope_for("profile")).unwrap();
        let out = to_json(&render(&def, &profile, &session).unwrap());
        assert_eq!(out["website"], "https://ann.dev");
        assert_eq!(out["author"]["name"], "Ann");

        let author_def = build(&AUTHOR, &filter.scope_for("author")).unwrap();
        let out = to_json(&render(&author_def, &author, &session).unwrap());
        assert_eq!(out["profile"], json!({"website": "https://ann.dev"}));
    }

    #[test]
    fn test_render_empty_reverse_multi_is_empty_list() {
        let mut session = Session::new();
        let author = session
            .create_row(&AUTHOR, values(&[("name", Value::from("Bo"))]))
            .unwrap();
        let filter = SerializableModelFilter::default().with_max_depth(1);
        let def = build(&AUTHOR, &filter.scope_for("author")).unwrap();
        let out = to_json(&render(&def, &author, &session).unwrap());
        assert_eq!(out["posts"], json!([]));
    }

    #[test]
    fn test_render_rejects_foreign_record() {
        let mut session = Session::new();
        let author = seed(&mut session);
        let def = build(&POST, &SerializableModelFilter::default().scope()).unwrap();
        assert!(matches!(render(&def, &author, &session), Err(Error::Config(_))));
    }

    #[test]
    fn test_only_structured_attributes_are_parsed() {
        let mut session = Session::new();
        let author = session
            .create_row(
                &AUTHOR,
                values(&[
                    ("name", Value::from("Ann")),
                    ("bio", Value::from(r#"{"not": "parsed"}"#)),
                    ("settings", Value::from(r#"{"theme": "dark"}"#)),
                ]),
            )
            .unwrap();
        let def = build(&AUTHOR, &SerializableModelFilter::default().scope_for("author")).unwrap();
        let out = to_json(&render(&def, &author, &session).unwrap());
        assert_eq!(out["bio"], json!(r#"{"not": "parsed"}"#));
        assert_eq!(out["settings"], json!({"theme": "dark"}));
    }

    #[test]
    fn test_parsed_json_handles_stored_forms() {
        let value = Value::Json(json!({"a": 1}));
        assert_eq!(parsed_json("x", &value), value);
        assert_eq!(parsed_json("x", &Value::from("not json")), Value::from("not json"));
        assert_eq!(parsed_json("x", &Value::Null), Value::Null);
    }
}
