//! Conversion of rendered output into plain JSON.

use serde::Serialize;
use serde_json::Value as JsonValue;
use sermodel_core::Result;

/// Round-trip `value` through its JSON text form.
///
/// The result holds only plain JSON values: objects, lists, strings, numbers,
/// booleans and null. Anything that does not survive a dump fails here rather
/// than in the caller's hands.
pub fn dump_and_load<T: Serialize + ?Sized>(value: &T) -> Result<JsonValue> {
    let text = serde_json::to_string(value)?;
    Ok(serde_json::from_str(&text)?)
}
