//! Request key normalisation: admin forms may post camelCase keys; columns are snake_case.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "imageUrl" -> "image_url", "isActive" -> "is_active"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Turn a JSON object body into a column map with snake_case keys.
/// When both spellings are sent, the snake_case one wins.
pub fn object_to_snake_map(obj: Map<String, Value>) -> HashMap<String, Value> {
    let mut out = HashMap::with_capacity(obj.len());
    let mut camel = Vec::new();
    for (k, v) in obj {
        let snake = to_snake_case(&k);
        if snake == k {
            out.insert(k, v);
        } else {
            camel.push((snake, v));
        }
    }
    for (k, v) in camel {
        out.entry(k).or_insert(v);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_camel_identifiers() {
        assert_eq!(to_snake_case("imageUrl"), "image_url");
        assert_eq!(to_snake_case("secondaryButtonLink"), "secondary_button_link");
        assert_eq!(to_snake_case("display_order"), "display_order");
    }

    #[test]
    fn snake_spelling_wins() {
        let obj = json!({ "isActive": false, "is_active": true, "shortDescription": "x" });
        let Value::Object(obj) = obj else { unreachable!() };
        let map = object_to_snake_map(obj);
        assert_eq!(map["is_active"], json!(true));
        assert_eq!(map["short_description"], json!("x"));
        assert_eq!(map.len(), 2);
    }
}
