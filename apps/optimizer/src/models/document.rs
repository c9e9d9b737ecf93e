//! Layout document models.
//!
//! Each model owns the JSON object it was read from, in input key order
//! (`serde_json` is built with `preserve_order`). Nested lists the layout engine
//! works on (`screens`, `childs`) are lifted out into typed vectors; their key
//! keeps its slot in the object and is filled back in on serialization. Keys are
//! never dropped or reordered, `null` values included. A key added by the engine
//! (`posX` / `posY` on a fresh component, `childs` on a screen without one) is
//! appended after the existing keys.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

const SCREENS: &str = "screens";
const CHILDS: &str = "childs";

/// Top-level UI manifest. Only `ihm.width` and `screens` are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Document {
    fields: Map<String, Value>,
    /// `None` when `screens` is absent or `null`.
    screens: Option<Vec<Screen>>,
}

/// One logical UI page. Identity is its index in the document's `screens`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Screen {
    fields: Map<String, Value>,
    childs: Option<Vec<Component>>,
}

/// A positioned UI element. Only `typeComponent`, `width`, `height`, `posX` and
/// `posY` are interpreted; the engine writes `posX` / `posY` and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component {
    fields: Map<String, Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

impl Document {
    pub fn has_screens(&self) -> bool {
        self.screens.is_some()
    }

    pub fn screens(&self) -> Option<&[Screen]> {
        self.screens.as_deref()
    }

    pub fn screens_mut(&mut self) -> Option<&mut Vec<Screen>> {
        self.screens.as_mut()
    }

    /// Maximum row width from `ihm.width`, or `default` when it is absent or not a number.
    pub fn max_width(&self, default: i64) -> i64 {
        match self.fields.get("ihm").and_then(|ihm| ihm.get("width")) {
            Some(Value::Number(n)) => to_pixels(n),
            _ => default,
        }
    }

    pub fn component_count(&self) -> usize {
        self.screens()
            .unwrap_or_default()
            .iter()
            .map(|s| s.childs().map_or(0, <[Component]>::len))
            .sum()
    }
}

impl TryFrom<Map<String, Value>> for Document {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let screens = take_list(&mut fields, SCREENS)?;
        Ok(Self { fields, screens })
    }
}

impl From<Document> for Map<String, Value> {
    fn from(document: Document) -> Self {
        let Document { mut fields, screens } = document;
        put_list(&mut fields, SCREENS, screens);
        fields
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Screen
// ────────────────────────────────────────────────────────────────────────────

impl Screen {
    pub fn childs(&self) -> Option<&[Component]> {
        self.childs.as_deref()
    }

    /// Removes the components for repositioning. Absent or `null` gives an empty list.
    pub fn take_childs(&mut self) -> Vec<Component> {
        self.childs.take().unwrap_or_default()
    }

    pub fn set_childs(&mut self, childs: Vec<Component>) {
        self.childs = Some(childs);
    }
}

impl TryFrom<Map<String, Value>> for Screen {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let childs = take_list(&mut fields, CHILDS)?;
        Ok(Self { fields, childs })
    }
}

impl From<Screen> for Map<String, Value> {
    fn from(screen: Screen) -> Self {
        let Screen { mut fields, childs } = screen;
        put_list(&mut fields, CHILDS, childs);
        fields
    }
}

impl From<Screen> for Value {
    fn from(screen: Screen) -> Self {
        Value::Object(screen.into())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Component
// ────────────────────────────────────────────────────────────────────────────

impl Component {
    /// Sort key: a missing or non-string category sorts as the empty string.
    pub fn category(&self) -> &str {
        self.fields
            .get("typeComponent")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn width_px(&self, default: i64) -> i64 {
        self.dimension("width").unwrap_or(default)
    }

    pub fn height_px(&self, default: i64) -> i64 {
        self.dimension("height").unwrap_or(default)
    }

    #[cfg(test)]
    pub fn position(&self) -> Option<(i64, i64)> {
        Some((
            self.fields.get("posX")?.as_i64()?,
            self.fields.get("posY")?.as_i64()?,
        ))
    }

    /// Writes integer `posX` / `posY`, in place if the keys already exist.
    pub fn set_position(&mut self, x: i64, y: i64) {
        self.fields.insert("posX".to_string(), Value::from(x));
        self.fields.insert("posY".to_string(), Value::from(y));
    }

    fn dimension(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(Value::Number(n)) => Some(to_pixels(n)),
            _ => None,
        }
    }
}

impl From<Component> for Value {
    fn from(component: Component) -> Self {
        Value::Object(component.fields)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Lifts the list at `key` out of `fields`, leaving a `null` placeholder in its
/// slot. Absent or `null` yields `None`; any other non-list value is an error.
fn take_list<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<T>>, serde_json::Error> {
    match fields.get_mut(key) {
        Some(slot @ Value::Array(_)) => serde_json::from_value(slot.take()).map(Some),
        None | Some(Value::Null) => Ok(None),
        Some(_) => Err(serde_json::Error::custom(format!("`{key}` must be a list"))),
    }
}

/// Puts a lifted list back. An existing key keeps its position; a new one is appended.
fn put_list<T: Into<Value>>(fields: &mut Map<String, Value>, key: &str, items: Option<Vec<T>>) {
    if let Some(items) = items {
        let items = items.into_iter().map(Into::into).collect();
        fields.insert(key.to_string(), Value::Array(items));
    }
}

/// Converts a JSON number to whole, non-negative pixels.
/// Fractions round up so a packed row never undercounts its width.
fn to_pixels(n: &Number) -> i64 {
    let px = if let Some(i) = n.as_i64() {
        i
    } else if n.is_u64() {
        i64::MAX
    } else {
        let f = n.as_f64().unwrap_or(0.0).ceil();
        if f >= i64::MAX as f64 {
            i64::MAX
        } else {
            f as i64
        }
    };
    px.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(value: Value) -> Component {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_component_defaults_when_sizes_missing() {
        let c = component(json!({"typeComponent": "Button"}));
        assert_eq!(c.width_px(100), 100);
        assert_eq!(c.height_px(50), 50);
        assert_eq!(c.category(), "Button");
    }

    #[test]
    fn test_missing_or_null_category_is_empty_string() {
        assert_eq!(component(json!({"width": 10})).category(), "");
        assert_eq!(component(json!({"typeComponent": null})).category(), "");
    }

    #[test]
    fn test_null_sizes_fall_back_to_defaults() {
        let c = component(json!({"width": null, "height": "tall"}));
        assert_eq!(c.width_px(100), 100);
        assert_eq!(c.height_px(50), 50);
    }

    #[test]
    fn test_fractional_and_negative_sizes() {
        let c = component(json!({"width": 120.2, "height": -5}));
        assert_eq!(c.width_px(100), 121);
        assert_eq!(c.height_px(50), 0);
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let raw = json!({
            "typeComponent": "Label",
            "width": 80,
            "text": "Hello",
            "style": {"color": "red"}
        });
        assert_eq!(serde_json::to_value(component(raw.clone())).unwrap(), raw);
    }

    #[test]
    fn test_null_fields_and_key_order_survive_round_trip() {
        let raw = r#"{"ihm":null,"name":"app","screens":null,"version":2}"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        assert!(!doc.has_screens());
        assert_eq!(serde_json::to_string(&doc).unwrap(), raw);

        let raw = r#"{"id":"s1","childs":[{"typeComponent":null,"width":100,"label":"x"}],"title":null}"#;
        let screen: Screen = serde_json::from_str(raw).unwrap();
        assert_eq!(screen.childs().map(<[Component]>::len), Some(1));
        assert_eq!(serde_json::to_string(&screen).unwrap(), raw);
    }

    #[test]
    fn test_set_position_keeps_existing_slots_and_appends_new_ones() {
        let mut c: Component =
            serde_json::from_str(r#"{"label":"x","posY":5,"typeComponent":null,"width":100}"#)
                .unwrap();
        c.set_position(20, 30);
        assert_eq!(c.position(), Some((20, 30)));
        assert_eq!(
            serde_json::to_string(&c).unwrap(),
            r#"{"label":"x","posY":30,"typeComponent":null,"width":100,"posX":20}"#
        );
    }

    #[test]
    fn test_screen_without_childs_appends_list_after_layout() {
        let mut screen: Screen = serde_json::from_str(r#"{"title":"blank"}"#).unwrap();
        let childs = screen.take_childs();
        assert!(childs.is_empty());
        screen.set_childs(childs);
        assert_eq!(
            serde_json::to_string(&screen).unwrap(),
            r#"{"title":"blank","childs":[]}"#
        );
    }

    #[test]
    fn test_non_list_screens_rejected() {
        let err = serde_json::from_value::<Document>(json!({"screens": "home"})).unwrap_err();
        assert!(err.to_string().contains("`screens` must be a list"));

        let err = serde_json::from_value::<Document>(json!({"screens": [{"childs": [1]}]}));
        assert!(err.is_err());
    }

    #[test]
    fn test_max_width_default_without_ihm() {
        let doc: Document = serde_json::from_value(json!({"screens": []})).unwrap();
        assert_eq!(doc.max_width(800), 800);

        let doc: Document = serde_json::from_value(json!({"ihm": null})).unwrap();
        assert_eq!(doc.max_width(800), 800);

        let doc: Document =
            serde_json::from_value(json!({"ihm": {"width": 1024, "name": "x"}})).unwrap();
        assert_eq!(doc.max_width(800), 1024);
    }

    #[test]
    fn test_component_count() {
        let doc: Document = serde_json::from_value(json!({
            "screens": [{"childs": [{}, {}]}, {"childs": null}, {"childs": [{}]}]
        }))
        .unwrap();
        assert_eq!(doc.component_count(), 3);
    }
}
