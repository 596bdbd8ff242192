//! Predicates over collections of JSON objects.
//!
//! Only [`Value::Object`] elements define properties. Any other element
//! (arrays, strings, numbers, `null`) is treated as an object with no keys.

use serde_json::Value;

/// Looks up `property` on every element, in order.
///
/// Returns `None` for elements that are not objects or that do not define
/// the property. An explicit `null` is `Some(&Value::Null)`.
pub fn property_values<'a>(objects: &'a [Value], property: &str) -> Vec<Option<&'a Value>> {
    objects.iter().map(|object| own_property(object, property)).collect()
}

/// Returns `true` if every element directly defines `property`.
///
/// An empty slice returns `true`.
///
/// # Examples
///
/// ```
/// use fetch_utils::every_object_has_own_property;
/// use serde_json::json;
///
/// let objects = [json!({ "foo": 1 }), json!({ "foo": 2 })];
/// assert!(every_object_has_own_property(&objects, "foo"));
/// assert!(!every_object_has_own_property(&objects, "bar"));
/// ```
pub fn every_object_has_own_property(objects: &[Value], property: &str) -> bool {
    objects
        .iter()
        .all(|object| own_property(object, property).is_some())
}

/// Returns `true` if no two elements share a value for `property`.
///
/// Values compare structurally. An absent property counts as a value of its
/// own, so two elements that both lack `property` collide. `null` is distinct
/// from absence.
///
/// # Examples
///
/// ```
/// use fetch_utils::every_object_has_unique_property_value;
/// use serde_json::json;
///
/// let unique = [json!({ "id": 1 }), json!({ "id": 2 })];
/// assert!(every_object_has_unique_property_value(&unique, "id"));
///
/// let duplicated = [json!({ "id": 1 }), json!({ "id": 1 })];
/// assert!(!every_object_has_unique_property_value(&duplicated, "id"));
/// ```
pub fn every_object_has_unique_property_value(objects: &[Value], property: &str) -> bool {
    let values = property_values(objects, property);
    let mut distinct: Vec<Option<&Value>> = Vec::with_capacity(values.len());

    for value in values {
        // Value has no Hash impl, so distinctness is checked by equality
        if distinct.contains(&value) {
            return false;
        }
        distinct.push(value);
    }

    true
}

fn own_property<'a>(object: &'a Value, property: &str) -> Option<&'a Value> {
    object.as_object().and_then(|map| map.get(property))
}
