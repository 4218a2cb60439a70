//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Keeps the inline-style and class juggling in one place so the controller
//! code reads as "look up, decide, write" without `dyn_ref` noise.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, NodeList};

use crate::constants::DISPLAY_PROPERTY;
use crate::error::ModalError;
use crate::visibility::Visibility;

/// Anything a controller can scan: the whole document or a detached
/// fixture element. An element root is part of its own scope, so
/// `query_all` and `find_by_id` see it just like a document sees its
/// `<html>` element.
pub trait DomRoot {
    /// Matching elements in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Element>, JsValue>;

    /// First element with this id in document order.
    fn find_by_id(&self, id: &str) -> Option<Element>;
}

impl DomRoot for Document {
    fn query_all(&self, selector: &str) -> Result<Vec<Element>, JsValue> {
        Ok(elements(&self.query_selector_all(selector)?))
    }

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.get_element_by_id(id)
    }
}

impl DomRoot for Element {
    fn query_all(&self, selector: &str) -> Result<Vec<Element>, JsValue> {
        let descendants = elements(&self.query_selector_all(selector)?);
        if self.matches(selector)? {
            let mut all = Vec::with_capacity(descendants.len() + 1);
            all.push(self.clone());
            all.extend(descendants);
            Ok(all)
        } else {
            Ok(descendants)
        }
    }

    fn find_by_id(&self, id: &str) -> Option<Element> {
        if self.id() == id {
            return Some(self.clone());
        }
        self.query_selector(&id_selector(id)).ok().flatten()
    }
}

/// Collect the element nodes of a `NodeList` in document order.
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `[name]` – matches every element carrying the attribute.
pub fn attribute_selector(name: &str) -> String {
    format!("[{}]", name)
}

/// `[id="…"]` with quotes and backslashes escaped, so ids that are not valid
/// CSS identifiers (`1st-modal`) still resolve.
pub fn id_selector(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[id=\"{}\"]", escaped)
}

/// Downcast to `HtmlElement`, the only element kind with an inline style we
/// can toggle.
pub fn as_html(el: &Element) -> Result<&HtmlElement, ModalError> {
    el.dyn_ref::<HtmlElement>()
        .ok_or_else(|| ModalError::NotStylable(el.id()))
}

/// Current state read from the inline `display` style.
pub fn visibility(el: &HtmlElement) -> Visibility {
    let display = el
        .style()
        .get_property_value(DISPLAY_PROPERTY)
        .unwrap_or_default();
    Visibility::from_display(&display)
}

pub fn set_visibility(el: &HtmlElement, state: Visibility) -> Result<(), JsValue> {
    el.style().set_property(DISPLAY_PROPERTY, state.as_display())
}

/// Flip `class_name` on `el`. Returns whether the class is now present.
pub fn toggle_class(el: &Element, class_name: &str) -> Result<bool, JsValue> {
    el.class_list().toggle(class_name)
}

/// Write a form field value. Inputs and textareas get their live `value`;
/// anything else gets the `value` attribute.
pub fn set_field_value(el: &Element, value: &str) -> Result<(), JsValue> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(textarea) = el.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value(value);
    } else {
        el.set_attribute("value", value)?;
    }
    Ok(())
}

/// Read a form field value written by [`set_field_value`].
pub fn field_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(textarea) = el.dyn_ref::<HtmlTextAreaElement>() {
        Some(textarea.value())
    } else {
        el.get_attribute("value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_for_attributes_and_ids() {
        assert_eq!(attribute_selector("data-modal-name"), "[data-modal-name]");
        assert_eq!(id_selector("listModalComment"), "[id=\"listModalComment\"]");
    }

    #[test]
    fn id_selector_escapes_quotes_and_backslashes() {
        assert_eq!(id_selector("a\"b"), "[id=\"a\\\"b\"]");
        assert_eq!(id_selector("a\\b"), "[id=\"a\\\\b\"]");
    }
}
