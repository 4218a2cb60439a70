//! Id → element registry built from a one-off scan of a root.
//!
//! The registry is a static snapshot: elements added or removed after the
//! scan are not reflected.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::debug_log;
use crate::dom_utils::{attribute_selector, DomRoot};
use crate::error::ModalError;

/// A non-empty element id without ASCII whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId(String);

impl ElementId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ModalError> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(|c| c.is_ascii_whitespace()) {
            return Err(ModalError::InvalidId(raw));
        }
        Ok(ElementId(raw))
    }

    /// For compile-time constants that are known to be valid.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(ElementId::parse(raw).is_ok(), "{:?} is not a valid id", raw);
        ElementId(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ElementId {
    type Error = ModalError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        ElementId::parse(raw)
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ElementRegistry {
    elements: HashMap<ElementId, Element>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every element in `root` that carries an `id`. A duplicated
    /// id resolves to its first element in document order, the same element
    /// `getElementById` returns.
    pub fn scan<R: DomRoot + ?Sized>(root: &R) -> Result<Self, JsValue> {
        let mut registry = Self::new();
        for element in root.query_all(&attribute_selector("id"))? {
            let raw = element.id();
            match ElementId::parse(raw) {
                Ok(id) => {
                    registry.elements.entry(id).or_insert(element);
                }
                Err(err) => debug_log!("Registry: skipping element, {}", err),
            }
        }
        debug_log!("Registry: {} element ids registered", registry.len());
        Ok(registry)
    }

    /// Insert or overwrite. Returns the element previously stored under `id`.
    pub fn insert(&mut self, id: ElementId, element: Element) -> Option<Element> {
        self.elements.insert(id, element)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Element, ModalError> {
        self.get(id)
            .ok_or_else(|| ModalError::UnknownElement(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// The subset of `ids` with no registered element, in input order.
    pub fn missing<'a, I>(&self, ids: I) -> Vec<&'a ElementId>
    where
        I: IntoIterator<Item = &'a ElementId>,
    {
        ids.into_iter().filter(|id| !self.contains(id.as_str())).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.keys()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
