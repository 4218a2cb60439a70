//! Error type for modal wiring.
//!
//! Every variant is recoverable: listeners log it and return, setup code
//! converts it into a `JsValue` with `?` like any other DOM failure.

use std::fmt;

use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// A configured id is empty or contains whitespace.
    InvalidId(String),
    /// A configured attribute name is not a `data-*` attribute.
    InvalidAttribute(String),
    /// The clicked element carries no trigger attribute.
    MissingTriggerAttribute,
    /// No element with this id was registered.
    UnknownElement(String),
    /// The element exists but has no inline style (not an `HTMLElement`).
    NotStylable(String),
    /// Embedded or JS-supplied configuration could not be parsed.
    Config(String),
    /// A DOM write on the element with this id threw.
    Dom { id: String, detail: String },
}

impl ModalError {
    /// Wrap a `JsValue` thrown by a DOM call on element `id`.
    pub fn dom(id: impl Into<String>, err: JsValue) -> Self {
        let detail = err
            .as_string()
            .or_else(|| {
                err.dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", err));
        ModalError::Dom {
            id: id.into(),
            detail,
        }
    }
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalError::InvalidId(id) => write!(f, "invalid element id {:?}", id),
            ModalError::InvalidAttribute(name) => {
                write!(f, "invalid data attribute name {:?}", name)
            }
            ModalError::MissingTriggerAttribute => {
                write!(f, "clicked element has no modal trigger attribute")
            }
            ModalError::UnknownElement(id) => write!(f, "no element registered with id {:?}", id),
            ModalError::NotStylable(id) => write!(f, "element {:?} is not an HTMLElement", id),
            ModalError::Config(msg) => write!(f, "modal config: {}", msg),
            ModalError::Dom { id, detail } => {
                write!(f, "DOM update of {:?} failed: {}", id, detail)
            }
        }
    }
}

impl std::error::Error for ModalError {}

impl From<ModalError> for JsValue {
    fn from(err: ModalError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
