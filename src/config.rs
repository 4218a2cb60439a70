//! Markup configuration for the modal controllers.
//!
//! The defaults match the blog templates. A page can override any subset by
//! embedding
//!
//! ```html
//! <script type="application/json" id="modal-config">{"tagPopupClass": "open"}</script>
//! ```
//!
//! or by passing an object to `mount_modals()` from JavaScript. The layers
//! stack key by key: a JS object overrides the embedded JSON, which
//! overrides the defaults. Nested objects (`commentModal`) merge the same way.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::*;
use crate::error::ModalError;
use crate::registry::ElementId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalConfig {
    /// Mount automatically once the document has been parsed.
    pub auto_mount: bool,
    pub trigger_attribute: String,
    pub post_id_attribute: String,
    pub comment_list_modal: ElementId,
    pub post_id_field: ElementId,
    pub tag_popup_button: ElementId,
    pub tag_popup: ElementId,
    pub tag_popup_class: String,
    pub comment_modal: CommentModalIds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentModalIds {
    pub modal: ElementId,
    pub open_button: ElementId,
    pub close_button: ElementId,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            auto_mount: true,
            trigger_attribute: DEFAULT_TRIGGER_ATTRIBUTE.to_string(),
            post_id_attribute: DEFAULT_POST_ID_ATTRIBUTE.to_string(),
            comment_list_modal: ElementId::from_static(DEFAULT_COMMENT_LIST_MODAL),
            post_id_field: ElementId::from_static(DEFAULT_POST_ID_FIELD),
            tag_popup_button: ElementId::from_static(DEFAULT_TAG_POPUP_BUTTON),
            tag_popup: ElementId::from_static(DEFAULT_TAG_POPUP),
            tag_popup_class: DEFAULT_TAG_POPUP_CLASS.to_string(),
            comment_modal: CommentModalIds::default(),
        }
    }
}

impl Default for CommentModalIds {
    fn default() -> Self {
        Self {
            modal: ElementId::from_static(DEFAULT_COMMENT_MODAL),
            open_button: ElementId::from_static(DEFAULT_COMMENT_OPEN_BUTTON),
            close_button: ElementId::from_static(DEFAULT_COMMENT_CLOSE_BUTTON),
        }
    }
}

impl ModalConfig {
    /// Parse a (possibly partial) JSON config. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ModalError> {
        Self::from_layers(Some(json), None)
    }

    /// Stack an optional JSON overlay on top of optional embedded JSON text,
    /// then fill whatever is still missing from the defaults.
    pub fn from_layers(embedded: Option<&str>, overlay: Option<Value>) -> Result<Self, ModalError> {
        let mut merged = match embedded {
            Some(text) => object_layer(
                serde_json::from_str(text).map_err(|e| ModalError::Config(e.to_string()))?,
            )?,
            None => Value::Object(Default::default()),
        };
        if let Some(overlay) = overlay {
            merge_json(&mut merged, object_layer(overlay)?);
        }
        let config: ModalConfig =
            serde_json::from_value(merged).map_err(|e| ModalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the embedded `#modal-config` JSON, falling back to defaults when
    /// the element is absent or empty.
    pub fn from_document(document: &Document) -> Result<Self, ModalError> {
        Self::from_layers(embedded_json(document).as_deref(), None)
    }

    /// The embedded page config with a JS object laid over it. `undefined`
    /// and `null` mean no overrides.
    pub fn from_document_and_js(document: &Document, overrides: JsValue) -> Result<Self, ModalError> {
        Self::from_layers(embedded_json(document).as_deref(), js_overlay(overrides)?)
    }

    /// Ids checked once the registry is built, reported when absent.
    pub fn well_known_ids(&self) -> [&ElementId; 4] {
        [
            &self.tag_popup_button,
            &self.tag_popup,
            &self.post_id_field,
            &self.comment_list_modal,
        ]
    }

    /// Ids are validated on construction; attribute and class names here.
    pub fn validate(&self) -> Result<(), ModalError> {
        validate_data_attribute(&self.trigger_attribute)?;
        validate_data_attribute(&self.post_id_attribute)?;
        if self.tag_popup_class.is_empty()
            || self.tag_popup_class.chars().any(|c| c.is_ascii_whitespace())
        {
            return Err(ModalError::Config(format!(
                "invalid class name {:?}",
                self.tag_popup_class
            )));
        }
        Ok(())
    }
}

/// Text of the `#modal-config` element, if it has any.
fn embedded_json(document: &Document) -> Option<String> {
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
}

fn js_overlay(value: JsValue) -> Result<Option<Value>, ModalError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| ModalError::Config(e.to_string()))
}

fn object_layer(layer: Value) -> Result<Value, ModalError> {
    if layer.is_object() {
        Ok(layer)
    } else {
        Err(ModalError::Config(format!("expected a JSON object, got {}", layer)))
    }
}

/// Recursive key-wise merge. Objects merge, anything else is replaced.
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// `data-` followed by a non-empty run of `[a-z0-9_-]`, so the name can be
/// dropped into an `[attr]` selector as-is.
fn validate_data_attribute(name: &str) -> Result<(), ModalError> {
    let valid = name
        .strip_prefix("data-")
        .map(|rest| {
            !rest.is_empty()
                && rest
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_'))
        })
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ModalError::InvalidAttribute(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_blog_markup() {
        let config = ModalConfig::default();
        assert!(config.auto_mount);
        assert_eq!(config.trigger_attribute, "data-modal-name");
        assert_eq!(config.post_id_attribute, "data-post-id");
        assert_eq!(config.comment_list_modal.as_str(), "listModalComment");
        assert_eq!(config.post_id_field.as_str(), "postId");
        assert_eq!(config.tag_popup_button.as_str(), "popupTagBtn");
        assert_eq!(config.tag_popup.as_str(), "popupTag");
        assert_eq!(config.tag_popup_class, "show");
        assert_eq!(config.comment_modal.modal.as_str(), "modal-comment");
        assert_eq!(config.comment_modal.open_button.as_str(), "modal-comment-btn");
        assert_eq!(config.comment_modal.close_button.as_str(), "close-comment");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ModalConfig::from_json(
            r#"{"autoMount": false, "tagPopupClass": "open", "commentModal": {"modal": "c"}}"#,
        )
        .unwrap();
        assert!(!config.auto_mount);
        assert_eq!(config.tag_popup_class, "open");
        assert_eq!(config.comment_modal.modal.as_str(), "c");
        assert_eq!(config.comment_modal.open_button.as_str(), "modal-comment-btn");
        assert_eq!(config.trigger_attribute, "data-modal-name");
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(ModalConfig::from_json("{}").unwrap(), ModalConfig::default());
    }

    #[test]
    fn invalid_ids_fail_at_parse_time() {
        let err = ModalConfig::from_json(r#"{"postIdField": "post id"}"#).unwrap_err();
        assert!(matches!(err, ModalError::Config(_)));
    }

    #[test]
    fn attribute_names_must_be_data_attributes() {
        for bad in [
            "modal-name",
            "data-",
            "data-a b",
            "data-x]",
            "data-modal.name",
            "data-a:b",
            "data-a,b",
            "data-a(b",
            "data-Modal",
        ] {
            let json = format!(r#"{{"triggerAttribute": {:?}}}"#, bad);
            assert!(
                matches!(ModalConfig::from_json(&json), Err(ModalError::InvalidAttribute(_))),
                "{} should be rejected",
                bad
            );
        }
        for good in ["data-dialog", "data-modal_name", "data-2nd-modal"] {
            let json = format!(r#"{{"triggerAttribute": {:?}}}"#, good);
            assert!(ModalConfig::from_json(&json).is_ok(), "{} should be accepted", good);
        }
    }

    #[test]
    fn overlay_wins_key_by_key() {
        let embedded = r#"{"tagPopupClass": "open", "tagPopup": "tags", "commentModal": {"modal": "c", "openButton": "o"}}"#;
        let overlay = serde_json::json!({"tagPopup": "chips", "commentModal": {"modal": "d"}});
        let config = ModalConfig::from_layers(Some(embedded), Some(overlay)).unwrap();
        assert_eq!(config.tag_popup.as_str(), "chips");
        assert_eq!(config.tag_popup_class, "open");
        assert_eq!(config.comment_modal.modal.as_str(), "d");
        assert_eq!(config.comment_modal.open_button.as_str(), "o");
        assert_eq!(config.comment_modal.close_button.as_str(), "close-comment");
        assert_eq!(config.post_id_field.as_str(), "postId");
    }

    #[test]
    fn overlay_alone_sits_on_the_defaults() {
        let config =
            ModalConfig::from_layers(None, Some(serde_json::json!({"autoMount": false}))).unwrap();
        assert_eq!(
            config,
            ModalConfig {
                auto_mount: false,
                ..ModalConfig::default()
            }
        );
        assert_eq!(ModalConfig::from_layers(None, None).unwrap(), ModalConfig::default());
    }

    #[test]
    fn layers_must_be_objects() {
        assert!(matches!(
            ModalConfig::from_layers(Some("[]"), None),
            Err(ModalError::Config(_))
        ));
        assert!(matches!(
            ModalConfig::from_layers(None, Some(serde_json::json!("popupTag"))),
            Err(ModalError::Config(_))
        ));
    }

    #[test]
    fn merged_config_is_still_validated() {
        let overlay = serde_json::json!({"triggerAttribute": "data-a.b"});
        assert!(matches!(
            ModalConfig::from_layers(Some("{}"), Some(overlay)),
            Err(ModalError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(ModalConfig::from_json("{"), Err(ModalError::Config(_))));
    }

    #[test]
    fn well_known_ids_cover_the_controller_lookups() {
        let config = ModalConfig::default();
        let ids: Vec<&str> = config.well_known_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["popupTagBtn", "popupTag", "postId", "listModalComment"]);
    }
}
