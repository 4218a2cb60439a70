//! Registry-driven modal controller.
//!
//! Scans a root once, then wires:
//! * every `[data-modal-name]` trigger to toggle the element whose id it names,
//! * the tag popup button to toggle the popup's `show` class.
//!
//! Triggers aimed at the comment list modal also stash their
//! `data-post-id` in the hidden `postId` field before toggling.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event};

use crate::config::ModalConfig;
use crate::debug_log;
use crate::dom_utils::{self, attribute_selector, DomRoot};
use crate::error::ModalError;
use crate::listeners::ListenerSet;
use crate::registry::ElementRegistry;
use crate::visibility::Visibility;
use crate::warn_log;

pub struct ModalController {
    registry: Rc<ElementRegistry>,
    config: Rc<ModalConfig>,
    listeners: ListenerSet,
}

impl ModalController {
    /// Build the registry from `root` and attach all listeners. The returned
    /// controller owns the listeners; dropping it detaches them.
    pub fn initialize<R: DomRoot + ?Sized>(root: &R, config: ModalConfig) -> Result<Self, JsValue> {
        let registry = Self::connect_dom_elements(root, &config)?;
        let mut controller = Self {
            registry: Rc::new(registry),
            config: Rc::new(config),
            listeners: ListenerSet::new(),
        };
        controller.setup_listeners(root)?;
        Ok(controller)
    }

    fn connect_dom_elements<R: DomRoot + ?Sized>(
        root: &R,
        config: &ModalConfig,
    ) -> Result<ElementRegistry, JsValue> {
        let registry = ElementRegistry::scan(root)?;
        for id in registry.missing(config.well_known_ids()) {
            debug_log!("ModalController: no element with id '{}' on this page", id);
        }
        Ok(registry)
    }

    fn setup_listeners<R: DomRoot + ?Sized>(&mut self, root: &R) -> Result<(), JsValue> {
        let triggers = root.query_all(&attribute_selector(&self.config.trigger_attribute))?;
        for trigger in &triggers {
            let registry = Rc::clone(&self.registry);
            let config = Rc::clone(&self.config);
            self.listeners.on_click(trigger, move |event: Event| {
                if let Err(e) = modal_in_out(&registry, &config, &event) {
                    warn_log!("Modal toggle skipped: {}", e);
                }
            })?;
        }
        debug_log!("ModalController: {} modal triggers wired", triggers.len());

        // Tag popup: a missing button just means this page has no tag list.
        match self.registry.get(self.config.tag_popup_button.as_str()) {
            Some(button) => {
                let registry = Rc::clone(&self.registry);
                let config = Rc::clone(&self.config);
                self.listeners.on_click(button, move |_event: Event| {
                    if let Err(e) = toggle_tag_popup(&registry, &config) {
                        warn_log!("Tag popup toggle skipped: {}", e);
                    }
                })?;
            }
            None => debug_log!(
                "ModalController: '{}' absent, tag popup not wired",
                self.config.tag_popup_button
            ),
        }
        Ok(())
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Number of attached listeners (triggers plus the tag popup button).
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detach every listener. Later clicks do nothing.
    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}

/// Click handler for modal triggers. Returns the modal's new visibility.
pub fn modal_in_out(
    registry: &ElementRegistry,
    config: &ModalConfig,
    event: &Event,
) -> Result<Visibility, ModalError> {
    let trigger = trigger_of(event, &config.trigger_attribute)
        .ok_or(ModalError::MissingTriggerAttribute)?;
    toggle_for_trigger(registry, config, &trigger)
}

/// The toggle itself, for callers that already hold the trigger element.
pub fn toggle_for_trigger(
    registry: &ElementRegistry,
    config: &ModalConfig,
    trigger: &Element,
) -> Result<Visibility, ModalError> {
    let modal_name = trigger
        .get_attribute(&config.trigger_attribute)
        .ok_or(ModalError::MissingTriggerAttribute)?;
    let modal = registry.require(&modal_name)?;
    let modal_html = dom_utils::as_html(modal)?;

    if modal.id() == config.comment_list_modal.as_str() {
        stash_post_id(registry, config, trigger)?;
    }

    let next = dom_utils::visibility(modal_html).toggled();
    dom_utils::set_visibility(modal_html, next)
        .map_err(|e| ModalError::dom(modal_name.as_str(), e))?;
    debug_log!("Modal '{}' is now {}", modal_name, next);
    Ok(next)
}

/// Copy the trigger's post id into the hidden comment form field.
fn stash_post_id(
    registry: &ElementRegistry,
    config: &ModalConfig,
    trigger: &Element,
) -> Result<(), ModalError> {
    let field = registry.require(config.post_id_field.as_str())?;
    let post_id = trigger
        .get_attribute(&config.post_id_attribute)
        .unwrap_or_default();
    dom_utils::set_field_value(field, &post_id)
        .map_err(|e| ModalError::dom(config.post_id_field.as_str(), e))
}

/// Flip the popup class. Returns whether the class is now present.
pub fn toggle_tag_popup(registry: &ElementRegistry, config: &ModalConfig) -> Result<bool, ModalError> {
    let popup = registry.require(config.tag_popup.as_str())?;
    dom_utils::toggle_class(popup, &config.tag_popup_class)
        .map_err(|e| ModalError::dom(config.tag_popup.as_str(), e))
}

/// The trigger a click belongs to: the nearest ancestor-or-self of the
/// target carrying the trigger attribute, else the element the listener is
/// attached to.
fn trigger_of(event: &Event, attribute: &str) -> Option<Element> {
    let from_target = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(&attribute_selector(attribute)).ok().flatten());
    from_target.or_else(|| {
        event
            .current_target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .filter(|el| el.has_attribute(attribute))
    })
}
