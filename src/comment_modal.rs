//! Fixed-id comment modal: one open button, one close button.
//!
//! Unlike the registry-driven triggers this never inspects the current
//! style, so open always opens and close always closes.

use wasm_bindgen::JsValue;
use web_sys::{Event, HtmlElement};

use crate::config::CommentModalIds;
use crate::debug_log;
use crate::dom_utils::{self, DomRoot};
use crate::listeners::ListenerSet;
use crate::visibility::Visibility;
use crate::warn_log;

pub struct CommentModal {
    modal: HtmlElement,
    listeners: ListenerSet,
}

impl CommentModal {
    /// Look up the three elements and bind the buttons. `Ok(None)` when the
    /// page has no comment modal; a missing button is simply not bound.
    pub fn attach<R: DomRoot + ?Sized>(root: &R, ids: &CommentModalIds) -> Result<Option<Self>, JsValue> {
        let modal = match root.find_by_id(ids.modal.as_str()) {
            Some(el) => match dom_utils::as_html(&el) {
                Ok(html) => html.clone(),
                Err(e) => {
                    warn_log!("Comment modal not wired: {}", e);
                    return Ok(None);
                }
            },
            None => {
                debug_log!("CommentModal: '{}' absent, nothing to wire", ids.modal);
                return Ok(None);
            }
        };

        let mut listeners = ListenerSet::new();
        let bindings = [
            (&ids.open_button, Visibility::Visible),
            (&ids.close_button, Visibility::Hidden),
        ];
        for (button_id, state) in bindings {
            let Some(button) = root.find_by_id(button_id.as_str()) else {
                debug_log!("CommentModal: button '{}' absent", button_id);
                continue;
            };
            let target = modal.clone();
            listeners.on_click(&button, move |_event: Event| {
                if let Err(e) = dom_utils::set_visibility(&target, state) {
                    warn_log!("Comment modal update failed: {:?}", e);
                }
            })?;
        }

        Ok(Some(Self { modal, listeners }))
    }

    pub fn open(&self) -> Result<(), JsValue> {
        dom_utils::set_visibility(&self.modal, Visibility::Visible)
    }

    pub fn close(&self) -> Result<(), JsValue> {
        dom_utils::set_visibility(&self.modal, Visibility::Hidden)
    }

    pub fn visibility(&self) -> Visibility {
        dom_utils::visibility(&self.modal)
    }

    /// Number of bound buttons (0 to 2).
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::Element;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture(html: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        root
    }

    #[wasm_bindgen_test]
    fn missing_modal_attaches_nothing() {
        let root = fixture(r#"<button id="modal-comment-btn"></button>"#);
        let attached = CommentModal::attach(&root, &CommentModalIds::default()).unwrap();
        assert!(attached.is_none());
    }

    #[wasm_bindgen_test]
    fn missing_close_button_binds_only_open() {
        let root = fixture(r#"<div id="modal-comment"></div><button id="modal-comment-btn"></button>"#);
        let modal = CommentModal::attach(&root, &CommentModalIds::default())
            .unwrap()
            .unwrap();
        assert_eq!(modal.listener_count(), 1);

        let open: HtmlElement = root.find_by_id("modal-comment-btn").unwrap().dyn_into().unwrap();
        open.click();
        assert_eq!(modal.visibility(), Visibility::Visible);
    }

    #[wasm_bindgen_test]
    fn direct_open_and_close() {
        let root = fixture(r#"<div id="modal-comment" style="display:none"></div>"#);
        let modal = CommentModal::attach(&root, &CommentModalIds::default())
            .unwrap()
            .unwrap();
        modal.open().unwrap();
        modal.open().unwrap();
        assert_eq!(modal.visibility(), Visibility::Visible);
        modal.close().unwrap();
        assert_eq!(modal.visibility(), Visibility::Hidden);
    }
}
