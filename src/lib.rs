use std::cell::{Ref, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

pub mod macros;
pub mod comment_modal;
pub mod config;
pub mod constants; // Markup contract: attribute names, ids, CSS values
pub mod controller;
pub mod dom_utils;
pub mod error;
pub mod listeners;
pub mod registry;
pub mod visibility;

pub use comment_modal::CommentModal;
pub use config::{CommentModalIds, ModalConfig};
pub use controller::ModalController;
pub use error::ModalError;
pub use registry::{ElementId, ElementRegistry};
pub use visibility::Visibility;

type SharedMount = Rc<RefCell<Option<Mount>>>;

thread_local! {
    // The mount that owns the page's listeners: the automatic one or the
    // latest `mount_modals()` call.
    static PAGE_MOUNT: RefCell<Option<SharedMount>> = RefCell::new(None);
}

/// Listeners attached by one mount. Dropping it detaches all of them.
struct Mount {
    controller: ModalController,
    comment: Option<CommentModal>,
}

/// Everything one mount attached to a page. Disposing it removes all of its
/// listeners. A page mount stays wired after JS drops its handle; use
/// `dispose()` or `unmount_page_modals()` to detach it.
#[wasm_bindgen]
pub struct ModalHandle {
    mount: SharedMount,
}

impl ModalHandle {
    /// Wire both modal flavours found under `root`. The mount is owned by
    /// the handle alone and detaches when the handle is dropped.
    pub fn mount<R: dom_utils::DomRoot + ?Sized>(root: &R, config: ModalConfig) -> Result<Self, JsValue> {
        let comment = CommentModal::attach(root, &config.comment_modal)?;
        let controller = ModalController::initialize(root, config)?;
        Ok(Self {
            mount: Rc::new(RefCell::new(Some(Mount { controller, comment }))),
        })
    }

    pub fn controller(&self) -> Option<Ref<'_, ModalController>> {
        Ref::filter_map(self.mount.borrow(), |m| m.as_ref().map(|m| &m.controller)).ok()
    }

    pub fn comment_modal(&self) -> Option<Ref<'_, CommentModal>> {
        Ref::filter_map(self.mount.borrow(), |m| m.as_ref().and_then(|m| m.comment.as_ref())).ok()
    }
}

#[wasm_bindgen]
impl ModalHandle {
    /// Remove every listener this mount attached.
    pub fn dispose(&mut self) {
        self.mount.borrow_mut().take();
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.mount.borrow().is_some()
    }

    /// Ids captured by the registry scan, sorted.
    #[wasm_bindgen(js_name = registeredIds)]
    pub fn registered_ids(&self) -> js_sys::Array {
        let mut ids: Vec<String> = self
            .mount
            .borrow()
            .iter()
            .flat_map(|m| m.controller.registry().ids().map(|id| id.to_string()))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(JsValue::from).collect()
    }
}

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                auto_mount(&document);
            }
        });
        document.add_event_listener_with_callback(
            constants::DOM_CONTENT_LOADED,
            on_ready.unchecked_ref(),
        )?;
    } else {
        auto_mount(&document);
    }
    Ok(())
}

fn auto_mount(document: &Document) {
    let config = match ModalConfig::from_document(document) {
        Ok(config) => config,
        Err(e) => {
            crate::warn_log!("Ignoring page modal config: {}", e);
            ModalConfig::default()
        }
    };
    if !config.auto_mount {
        crate::debug_log!("Modal auto-mount disabled by page config");
        return;
    }
    if let Err(e) = mount_page(document, config) {
        crate::warn_log!("Modal auto-mount failed: {:?}", e);
    }
}

/// Replace the page mount: the previous one is detached before any new
/// listener is attached, so a trigger never carries two toggles.
fn mount_page(document: &Document, config: ModalConfig) -> Result<ModalHandle, JsValue> {
    unmount_page_modals();
    let handle = ModalHandle::mount(document, config)?;
    PAGE_MOUNT.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&handle.mount)));
    Ok(handle)
}

/// Mount on the current document. `config` is laid over the embedded page
/// config key by key; `undefined` uses the page config as is. Whatever page
/// mount exists (automatic or from an earlier call) is disposed first. An
/// invalid config is rejected before anything is touched.
#[wasm_bindgen]
pub fn mount_modals(config: JsValue) -> Result<ModalHandle, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let config = ModalConfig::from_document_and_js(&document, config)?;
    mount_page(&document, config)
}

/// Dispose the page mount, if any. Returns whether a live one existed.
#[wasm_bindgen]
pub fn unmount_page_modals() -> bool {
    let Some(mount) = PAGE_MOUNT.with(|slot| slot.borrow_mut().take()) else {
        return false;
    };
    let live = mount.borrow_mut().take();
    live.is_some()
}
