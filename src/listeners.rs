//! Owner of attached event listener closures.
//!
//! Closures are kept alive here instead of being `forget()`-ed so a mount can
//! be torn down again: `clear()` (or dropping the set) detaches every
//! listener from its target.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget};

use crate::constants::CLICK_EVENT;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click<F>(&mut self, target: &EventTarget, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        self.on(target, CLICK_EVENT, handler)
    }

    pub fn on<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Detach every listener and drop its closure.
    pub fn clear(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn button() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        document.create_element("button").unwrap().dyn_into().unwrap()
    }

    #[wasm_bindgen_test]
    fn clicks_reach_the_handler_until_cleared() {
        let btn = button();
        let hits = Rc::new(Cell::new(0));
        let mut set = ListenerSet::new();
        {
            let hits = hits.clone();
            set.on_click(&btn, move |_| hits.set(hits.get() + 1)).unwrap();
        }
        assert_eq!(set.len(), 1);

        btn.click();
        btn.click();
        assert_eq!(hits.get(), 2);

        set.clear();
        assert!(set.is_empty());
        btn.click();
        assert_eq!(hits.get(), 2);
    }

    #[wasm_bindgen_test]
    fn dropping_the_set_detaches_listeners() {
        let btn = button();
        let hits = Rc::new(Cell::new(0));
        {
            let mut set = ListenerSet::new();
            let hits = hits.clone();
            set.on_click(&btn, move |_| hits.set(hits.get() + 1)).unwrap();
        }
        btn.click();
        assert_eq!(hits.get(), 0);
    }
}
