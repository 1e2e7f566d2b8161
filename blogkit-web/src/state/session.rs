//! Page Session
//!
//! Everything the page wires up (event listeners, timers, the lazy image observer,
//! Leptos window listeners, tooltip instances) is owned here so that a single
//! [`PageSession::teardown`] releases it.

use blogkit::{Config, Locale, Messages, Timers};
use js_sys::Array;
use leptos::WindowListenerHandle;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, IntersectionObserver};

use crate::api::GlooBlogApi;
use crate::bootstrap;
use crate::components::toast::BannerNotifier;
use crate::timers::GlooScheduler;

pub type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Resources held for the lifetime of one page view
pub struct PageSession {
    pub config: Config,
    pub timers: Rc<Timers<GlooScheduler>>,
    pub api: Rc<GlooBlogApi>,
    pub notifier: Rc<BannerNotifier>,
    listeners: RefCell<Vec<Listener>>,
    observers: RefCell<Vec<(IntersectionObserver, ObserverCallback)>>,
    window_handles: RefCell<Vec<WindowListenerHandle>>,
    tooltips: RefCell<Vec<JsValue>>,
    closed: Cell<bool>,
}

impl PageSession {
    pub fn new(config: Config) -> Rc<Self> {
        let timers = Rc::new(Timers::new(GlooScheduler));
        let notifier = Rc::new(BannerNotifier::new(
            Rc::clone(&timers),
            config.timing.notification(),
        ));
        let api = Rc::new(GlooBlogApi::new(config.endpoints.clone()));

        Rc::new(Self {
            config,
            timers,
            api,
            notifier,
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            window_handles: RefCell::new(Vec::new()),
            tooltips: RefCell::new(Vec::new()),
            closed: Cell::new(false),
        })
    }

    pub fn locale(&self) -> Locale {
        self.config.ui.locale
    }

    pub fn messages(&self) -> &'static Messages {
        self.locale().messages()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// `addEventListener`, removed again on teardown
    pub fn listen(
        &self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) {
        if self.is_closed() {
            return;
        }

        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(e) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event, error = ?e, "Failed to add event listener");
            return;
        }

        self.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            event,
            callback,
        });
    }

    pub fn keep_observer(&self, observer: IntersectionObserver, callback: ObserverCallback) {
        if self.is_closed() {
            observer.disconnect();
            return;
        }
        self.observers.borrow_mut().push((observer, callback));
    }

    pub fn keep_window_listener(&self, handle: WindowListenerHandle) {
        if self.is_closed() {
            handle.remove();
            return;
        }
        self.window_handles.borrow_mut().push(handle);
    }

    pub fn keep_tooltip(&self, instance: JsValue) {
        self.tooltips.borrow_mut().push(instance);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Cancel timers, detach listeners, disconnect observers. Idempotent.
    ///
    /// Must not run from inside one of the session's own listeners: dropping a
    /// closure while it executes is undefined on the JS side.
    pub fn teardown(&self) {
        if self.closed.replace(true) {
            return;
        }

        let timers = self.timers.teardown();

        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        let listener_count = listeners.len();
        for listener in listeners {
            if let Err(e) = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                tracing::debug!(event = listener.event, error = ?e, "Failed to remove listener");
            }
        }

        for handle in self.window_handles.borrow_mut().drain(..) {
            handle.remove();
        }

        for (observer, _callback) in self.observers.borrow_mut().drain(..) {
            observer.disconnect();
        }

        for tooltip in self.tooltips.borrow_mut().drain(..) {
            if let Err(e) = bootstrap::call(&tooltip, "dispose") {
                tracing::debug!(error = ?e, "Tooltip dispose failed");
            }
        }

        tracing::debug!(timers, listeners = listener_count, "Page session torn down");
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Rc<PageSession>>> = const { RefCell::new(None) };
}

/// Make `session` the page's active session, tearing down any previous one
pub fn install(session: Rc<PageSession>) {
    if let Some(previous) = CURRENT.with(|current| current.borrow_mut().replace(session)) {
        previous.teardown();
    }
}

pub fn current() -> Option<Rc<PageSession>> {
    CURRENT.with(|current| current.borrow().clone())
}

/// Remove and tear down the active session
pub fn uninstall() {
    if let Some(session) = CURRENT.with(|current| current.borrow_mut().take()) {
        session.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wasm_bindgen_test::*;

    fn detached() -> EventTarget {
        crate::dom::document()
            .unwrap()
            .create_element("div")
            .unwrap()
            .into()
    }

    fn ping(target: &EventTarget) {
        let event = Event::new("ping").unwrap();
        target.dispatch_event(&event).unwrap();
    }

    fn counting_listener(session: &PageSession, target: &EventTarget) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        session.listen(target, "ping", move |_| counter.set(counter.get() + 1));
        hits
    }

    #[wasm_bindgen_test]
    fn test_teardown_detaches_listeners() {
        let session = PageSession::new(Config::default());
        let target = detached();

        let hits = counting_listener(&session, &target);
        ping(&target);
        assert_eq!(hits.get(), 1);

        session.teardown();
        ping(&target);
        assert_eq!(hits.get(), 1);
        assert_eq!(session.listener_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_teardown_closes_timers() {
        let session = PageSession::new(Config::default());
        session.timers.after(Duration::from_secs(60), || {});
        session.timers.every(Duration::from_secs(60), || {});
        assert_eq!(session.timers.len(), 2);

        session.teardown();
        assert!(session.timers.is_closed());
        assert!(session.timers.is_empty());

        session.timers.after(Duration::from_secs(1), || {});
        assert!(session.timers.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_teardown_is_idempotent() {
        let session = PageSession::new(Config::default());
        session.teardown();
        session.teardown();
        assert!(session.is_closed());
    }

    #[wasm_bindgen_test]
    fn test_listen_after_teardown_is_ignored() {
        let session = PageSession::new(Config::default());
        session.teardown();

        let target = detached();
        let hits = counting_listener(&session, &target);
        ping(&target);
        assert_eq!(hits.get(), 0);
        assert_eq!(session.listener_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_install_replaces_previous_session() {
        let first = PageSession::new(Config::default());
        install(Rc::clone(&first));
        let second = PageSession::new(Config::default());
        install(Rc::clone(&second));

        assert!(first.is_closed());
        assert!(!second.is_closed());
        assert!(Rc::ptr_eq(&current().unwrap(), &second));

        uninstall();
        assert!(second.is_closed());
        assert!(current().is_none());
    }
}
