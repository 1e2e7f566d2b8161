//! Weather refresh buttons

use blogkit::{read_cookie, Notifier, RefreshControl, WeatherRefresher};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlButtonElement;

use crate::dom;
use crate::state::PageSession;

pub const BUTTON_SELECTOR: &str = ".refresh-weather";

const BUSY_ICON: &str = "<i class=\"fas fa-spinner fa-spin\"></i>";
const IDLE_ICON: &str = "<i class=\"fas fa-redo\"></i>";

pub struct RefreshButton(pub HtmlButtonElement);

impl RefreshControl for RefreshButton {
    fn set_busy(&self) {
        self.0.set_disabled(true);
        self.0.set_inner_html(BUSY_ICON);
    }

    fn restore(&self) {
        if !self.0.is_connected() {
            return;
        }
        self.0.set_inner_html(IDLE_ICON);
        self.0.set_disabled(false);
    }

    fn reload_page(&self) {
        let reloaded = dom::window().map(|w| w.location().reload());
        if let Some(Err(e)) = reloaded {
            tracing::error!(error = ?e, "Page reload failed");
        }
    }
}

pub fn bind(session: &PageSession) {
    let buttons: Vec<HtmlButtonElement> = dom::query_all(BUTTON_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into().ok())
        .collect();
    if buttons.is_empty() {
        return;
    }

    let notifier: Rc<dyn Notifier> = session.notifier.clone();
    let refresher = Rc::new(WeatherRefresher::new(
        Rc::clone(&session.api),
        Rc::clone(&session.timers),
        notifier,
        session.config.timing.clone(),
        session.locale(),
    ));

    for button in buttons {
        let control = Rc::new(RefreshButton(button.clone()));
        let refresher = Rc::clone(&refresher);
        let timers = Rc::clone(&session.timers);
        let csrf_cookie = session.config.endpoints.csrf_cookie.clone();

        session.listen(&button, "click", move |_| {
            let token = read_cookie(&dom::cookie_string(), &csrf_cookie);
            let refresher = Rc::clone(&refresher);
            let control = Rc::clone(&control);
            timers.spawn(async move {
                refresher.refresh(control, token).await;
            });
        });
    }
}
