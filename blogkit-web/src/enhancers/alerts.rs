//! Alert auto-dismiss

use web_sys::Element;

use crate::bootstrap;
use crate::dom;
use crate::state::PageSession;

/// Close every dismissible alert present now, after the configured delay
pub fn auto_dismiss(session: &PageSession) {
    let delay = session.config.timing.alert_dismiss();
    for alert in dom::query_all(".alert-dismissible") {
        session.timers.after(delay, move || close(&alert));
    }
}

pub fn close(alert: &Element) {
    if !alert.is_connected() {
        return;
    }

    let closed = bootstrap::construct("Alert", alert)
        .and_then(|instance| bootstrap::call(&instance, "close"));
    if let Err(e) = closed {
        tracing::debug!(error = ?e, "Bootstrap Alert unavailable, removing element");
        alert.remove();
    }
}
