//! Weather refresh
//!
//! One click: the button goes busy, the refresh endpoint is called, the page reloads shortly
//! after a success, failures raise a notification, and in every case the button comes back
//! after a fixed delay.

use std::rc::Rc;

use crate::api::BlogApi;
use crate::config::TimingConfig;
use crate::error::ApiError;
use crate::locale::Locale;
use crate::notification::{Notification, Notifier};
use crate::schedule::{Scheduler, Timers};

/// The refresh button and the page it lives on
pub trait RefreshControl {
    /// Disable the button and show the spinner
    fn set_busy(&self);

    /// Re-enable the button with its normal icon
    fn restore(&self);

    fn reload_page(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The server refreshed its weather data; a reload is scheduled
    Refreshed,
    /// The server answered `success: false`
    Rejected(Option<String>),
    /// No usable answer
    Failed(ApiError),
}

pub struct WeatherRefresher<A, S: Scheduler> {
    api: Rc<A>,
    timers: Rc<Timers<S>>,
    notifier: Rc<dyn Notifier>,
    timing: TimingConfig,
    locale: Locale,
}

impl<A: BlogApi, S: Scheduler> WeatherRefresher<A, S> {
    pub fn new(
        api: Rc<A>,
        timers: Rc<Timers<S>>,
        notifier: Rc<dyn Notifier>,
        timing: TimingConfig,
        locale: Locale,
    ) -> Self {
        Self {
            api,
            timers,
            notifier,
            timing,
            locale,
        }
    }

    pub async fn refresh<C: RefreshControl + 'static>(
        &self,
        control: Rc<C>,
        csrf_token: Option<String>,
    ) -> RefreshOutcome {
        control.set_busy();

        let outcome = match self.api.refresh_weather(csrf_token.as_deref()).await {
            Ok(response) if response.success => RefreshOutcome::Refreshed,
            Ok(response) => RefreshOutcome::Rejected(response.message),
            Err(e) => RefreshOutcome::Failed(e),
        };

        let messages = self.locale.messages();
        match &outcome {
            RefreshOutcome::Refreshed => {
                tracing::info!("Weather refreshed, reloading page");
                let control = Rc::clone(&control);
                self.timers
                    .after(self.timing.weather_reload(), move || control.reload_page());
            }
            RefreshOutcome::Rejected(detail) => {
                tracing::warn!(detail = ?detail, "Weather refresh rejected");
                self.notifier
                    .notify(Notification::danger(messages.refresh_failed));
            }
            RefreshOutcome::Failed(e) => {
                tracing::error!(error = %e, "Weather refresh failed");
                self.notifier
                    .notify(Notification::danger(messages.network_error));
            }
        }

        self.timers
            .after(self.timing.weather_restore(), move || control.restore());

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RefreshResponse;
    use crate::notification::Severity;
    use crate::polling::testing::FakeApi;
    use crate::schedule::manual::ManualScheduler;
    use std::cell::RefCell;
    use std::time::Duration;

    struct RecordingControl {
        clock: ManualScheduler,
        events: RefCell<Vec<(u128, &'static str)>>,
    }

    impl RecordingControl {
        fn record(&self, event: &'static str) {
            self.events
                .borrow_mut()
                .push((self.clock.now().as_millis(), event));
        }
    }

    impl RefreshControl for RecordingControl {
        fn set_busy(&self) {
            self.record("busy");
        }

        fn restore(&self) {
            self.record("restore");
        }

        fn reload_page(&self) {
            self.record("reload");
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: RefCell<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.shown.borrow_mut().push(notification);
        }
    }

    struct Harness {
        api: Rc<FakeApi>,
        timers: Rc<Timers<ManualScheduler>>,
        notifier: Rc<RecordingNotifier>,
        control: Rc<RecordingControl>,
        outcome: Rc<RefCell<Option<RefreshOutcome>>>,
    }

    impl Harness {
        fn new() -> Self {
            let clock = ManualScheduler::new();
            Self {
                api: Rc::new(FakeApi::default()),
                timers: Rc::new(Timers::new(clock.clone())),
                notifier: Rc::new(RecordingNotifier::default()),
                control: Rc::new(RecordingControl {
                    clock,
                    events: RefCell::new(Vec::new()),
                }),
                outcome: Rc::new(RefCell::new(None)),
            }
        }

        fn click(&self, locale: Locale) {
            let refresher = WeatherRefresher::new(
                Rc::clone(&self.api),
                Rc::clone(&self.timers),
                Rc::clone(&self.notifier) as Rc<dyn Notifier>,
                TimingConfig::default(),
                locale,
            );
            let control = Rc::clone(&self.control);
            let outcome = Rc::clone(&self.outcome);
            self.timers.spawn(async move {
                let result = refresher.refresh(control, Some("tok".to_string())).await;
                *outcome.borrow_mut() = Some(result);
            });
        }

        fn events(&self) -> Vec<(u128, &'static str)> {
            self.control.events.borrow().clone()
        }
    }

    #[test]
    fn test_success_reloads_and_restores() {
        let h = Harness::new();
        h.api.reply_refresh(Ok(RefreshResponse { success: true, message: None }));

        h.click(Locale::En);
        h.timers.scheduler().advance(Duration::from_secs(3));

        assert_eq!(*h.outcome.borrow(), Some(RefreshOutcome::Refreshed));
        assert_eq!(h.events(), vec![(0, "busy"), (1000, "reload"), (2000, "restore")]);
        assert!(h.notifier.shown.borrow().is_empty());
        assert_eq!(*h.api.tokens.borrow(), vec![Some("tok".to_string())]);
    }

    #[test]
    fn test_rejection_notifies_and_restores() {
        let h = Harness::new();
        h.api.reply_refresh(Ok(RefreshResponse {
            success: false,
            message: Some("quota".to_string()),
        }));

        h.click(Locale::En);
        h.timers.scheduler().advance(Duration::from_secs(3));

        assert_eq!(
            *h.outcome.borrow(),
            Some(RefreshOutcome::Rejected(Some("quota".to_string())))
        );
        assert_eq!(h.events(), vec![(0, "busy"), (2000, "restore")]);
        let shown = h.notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].severity, Severity::Danger);
        assert_eq!(shown[0].message, "Refresh failed, please try again later");
    }

    #[test]
    fn test_network_error_notifies_and_restores() {
        let h = Harness::new();
        h.api
            .reply_refresh(Err(ApiError::Network("connection reset".to_string())));

        h.click(Locale::ZhCn);
        h.timers.scheduler().advance(Duration::from_secs(3));

        assert!(matches!(*h.outcome.borrow(), Some(RefreshOutcome::Failed(_))));
        assert_eq!(h.events(), vec![(0, "busy"), (2000, "restore")]);
        assert_eq!(h.notifier.shown.borrow()[0].message, "网络错误，请稍后重试");
    }

    #[test]
    fn test_restore_not_before_delay() {
        let h = Harness::new();
        h.api.reply_refresh(Ok(RefreshResponse { success: false, message: None }));

        h.click(Locale::En);
        h.timers.scheduler().advance(Duration::from_millis(1999));
        assert_eq!(h.events(), vec![(0, "busy")]);

        h.timers.scheduler().advance(Duration::from_millis(1));
        assert_eq!(h.events(), vec![(0, "busy"), (2000, "restore")]);
    }
}
