use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("talk2me.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("talk2me.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("talk2me.client.request_duration_seconds");

pub(crate) static SESSION_SUBMISSIONS: Counter = Counter::new("talk2me.session.submissions");
pub(crate) static SESSION_REJECTED: Counter = Counter::new("talk2me.session.rejected");
pub(crate) static SESSION_REPLIES: Counter = Counter::new("talk2me.session.replies");
pub(crate) static SESSION_APOLOGIES: Counter = Counter::new("talk2me.session.apologies");
pub(crate) static SESSION_CRISIS_ALERTS: Counter = Counter::new("talk2me.session.crisis_alerts");
pub(crate) static SESSION_CANCELLED: Counter = Counter::new("talk2me.session.cancelled");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SUBMISSIONS);
    collector.register_counter(&SESSION_REJECTED);
    collector.register_counter(&SESSION_REPLIES);
    collector.register_counter(&SESSION_APOLOGIES);
    collector.register_counter(&SESSION_CRISIS_ALERTS);
    collector.register_counter(&SESSION_CANCELLED);
}
