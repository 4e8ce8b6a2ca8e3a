use std::fmt::Debug;
use tracing::{
  field::{Field, Visit},
  Event,
  Subscriber
};
use tracing_subscriber::{
  Layer,
  layer::Context,
  registry::LookupSpan
};

use super::get_global_logging_threshold;

/// A layer that only lets events through whose `threshold` field is at most the global logging threshold. Events
/// without a `threshold` field (e.g. from other crates logging through the same subscriber) are always let through.
pub(crate) struct ThresholdFilterLayer;

impl<S> Layer<S> for ThresholdFilterLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
  fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
    let mut visitor = ThresholdVisitor { threshold: None };
    event.record(&mut visitor);

    match visitor.threshold {
      Some(threshold) => threshold <= get_global_logging_threshold(),
      None            => true,
    }
  }
}

/// Extracts the `threshold` field from an event. Out of range values saturate to `u8::MAX`, i.e. the most verbose
/// setting, so a bad threshold can only hide a message, never promote it.
struct ThresholdVisitor {
  threshold: Option<u8>,
}

impl Visit for ThresholdVisitor {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() == "threshold" {
      self.threshold = Some(u8::try_from(value).unwrap_or(u8::MAX));
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() == "threshold" {
      self.threshold = Some(u8::try_from(value).unwrap_or(u8::MAX));
    }
  }

  fn record_debug(&mut self, field: &Field, _value: &dyn Debug) {
    if field.name() == "threshold" {
      self.threshold = Some(u8::MAX);
    }
  }
}
