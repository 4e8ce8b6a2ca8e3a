/*!

# Overview

Logging for the element library. Every message has a *level* (what kind of message it is) and a numeric *threshold*
(how chatty it is). A message is emitted only if its threshold is at most the global logging threshold, so raising
the global threshold makes the library more verbose.

```
use planfeat::log::*;

// Only messages logged at threshold 0 or 1 are emitted from here on.
set_global_logging_threshold(1);

info!(1, "generator iteration finished");   // Emitted
debug!(3, "inserted c_top at index 0");    // Not emitted
warning!("element limit reached");         // Emitted, threshold defaults to 0
```

## Thresholds Used by the Library

| threshold | what is logged                                                     |
|:----------|:-------------------------------------------------------------------|
| 0         | problems the caller must know about                                |
| 1         | generator progress: one line per iteration, limits reached         |
| 2         | generator summaries: instantiation counts per rule                 |
| 3         | registration of predicates, constants, objects and atoms           |
| 4         | every node inserted into an element factory                        |

The default global threshold is 1.

## Levels

Available levels are: Critical, Error, Warning, Info, Debug, Trace. Each has a macro of the same name (`warning!` for
Warning). The syntax is

```ignore
// With threshold
level!(threshold, "format string", args...);

// Without threshold (threshold 0, always emitted). The message must be a plain string literal here, since a
// leading argument followed by a comma is always read as a threshold.
level!("message");
```

The subscriber is installed lazily by the first macro invocation; callers never need to initialize anything. The
threshold is stored in an atomic, so it can be changed at any time from any thread.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::atomic::{AtomicU8, Ordering};

use once_cell::sync::Lazy;
use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::CustomFieldFormatter;
pub use macros::*;

// The macros expand to `$crate::log::tracing::event!`, so client crates need not depend on `tracing` themselves.
#[doc(hidden)]
pub use tracing;

/// Used for implicit initialization.
static INIT_LOGGER: Lazy<()> = Lazy::new(|| {
  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(CustomFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr),
      );

  // Another subscriber may already be installed by the host application, in which case we log through theirs.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// This does not need to be called directly. Initializes the logging system.
pub fn init_logger() {
  Lazy::force(&INIT_LOGGER);
}

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(1);

/// Sets the global threshold. Messages logged at a greater threshold are dropped.
pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

/// Retrieves the global threshold.
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_round_trips() {
    let previous = get_global_logging_threshold();

    set_global_logging_threshold(4);
    assert_eq!(get_global_logging_threshold(), 4);
    debug!(4, "inserted {} at index {}", "c_top", 0);
    trace!(5, "NOT logged: above threshold");

    set_global_logging_threshold(previous);
  }

  #[test]
  fn macros_accept_optional_threshold() {
    warning!("element limit reached");
    warning!(0, "element limit reached after {} elements", 10);
    info!(1, "iteration {} produced {} elements", 2, 7);
    error!(9, "NOT logged");
    critical!(9, "NOT logged");
  }
}
