//! Secondary SQLite stores: the message [`index`](index) and the
//! [`trace`](trace) span store.

pub mod index;
pub mod trace;

pub use index::{Index, IndexError, IndexMetrics, IndexedMessage, MessageStatus};
pub use trace::{DeliveryMetrics, SpanStatus, SpanUpdate, TraceSpan, TraceStore, TraceStoreError};
