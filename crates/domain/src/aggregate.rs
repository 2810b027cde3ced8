//! Core aggregate and domain event traits.

use common::{AggregateId, Version};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregate roots.
///
/// An aggregate is a cluster of domain objects that can be treated as a single unit.
/// The aggregate root is the only way in: every change goes through its methods,
/// and it refuses any change that would break one of its invariants.
///
/// Aggregates:
/// - Mutate synchronously, in memory, without I/O
/// - Leave their state untouched when a change is rejected
/// - Record what happened as events, which the caller drains after the change
pub trait AggregateRoot: Send + Sync + Sized {
    /// The type of events this aggregate records.
    type Event: DomainEvent;

    /// The type of errors this aggregate can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    fn id(&self) -> AggregateId;

    /// Returns the current version of the aggregate.
    ///
    /// Starts at 0 and increments with each accepted change.
    fn version(&self) -> Version;

    /// Removes and returns the events recorded since the last call.
    fn take_events(&mut self) -> Vec<Self::Event>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    enum CounterEvent {
        Incremented { by: u32 },
    }

    impl DomainEvent for CounterEvent {
        fn event_type(&self) -> &'static str {
            match self {
                CounterEvent::Incremented { .. } => "CounterIncremented",
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("counter overflow")]
    struct CounterError;

    struct Counter {
        id: AggregateId,
        value: u32,
        version: Version,
        events: Vec<CounterEvent>,
    }

    impl Counter {
        fn increment(&mut self, by: u32) -> Result<(), CounterError> {
            self.value = self.value.checked_add(by).ok_or(CounterError)?;
            self.version = self.version.next();
            self.events.push(CounterEvent::Incremented { by });
            Ok(())
        }
    }

    impl AggregateRoot for Counter {
        type Event = CounterEvent;
        type Error = CounterError;

        fn aggregate_type() -> &'static str {
            "Counter"
        }

        fn id(&self) -> AggregateId {
            self.id
        }

        fn version(&self) -> Version {
            self.version
        }

        fn take_events(&mut self) -> Vec<Self::Event> {
            std::mem::take(&mut self.events)
        }
    }

    #[test]
    fn test_take_events_drains_buffer() {
        let mut counter = Counter {
            id: AggregateId::new(),
            value: 0,
            version: Version::initial(),
            events: Vec::new(),
        };

        counter.increment(2).unwrap();
        counter.increment(3).unwrap();
        assert_eq!(counter.value, 5);
        assert_eq!(counter.version(), Version::new(2));

        let events = counter.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "CounterIncremented");
        assert!(counter.take_events().is_empty());
    }

    #[test]
    fn test_rejected_change_records_nothing() {
        let mut counter = Counter {
            id: AggregateId::new(),
            value: u32::MAX,
            version: Version::initial(),
            events: Vec::new(),
        };

        assert!(counter.increment(1).is_err());
        assert_eq!(counter.version(), Version::initial());
        assert!(counter.take_events().is_empty());
    }
}
