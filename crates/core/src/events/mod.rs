//! Domain events emitted by the engine.

mod domain_event;
mod sink;

pub use domain_event::DomainEvent;
pub use sink::{DomainEventSink, MockDomainEventSink, NoOpDomainEventSink};
