// ============================================================================
// Aggregate Root Pattern - Reducer Core
// ============================================================================
//
// Key Principles:
// 1. Commands are validated before emitting events
// 2. Events represent facts that have already happened
// 3. Aggregates enforce business invariants
// 4. All state changes flow through events
// 5. A command that emits no events is a no-op
//
// ============================================================================

/// Generic Aggregate trait - all reducer-driven state owners implement this
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized {
    type Event;
    type Command;
    type Error;

    /// Apply an event to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Handle command and emit events (business logic)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle a command and fold the resulting events into `self`.
    ///
    /// Events are applied to a working copy, so a failure part way through
    /// leaves the aggregate untouched.
    fn reduce(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>
    where
        Self: Clone,
    {
        let events = self.handle_command(command)?;
        if events.is_empty() {
            return Ok(events);
        }

        let mut next = self.clone();
        for event in &events {
            next.apply_event(event)?;
        }

        *self = next;
        Ok(events)
    }
}
