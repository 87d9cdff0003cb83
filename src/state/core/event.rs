// ============================================================================
// Domain Event & Command Traits
// ============================================================================

/// Generic Domain Event trait
///
/// Every event reports a stable type name used in log fields.
pub trait DomainEvent {
    fn event_type(&self) -> &'static str;
}

/// Generic Command trait
///
/// The command name is used as a metrics label and in log fields.
pub trait Command {
    fn command_name(&self) -> &'static str;
}
