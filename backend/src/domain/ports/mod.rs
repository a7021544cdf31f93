//! Domain ports and supporting types for the hexagonal boundary.

mod notification_sink;
mod registry_command;
mod registry_query;

#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{FixtureNotificationSink, NotificationSink};
pub use registry_command::RegistryCommand;
pub use registry_query::RegistryQuery;
