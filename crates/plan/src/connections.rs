//! Connection set
//!
//! Binds a [`Connection`] to each [`ConnectionRole`]. A role may be left
//! unbound; any entry that needs it is rejected when the engine is
//! configured.

use crate::ConnectionRole;
use porter_core::Connection;
use std::fmt;

/// Connections keyed by role
#[derive(Default)]
pub struct ConnectionSet {
    source: Option<Box<dyn Connection>>,
    destination: Option<Box<dyn Connection>>,
}

impl ConnectionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind both roles at once
    pub fn pair(
        source: impl Connection + 'static,
        destination: impl Connection + 'static,
    ) -> Self {
        Self::new()
            .with(ConnectionRole::Source, source)
            .with(ConnectionRole::Destination, destination)
    }

    /// Bind a connection to a role, replacing any previous binding
    pub fn with(mut self, role: ConnectionRole, connection: impl Connection + 'static) -> Self {
        self.bind(role, Box::new(connection));
        self
    }

    /// Bind an already boxed connection to a role
    pub fn bind(&mut self, role: ConnectionRole, connection: Box<dyn Connection>) {
        match role {
            ConnectionRole::Source => self.source = Some(connection),
            ConnectionRole::Destination => self.destination = Some(connection),
        }
    }

    /// Resolve the connection bound to a role
    pub fn get(&self, role: ConnectionRole) -> Option<&dyn Connection> {
        match role {
            ConnectionRole::Source => self.source.as_deref(),
            ConnectionRole::Destination => self.destination.as_deref(),
        }
    }

    /// Check if a role is bound
    pub fn contains(&self, role: ConnectionRole) -> bool {
        self.get(role).is_some()
    }

    /// Principal of the connection bound to a role
    pub fn principal(&self, role: ConnectionRole) -> Option<&str> {
        self.get(role).map(|c| c.principal())
    }
}

impl fmt::Debug for ConnectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSet")
            .field("source", &self.principal(ConnectionRole::Source))
            .field("destination", &self.principal(ConnectionRole::Destination))
            .finish()
    }
}
