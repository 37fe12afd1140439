use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use super::transport::{TransportError, Wire};

/// A unit of behavior bound to a command name.
///
/// The handler gets exclusive access to the connection's stream for the
/// duration of the call and is responsible for consuming exactly its
/// sub-protocol's payload. Plain functions and closures with the matching
/// signature implement this automatically.
pub trait Handler: Send + Sync {
    fn handle(&self, wire: &mut dyn Wire) -> Result<(), TransportError>;
}

impl<F> Handler for F
where
    F: Fn(&mut dyn Wire) -> Result<(), TransportError> + Send + Sync,
{
    fn handle(&self, wire: &mut dyn Wire) -> Result<(), TransportError> {
        self(wire)
    }
}

/// Concurrency-safe mapping from command name to handler.
///
/// Read far more often than written; lookups take the shared lock and clone
/// the handler out, so no lock is held while a handler runs.
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn Handler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Install or replace the handler for `name`. Last registration wins.
    pub fn register<H>(&self, name: &str, handler: H)
    where
        H: Handler + 'static,
    {
        let mut handlers = self.handlers.write().unwrap();
        handlers.insert(name.to_string(), Arc::new(handler));
    }

    /// Handler currently bound to `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Handler>> {
        let handlers = self.handlers.read().unwrap();
        handlers.get(name).cloned()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
