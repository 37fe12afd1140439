use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
    thread,
};

use log::{info, warn};

use super::{
    registry::{Handler, HandlerRegistry},
    session,
    transport::TransportError,
};

/// Listening endpoint that routes command tokens to registered handlers.
pub struct Endpoint {
    address: SocketAddr,
    registry: Arc<HandlerRegistry>,
}

impl Endpoint {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            registry: Arc::new(HandlerRegistry::new()),
        }
    }

    /// Install or replace the handler for a command name. Safe to call while
    /// the endpoint is serving.
    pub fn register<H>(&self, name: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.registry.register(name, handler);
    }

    /// Bind and accept connections forever, one session thread per
    /// connection. Bind failure is returned to the caller; a failed accept
    /// is logged and the loop keeps accepting.
    pub fn listen(self) -> Result<(), TransportError> {
        let listener = TcpListener::bind(self.address)?;
        info!("listening at {}", listener.local_addr()?);
        self.accept_loop(listener)
    }

    fn accept_loop(self, listener: TcpListener) -> Result<(), TransportError> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let registry = Arc::clone(&self.registry);
                    thread::spawn(move || session::run(stream, &registry));
                }
                Err(e) => warn!("failed to accept connection: {e}"),
            }
        }
        Ok(())
    }
}
