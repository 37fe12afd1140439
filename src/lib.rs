pub mod protocol;
pub mod record;

pub use protocol::{Endpoint, HandlerRegistry};
pub use record::Record;
