mod format_registry;
mod sink_factory;

pub use format_registry::{FormatConstructor, FormatRegistry};
pub use sink_factory::{SinkFactory, SinkTarget};
