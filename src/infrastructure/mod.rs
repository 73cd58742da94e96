pub mod file_sink;

pub use file_sink::{BinarySink, DiskSink};
