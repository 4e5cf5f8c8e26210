pub mod pipeline;

pub use pipeline::{PageError, ServiceDocuments, ServiceEngine};
