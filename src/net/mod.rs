pub mod fetch;

pub use fetch::{open_site, DirSource, DocumentSource, FetchError, HttpSource};
