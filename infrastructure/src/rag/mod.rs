//! Retrieval source implementations
//!
//! Concrete [`RetrievalSource`](conduit_domain::retrieval::RetrievalSource)
//! variants: the no-op source and the Vectorize pipeline client.

pub mod noop;
pub mod vectorize;

pub use noop::NoopRetrievalSource;
pub use vectorize::{VectorizeConfig, VectorizeSource};
