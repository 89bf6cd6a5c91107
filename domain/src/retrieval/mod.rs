//! Retrieval domain module
//!
//! The contract for RAG document sources: [`RetrievalSource`] implementations
//! answer questions with relevance-ordered [`RetrievedDocument`] sequences.

pub mod entities;
pub mod source;

pub use entities::{RetrievedDocument, bound_by_relevance};
pub use source::{DEFAULT_NUM_RESULTS, RetrievalError, RetrievalSource};
