//! Per-concern retrieval and reranking, unioned into the generation context.

pub mod assembler;
pub mod error;
pub mod set;


pub use assembler::ContextAssembler;
pub use error::AssemblyError;
pub use set::{ConcernContext, ContextSet};
