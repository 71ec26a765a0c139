//! In-memory storage backend
//!
//! One [`MemoryStore`] implements all three repository traits over shared
//! state. Every operation takes the write (or read) guard once, so each
//! ledger call is atomic just like its single-statement SQL counterpart.

mod store;

pub use store::MemoryStore;
