//! Session state and engagement heuristics — pages viewed this session,
//! cross-session returning-visitor detection, and the high-intent detector.
//!
//! # Modules
//!
//! - [`store`] — Injectable key/value storage namespaces
//! - [`session`] — The session state store
//! - [`intent`] — High-intent visitor detection

pub mod intent;
pub mod session;
pub mod store;

pub use intent::HighIntentDetector;
pub use session::{SessionData, SessionStore};
pub use store::{KeyValueStorage, MemoryStorage};
