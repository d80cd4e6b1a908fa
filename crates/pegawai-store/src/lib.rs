//! In-memory state store for the session and employee-profile domains.
//!
//! Models login, logout, session restoration and profile fetch/update as
//! named async operations with pending/success/failure outcomes, and owns
//! the cross-domain rule that ending a session invalidates profile state.

pub mod op;
pub mod profile;
pub mod session;
pub mod store;

pub use op::Op;
pub use profile::{ProfileForm, ProfileState};
pub use session::{AuthStatus, SessionState};
pub use store::{AppStore, UpdateOutcome};
