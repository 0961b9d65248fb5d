//! Resource operations as plain async functions of (validated input, store).
//!
//! Each function runs the three stages in order: validate the request body,
//! talk to the store, sanitize what goes back to the client. The HTTP layer
//! only extracts inputs and shapes responses.

pub mod folders;
pub mod notes;
