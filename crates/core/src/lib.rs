//! Domain logic for the Masark personality-career matching platform.
//!
//! Pure types and computations shared by the DB and API layers: assessment
//! dimensions, personality scoring, the session state machine, and the
//! validation helpers backing them. Nothing here touches the network or the
//! database.

pub mod deployment;
pub mod dimension;
pub mod error;
pub mod language;
pub mod roles;
pub mod scoring;
pub mod session_state;
pub mod types;
