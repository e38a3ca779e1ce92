//! User Directory Module
//!
//! Read-side lookups against the mirrored user directory. The session
//! gateway owns user records; this module only resolves IDs into
//! `UserSummary` values for embedding in room and message payloads.

pub mod db;
