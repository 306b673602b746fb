//! # hrgate (HR access-control gate)
//!
//! `hrgate` decides which screens of the HR front-end a session may reach and
//! where it is sent otherwise.
//!
//! ## Session
//!
//! A single [`access::Identity`] is active at a time. It is persisted through
//! the [`session::SessionStore`] so a restart restores it without a new login.
//! Partial or unreadable persisted state is treated as "no session".
//!
//! ## Roles
//!
//! Three roles exist: `Admin`, `Manager` and `Employee`. The role is derived
//! from the login identifier through an injectable [`access::RoleDirectory`];
//! unknown identifiers are employees. Every role has one home dashboard,
//! returned by [`access::role_home`].
//!
//! ## Guard
//!
//! [`access::decide`] is a pure, total function over the identity and the
//! route requirement. Insufficient privilege is never an error: it is a
//! redirect to the caller's own home. Employee-only screens also bounce
//! admins and managers back to their dashboards.

pub mod access;
pub mod api;
pub mod cli;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
