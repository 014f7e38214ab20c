//! Purpose: Functional collection toolkit shared by the `underline` CLI and library users.
//! Exports: `api` (stable surface), `json` (decode boundary).
//! Role: Traversal and reduction primitives plus every combinator derived from them.
//! Invariants: Every operation is eager and synchronous; results are freshly built.
//! Invariants: Callback errors propagate unchanged; nothing here retries or swallows them.
pub mod api;
pub(crate) mod core;
pub mod json;
