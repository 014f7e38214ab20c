//! Purpose: Internal JSON parsing boundary shared by runtime callsites.
//! Exports: `parse` module with decode helpers used by the CLI.
//! Role: Single seam for decoding so callsites avoid ad hoc error classification.
//! Invariants: CLI input documents and JSON arguments are decoded through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod parse;
