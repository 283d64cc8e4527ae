// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue trait definitions shared by every backend.
//!
//! Backends implement the minimal [`Queue`] surface; the derived operations
//! live on the trait as default methods so every backend behaves the same.

pub mod queue;

pub use queue::Queue;
