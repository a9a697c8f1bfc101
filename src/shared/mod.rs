//! Shared publish slots between the background workers and the render loop
//!
//! The frame and detection slots are single-writer, multi-reader, and
//! latest-wins: a publish replaces the previous value wholesale and readers
//! always observe a complete value.

pub mod slot;

pub use slot::Slot;
