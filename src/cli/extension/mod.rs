//! Commands that change an extension, in TER or on disk

pub mod delete;
pub mod publish;
pub mod register;
pub mod set_version;
pub mod transfer;
pub mod update;
