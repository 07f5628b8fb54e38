//! Quartz DNS Infrastructure Layer
pub mod dns;
