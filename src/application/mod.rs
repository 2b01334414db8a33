//! Application layer - Use cases and the ports they depend on
//!
//! - Ports: traits implemented by infrastructure adapters
//! - Services: wizard, reference search, chat assistant, portrait, settings
//! - DTOs: view models returned to the HTTP layer

pub mod dto;
pub mod ports;
pub mod services;
