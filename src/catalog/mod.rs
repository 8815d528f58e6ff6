//! Static content module.
//!
//! The services catalog and quick tips shown on their respective pages.
//! Fixed datasets compiled into the binary; nothing here hits the
//! network.

pub mod services;
pub mod tips;

// Re-exports for convenience
pub use services::{Service, ServiceCatalog, ServiceTier};
pub use tips::{QuickTip, TipCategory, TipList};
