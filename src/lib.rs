//! Client for the ADT Pulse web portal (portal.adtpulse.com).
//!
//! The portal has no API: this crate logs in through the signin form, scrapes
//! the current alarm state out of the summary page's HTML, and arms/disarms
//! the system by replaying the portal's own form submissions. It targets one
//! known page layout and is expected to break loudly (a
//! [`PortalError::LayoutChanged`]) if ADT ships a different one.
//!
//! # Architecture
//!
//! - [`client`]: the [`PortalClient`] core — session lifecycle, transparent
//!   re-login, and the command-dispatch state machine
//! - [`command`]: the fixed arm/disarm command vocabulary
//! - [`config`]: portal credentials and endpoint configuration
//! - [`scrape`]: HTML extraction helpers over the portal's page layout
//! - [`session`]: the session token store
//! - [`error`]: error taxonomy
//!
//! # Example (conceptual)
//!
//! ```ignore
//! use adtpulse::{PortalClient, PortalConfig};
//!
//! let config = PortalConfig::new("user@example.com", "hunter2");
//! let client = PortalClient::initialize(config).await?;
//! client.login().await?;
//! client.refresh_state().await?;
//! println!("alarm state: {:?}", client.state().await);
//! client.arm_away().await?;
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod scrape;
pub mod session;

pub use client::{CommandOutcome, PortalClient};
pub use command::ArmCommand;
pub use config::PortalConfig;
pub use error::PortalError;
