//! TP-Link Cloud - session client for the TP-Link (Kasa) device cloud.
//!
//! This crate logs in to the account server, keeps the resulting token with
//! the identity it was issued for, and uses both to list the account's devices
//! and query each one on the application server it is homed on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tplink_cloud::{Authenticator, Credentials};
//!
//! let auth = Authenticator::new(Credentials::new("user@example.com", "password"))?;
//! let session = auth.login().await?;
//!
//! for device in session.list_devices().await? {
//!     let info = session.get_device_info(&device).await?;
//!     println!("{}: {:?}", device.display_name(), info);
//! }
//! ```

mod auth;
mod client;
mod config;
mod envelope;
mod error;
mod identity;
mod session;
mod types;

pub use auth::Authenticator;
pub use client::RpcClient;
pub use config::{CloudConfig, DEFAULT_CLOUD_URL, DEFAULT_TIMEOUT_SECS};
pub use envelope::{Envelope, RpcRequest};
pub use error::{CloudError, Result};
pub use identity::*;
pub use session::Session;
pub use types::{Credentials, DeviceDescriptor, DeviceInfo};
