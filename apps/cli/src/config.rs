use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tplink_cloud::{ClientIdentity, CloudConfig, Credentials, DEFAULT_CLOUD_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(name = "tplink-cloud")]
#[command(version)]
#[command(about = "Query devices registered to a TP-Link cloud account", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub account: AccountArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List devices registered to the account
    Devices {
        /// Print the raw descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show info for one device, looked up by alias, name or device ID
    Info {
        /// Alias, device name or device ID
        device: String,
    },
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Cloud account username
    ///
    /// Can also be set via TPLINK_CLOUD_USERNAME environment variable
    #[arg(short, long, env = "TPLINK_CLOUD_USERNAME")]
    pub username: String,

    /// Cloud account password
    ///
    /// Can also be set via TPLINK_CLOUD_PASSWORD environment variable
    #[arg(short, long, env = "TPLINK_CLOUD_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Account server URL
    #[arg(long, env = "TPLINK_CLOUD_URL", default_value = DEFAULT_CLOUD_URL)]
    pub cloud_url: String,

    /// Install identifier; a new one is generated per run when unset
    #[arg(long, env = "TPLINK_TERM_ID")]
    pub term_id: Option<String>,

    /// Request timeout in seconds (valid range: 1-300)
    #[arg(long, env = "TPLINK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: u64,
}

impl AccountArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn identity(&self) -> ClientIdentity {
        match &self.term_id {
            Some(term_id) => ClientIdentity::new().with_term_id(term_id),
            None => ClientIdentity::new(),
        }
    }

    pub fn cloud_config(&self) -> CloudConfig {
        CloudConfig::new(&self.cloud_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
