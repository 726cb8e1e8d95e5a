use anyhow::{anyhow, Context, Result};
use tplink_cloud::{Authenticator, DeviceDescriptor, Session};

use crate::config::AccountArgs;

pub async fn login(account: &AccountArgs) -> Result<Session> {
    let auth = Authenticator::with_config(
        account.credentials(),
        account.identity(),
        account.cloud_config(),
    )
    .context("Failed to initialize cloud client")?;

    tracing::info!("Logging in to {}", auth.endpoint());
    let session = auth
        .login()
        .await
        .with_context(|| format!("Login failed for {}", account.username))?;
    tracing::info!("Logged in with install id {}", session.identity().term_id);
    Ok(session)
}

pub async fn devices(session: &Session, json: bool) -> Result<()> {
    let devices = session
        .list_devices()
        .await
        .context("Failed to list devices")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    for device in &devices {
        println!("{}", device_row(device));
    }
    Ok(())
}

pub async fn info(session: &Session, needle: &str) -> Result<()> {
    let devices = session
        .list_devices()
        .await
        .context("Failed to list devices")?;
    let device = find_device(&devices, needle)?;

    tracing::info!(
        "Fetching info for {} from {}",
        device.device_id,
        device.endpoint()
    );
    let info = session
        .get_device_info(device)
        .await
        .with_context(|| format!("Failed to get info for {}", device.display_name()))?;

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn find_device<'a>(devices: &'a [DeviceDescriptor], needle: &str) -> Result<&'a DeviceDescriptor> {
    devices
        .iter()
        .find(|device| device.matches(needle))
        .ok_or_else(|| anyhow!("No device matching {:?} ({} listed)", needle, devices.len()))
}

fn device_row(device: &DeviceDescriptor) -> String {
    let status = match device.status {
        Some(1) => "online",
        Some(_) => "offline",
        None => "unknown",
    };
    format!(
        "{}\t{}\t{}\t{}\t{}",
        device.device_id,
        device.display_name(),
        device.device_model.as_deref().unwrap_or("-"),
        status,
        device.endpoint()
    )
}
