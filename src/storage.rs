use anyhow::Context;
use emchat::ClientConfig;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::{io, io::Write};
use tracing::info;

const KEYRING_SERVICE: &str = "emchat";
const KEYRING_USER: &str = "Application Credentials";

/// The format of our JSON within our credential storage.
///
/// Everything lives in one entry so the org, app and credentials
/// can never drift apart.
#[derive(Deserialize, Serialize)]
pub struct CredentialStorage {
    pub org_name: String,
    pub app_name: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl CredentialStorage {
    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        serde_json::from_str(contents).context("stored credentials are not valid JSON")
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn into_config(self) -> ClientConfig {
        let config = ClientConfig::new(
            self.org_name,
            self.app_name,
            self.client_id,
            self.client_secret,
        );
        match self.api_url {
            Some(api_url) => config.with_api_url(api_url),
            None => config,
        }
    }
}

/// Retrieves application credentials from the user's keyring.
/// If none are stored yet, the user is asked for them once and they are saved.
pub fn load_config() -> anyhow::Result<ClientConfig> {
    let credentials_entry = Entry::new(KEYRING_SERVICE, KEYRING_USER)
        .context("unable to open keyring entry")?;

    // Do we have existing credentials in the user's keyring?
    if let Ok(contents) = credentials_entry.get_password() {
        return Ok(CredentialStorage::from_json(&contents)?.into_config());
    }

    let storage = CredentialStorage {
        org_name: interactive_prompt("organization name")?,
        app_name: interactive_prompt("application name")?,
        client_id: interactive_prompt("client id")?,
        client_secret: interactive_prompt("client secret")?,
        api_url: None,
    };
    credentials_entry
        .set_password(&storage.to_json()?)
        .context("unable to store credentials in keyring")?;
    info!("stored application credentials in keyring");

    Ok(storage.into_config())
}

/// Quick and dirty function to read a line from the user.
fn interactive_prompt(prompt_type: &str) -> anyhow::Result<String> {
    let mut response = String::new();
    print!("Please enter the {prompt_type} of your application: ");
    io::stdout().flush()?;
    io::stdin().read_line(&mut response)?;

    Ok(response.trim_end().to_string())
}
