//! `federator init`: client credential bootstrap.
//!
//! Stores the OAuth client id/secret and prints the consent URL for the Directory API
//! scopes. Exchanging the resulting authorization code for an access token happens outside
//! this tool; the token is handed back in through `--access-token`.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const REDIRECT_URI: &str = "http://localhost";

/// Both scopes are needed: the schema must exist before users can carry values for it.
pub const DIRECTORY_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/admin.directory.user",
    "https://www.googleapis.com/auth/admin.directory.userschema",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Where `init` keeps its files
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub client_file: PathBuf,
}

impl ConfigPaths {
    /// Use `config_dir` if given (flag or `FEDERATOR_CONFIG_DIR`), else the platform config dir.
    pub fn resolve(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine configuration directory"))?
                .join("federator"),
        };

        Ok(Self {
            client_file: config_dir.join("client.json"),
            config_dir,
        })
    }
}

pub fn store_client_credentials(paths: &ConfigPaths, credentials: &ClientCredentials) -> Result<()> {
    std::fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "Cannot create configuration directory {}",
            paths.config_dir.display()
        )
    })?;

    let json = serde_json::to_string_pretty(credentials)?;
    std::fs::write(&paths.client_file, json)
        .with_context(|| format!("Cannot write {}", paths.client_file.display()))?;

    restrict_to_owner(&paths.client_file)
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Cannot set mode of {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

/// Stored client credentials, or `None` if `init` has not been run
pub fn load_client_credentials(paths: &ConfigPaths) -> Result<Option<ClientCredentials>> {
    if !paths.client_file.exists() {
        return Ok(None);
    }

    let json = std::fs::read_to_string(&paths.client_file)
        .with_context(|| format!("Cannot read {}", paths.client_file.display()))?;
    let credentials = serde_json::from_str(&json)
        .with_context(|| format!("{} is not valid JSON", paths.client_file.display()))?;
    Ok(Some(credentials))
}

/// OAuth consent URL an administrator visits to authorize the Directory API scopes
pub fn consent_url(client_id: &str) -> Result<Url> {
    let scope = DIRECTORY_SCOPES.join(" ");
    Url::parse_with_params(
        AUTH_ENDPOINT,
        &[
            ("client_id", client_id),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("scope", scope.as_str()),
        ],
    )
    .context("Cannot build consent URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: "1234.apps.googleusercontent.com".into(),
            client_secret: "shh".into(),
        }
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::resolve(Some(dir.path().join("nested"))).unwrap();

        assert!(load_client_credentials(&paths).unwrap().is_none());
        store_client_credentials(&paths, &credentials()).unwrap();
        assert_eq!(load_client_credentials(&paths).unwrap(), Some(credentials()));
    }

    #[cfg(unix)]
    #[test]
    fn test_client_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::resolve(Some(dir.path().to_path_buf())).unwrap();
        store_client_credentials(&paths, &credentials()).unwrap();

        let mode = std::fs::metadata(&paths.client_file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_consent_url_carries_both_scopes() {
        let url = consent_url("1234.apps.googleusercontent.com").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("client_id".into(), "1234.apps.googleusercontent.com".into())));
        let scope = &pairs.iter().find(|(k, _)| k == "scope").unwrap().1;
        for expected in DIRECTORY_SCOPES {
            assert!(scope.contains(expected));
        }
    }
}
