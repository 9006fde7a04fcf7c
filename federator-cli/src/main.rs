//! Federator command-line entry point

mod init;
mod output;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use federator_core::{
    DirectoryConfig, FederatorService, HttpDirectoryClient, RemovalCriteria,
    DEFAULT_API_BASE_URL,
};
use init::{ClientCredentials, ConfigPaths};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "federator",
    version,
    about = "Manage Google Workspace configurations for AWS Single Sign-On"
)]
struct Cli {
    #[command(flatten)]
    directory: DirectoryArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory for stored client credentials
    #[arg(long, env = "FEDERATOR_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct DirectoryArgs {
    /// OAuth2 access token for the Directory API
    #[arg(long, env = "FEDERATOR_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// Base URL of the Directory API
    #[arg(long, env = "FEDERATOR_API_BASE_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
    api_base_url: String,

    /// Timeout for each Directory API request, in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initial setup of Federator
    Init {
        #[arg(short = 'I', long = "clientid")]
        client_id: String,
        #[arg(short = 'S', long = "clientsecret")]
        client_secret: String,
    },
    /// Operations on the custom SSO schema
    Schema {
        #[arg(short = 'C', long = "customerid")]
        customer_id: String,
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// User role management
    User {
        #[arg(short = 'U', long = "userkey")]
        user_key: String,
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand, Debug)]
enum SchemaAction {
    /// Check that the custom schema exists
    Verify,
    /// Create the custom schema
    Create,
    /// Delete the custom schema
    Delete,
    /// Print the custom schema
    Show,
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// Add a role to a user
    Add {
        /// The ARN of the AWS Role
        #[arg(short = 'R', long = "rolearn")]
        role_arn: String,
        /// The ARN of the AWS Identity Provider
        #[arg(short = 'P', long = "providerarn")]
        provider_arn: String,
    },
    /// Remove a role from a user. Specify either the custom type name, or both the role/provider ARNs
    Remove {
        /// The custom type name of the role to remove
        #[arg(short = 'T', long = "customtype")]
        custom_type: Option<String>,
        /// The ARN of the AWS Role to remove
        #[arg(short = 'R', long = "rolearn")]
        role_arn: Option<String>,
        /// The ARN of the AWS Identity Provider associated with the role to remove
        #[arg(short = 'P', long = "providerarn")]
        provider_arn: Option<String>,
    },
    /// Show the current shape of a user
    Show {
        /// Only list the SSO role mappings
        #[arg(long)]
        roles: bool,
    },
}

/// A user action with its arguments checked
enum UserOp {
    Add {
        role_arn: String,
        provider_arn: String,
    },
    Remove(RemovalCriteria),
    ShowRoles,
    ShowRecord,
}

impl UserAction {
    fn into_op(self) -> federator_core::FederatorResult<UserOp> {
        Ok(match self {
            Self::Add {
                role_arn,
                provider_arn,
            } => UserOp::Add {
                role_arn,
                provider_arn,
            },
            Self::Remove {
                custom_type,
                role_arn,
                provider_arn,
            } => UserOp::Remove(RemovalCriteria::from_parts(
                custom_type,
                role_arn,
                provider_arn,
            )?),
            Self::Show { roles: true } => UserOp::ShowRoles,
            Self::Show { roles: false } => UserOp::ShowRecord,
        })
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn build_service(
    args: &DirectoryArgs,
    paths: &ConfigPaths,
) -> Result<FederatorService<HttpDirectoryClient>> {
    let Some(access_token) = args.access_token.as_deref() else {
        bail!(missing_token_hint(paths));
    };

    let config = DirectoryConfig::new(access_token)
        .with_base_url(args.api_base_url.as_str())
        .with_timeout(Duration::from_secs(args.timeout_secs));
    debug!("Directory client config: {config:?}");

    let client = HttpDirectoryClient::new(config).context("Failed to initialize Directory client")?;
    Ok(FederatorService::new(client))
}

fn missing_token_hint(paths: &ConfigPaths) -> String {
    let base = "No access token supplied; pass --access-token or set FEDERATOR_ACCESS_TOKEN";
    match init::load_client_credentials(paths) {
        Ok(Some(credentials)) => match init::consent_url(&credentials.client_id) {
            Ok(url) => format!("{base}. Authorize the Directory API scopes at {url}"),
            Err(_) => base.to_string(),
        },
        _ => format!("{base}. Run `federator init` first to register your OAuth client"),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = ConfigPaths::resolve(cli.config_dir)?;

    match cli.command {
        Commands::Init {
            client_id,
            client_secret,
        } => {
            let credentials = ClientCredentials {
                client_id,
                client_secret,
            };
            init::store_client_credentials(&paths, &credentials)?;
            println!(
                "Stored client credentials in {}",
                paths.client_file.display()
            );
            println!(
                "Authorize the Directory API scopes at:\n{}",
                init::consent_url(&credentials.client_id)?
            );
            println!("Then pass the resulting access token with --access-token or FEDERATOR_ACCESS_TOKEN");
        }
        Commands::Schema {
            customer_id,
            action,
        } => {
            let service = build_service(&cli.directory, &paths)?;
            match action {
                SchemaAction::Verify => {
                    if !service.schema_exists(&customer_id).await? {
                        bail!(federator_core::FederatorError::SchemaAbsent(customer_id));
                    }
                    println!("Custom SSO schema exists");
                }
                SchemaAction::Create => {
                    let outcome = service
                        .create_schema(&customer_id)
                        .await
                        .context("Could not create custom SSO schema")?;
                    println!("{}", output::create_message(outcome));
                }
                SchemaAction::Delete => {
                    let outcome = service.delete_schema(&customer_id).await?;
                    println!("{}", output::delete_message(outcome));
                }
                SchemaAction::Show => {
                    println!("{}", service.show_schema(&customer_id).await?);
                }
            }
        }
        Commands::User { user_key, action } => {
            // Reject incomplete removal criteria before asking for credentials
            let op = action.into_op()?;
            let service = build_service(&cli.directory, &paths)?;
            match op {
                UserOp::Add {
                    role_arn,
                    provider_arn,
                } => {
                    let outcome = service
                        .add_role(&user_key, &role_arn, &provider_arn)
                        .await
                        .with_context(|| format!("Could not add new role to user {user_key}"))?;
                    println!("{}", output::add_message(&user_key, &outcome));
                }
                UserOp::Remove(criteria) => {
                    let removed = service
                        .remove_role(&user_key, &criteria)
                        .await
                        .with_context(|| format!("Could not remove role from user {user_key}"))?;
                    println!("{}", output::remove_message(&user_key, &removed));
                }
                UserOp::ShowRoles => {
                    let roles = service.list_roles(&user_key).await?;
                    println!("{}", output::roles_table(&roles));
                }
                UserOp::ShowRecord => {
                    println!("{}", service.show_user(&user_key).await?);
                }
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
