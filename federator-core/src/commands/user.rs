//! Role mapping commands on a single user

use super::render_json;
use super::service::{transition, CommandState};
use crate::error::{FederatorError, FederatorResult};
use crate::google::DirectoryClient;
use crate::roles::{AddResult, RemovalCriteria, RemoveResult, RoleSet};
use crate::synthesis::build_full_replacement;
use crate::types::RoleEntry;
use log::info;

/// Result of [`FederatorService::add_role`](super::FederatorService::add_role)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The role was added and the user patched
    Added { custom_type: String },
    /// The user already had this role (by value or by custom type); nothing was sent
    AlreadyPresent { custom_type: String },
}

impl<C: DirectoryClient> super::service::FederatorService<C> {
    /// Grant `role_arn` through `provider_arn` to the user.
    ///
    /// Both ARNs are validated before the directory is contacted. The user is only patched
    /// when the role set actually changes, and the patch carries the complete resulting set.
    pub async fn add_role(
        &self,
        user_key: &str,
        role_arn: &str,
        provider_arn: &str,
    ) -> FederatorResult<AddOutcome> {
        self.add_role_inner(user_key, role_arn, provider_arn)
            .await
            .inspect_err(|_| transition("add_role", user_key, CommandState::Failed))
    }

    async fn add_role_inner(
        &self,
        user_key: &str,
        role_arn: &str,
        provider_arn: &str,
    ) -> FederatorResult<AddOutcome> {
        const OP: &str = "add_role";

        transition(OP, user_key, CommandState::Validating);
        let entry = RoleEntry::from_arns(role_arn, provider_arn)?;
        let custom_type = entry.custom_type.clone();

        transition(OP, user_key, CommandState::Fetching);
        let record = self.directory.get_user(user_key).await?;
        let mut roles = RoleSet::from_record(record.custom_schemas.as_ref());

        transition(OP, user_key, CommandState::Mutating);
        if roles.add(entry) == AddResult::AlreadyPresent {
            info!("User {user_key} already has role {custom_type}; not patching");
            transition(OP, user_key, CommandState::Done);
            return Ok(AddOutcome::AlreadyPresent { custom_type });
        }

        transition(OP, user_key, CommandState::Patching);
        self.directory
            .patch_user(user_key, &build_full_replacement(&roles))
            .await?;

        info!(
            "Added role {custom_type} to user {user_key} ({} roles total)",
            roles.len()
        );
        transition(OP, user_key, CommandState::Done);
        Ok(AddOutcome::Added { custom_type })
    }

    /// Remove one role mapping from the user and return the identifier that matched.
    ///
    /// Returns [`FederatorError::RoleNotFound`] without patching when nothing matches.
    pub async fn remove_role(
        &self,
        user_key: &str,
        criteria: &RemovalCriteria,
    ) -> FederatorResult<String> {
        self.remove_role_inner(user_key, criteria)
            .await
            .inspect_err(|_| transition("remove_role", user_key, CommandState::Failed))
    }

    async fn remove_role_inner(
        &self,
        user_key: &str,
        criteria: &RemovalCriteria,
    ) -> FederatorResult<String> {
        const OP: &str = "remove_role";

        transition(OP, user_key, CommandState::Fetching);
        let record = self.directory.get_user(user_key).await?;
        let mut roles = RoleSet::from_record(record.custom_schemas.as_ref());

        transition(OP, user_key, CommandState::Mutating);
        let removed = match roles.remove(criteria) {
            RemoveResult::Removed(removed) => removed,
            RemoveResult::NotFound => {
                return Err(FederatorError::RoleNotFound {
                    user_key: user_key.to_string(),
                    criteria: criteria.to_string(),
                })
            }
        };

        transition(OP, user_key, CommandState::Patching);
        self.directory
            .patch_user(user_key, &build_full_replacement(&roles))
            .await?;

        info!(
            "Removed role {removed} from user {user_key} ({} roles left)",
            roles.len()
        );
        transition(OP, user_key, CommandState::Done);
        Ok(removed)
    }

    /// The user's current role mappings
    pub async fn list_roles(&self, user_key: &str) -> FederatorResult<RoleSet> {
        let record = self.directory.get_user(user_key).await?;
        Ok(RoleSet::from_record(record.custom_schemas.as_ref()))
    }

    /// The full user record as pretty-printed JSON
    pub async fn show_user(&self, user_key: &str) -> FederatorResult<String> {
        let record = self.directory.get_user(user_key).await?;
        render_json(&record)
    }
}
