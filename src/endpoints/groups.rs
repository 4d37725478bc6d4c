use serde_json::Value;

use crate::{
    api::{EmChat, Result, Transport},
    models::{GroupUpdate, NewGroup, OwnerChange, Targets, Usernames},
};

impl<T: Transport> EmChat<T> {
    /// Lists up to `limit` groups of the application.
    pub async fn get_groups(&self, limit: u32) -> Result<Value> {
        self.get_with_query(&["chatgroups"], &[("limit", limit.to_string())])
            .await
    }

    /// Fetches details of one group, or several in a single request.
    pub async fn get_group_detail(&self, group_ids: impl Into<Targets>) -> Result<Value> {
        // Several ids share one segment, separated by commas.
        // The comma is left as-is by the segment encoding.
        let group_ids = group_ids.into().joined();
        self.get(&["chatgroups", &group_ids]).await
    }

    pub async fn create_group(&self, group: &NewGroup) -> Result<Value> {
        self.post(&["chatgroups"], group).await
    }

    pub async fn modify_group_info(&self, group_id: &str, update: &GroupUpdate) -> Result<Value> {
        self.put(&["chatgroups", group_id], update).await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<Value> {
        self.delete(&["chatgroups", group_id]).await
    }

    pub async fn get_group_users(&self, group_id: &str) -> Result<Value> {
        self.get(&["chatgroups", group_id, "users"]).await
    }

    pub async fn add_group_member(&self, group_id: &str, username: &str) -> Result<Value> {
        self.post_empty(&["chatgroups", group_id, "users", username])
            .await
    }

    pub async fn add_group_members(
        &self,
        group_id: &str,
        usernames: impl Into<Targets>,
    ) -> Result<Value> {
        let body = Usernames {
            usernames: usernames.into(),
        };
        self.post(&["chatgroups", group_id, "users"], &body)
            .await
    }

    pub async fn delete_group_member(&self, group_id: &str, username: &str) -> Result<Value> {
        self.delete(&["chatgroups", group_id, "users", username])
            .await
    }

    /// Removes several members at once; the names travel comma separated in the path.
    pub async fn delete_group_members(
        &self,
        group_id: &str,
        usernames: impl Into<Targets>,
    ) -> Result<Value> {
        let usernames = usernames.into().joined();
        self.delete(&["chatgroups", group_id, "users", &usernames])
            .await
    }

    pub async fn get_groups_for_user(&self, username: &str) -> Result<Value> {
        self.get(&["users", username, "joined_chatgroups"])
            .await
    }

    /// Transfers ownership of a group to another member.
    ///
    /// This shares its endpoint with `modify_group_info`; the API tells
    /// the two apart purely by the `newowner` field.
    pub async fn change_group_owner(&self, group_id: &str, new_owner: &str) -> Result<Value> {
        let body = OwnerChange {
            newowner: new_owner,
        };
        self.put(&["chatgroups", group_id], &body).await
    }

    pub async fn get_group_blacklist(&self, group_id: &str) -> Result<Value> {
        self.get(&["chatgroups", group_id, "blocks", "users"])
            .await
    }

    pub async fn add_group_blacklist_member(&self, group_id: &str, username: &str) -> Result<Value> {
        self.post_empty(&["chatgroups", group_id, "blocks", "users", username])
            .await
    }

    pub async fn delete_group_blacklist_member(
        &self,
        group_id: &str,
        username: &str,
    ) -> Result<Value> {
        self.delete(&["chatgroups", group_id, "blocks", "users", username])
            .await
    }
}
