use serde_json::{json, Value};

use crate::{
    api::{EmChat, Result, Transport},
    models::{NewUser, NicknameChange, PasswordChange, Targets, Usernames},
};

impl<T: Transport> EmChat<T> {
    /// Registers a single user.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<Value> {
        self.post(&["users"], &json!({ "username": username, "password": password }))
            .await
    }

    /// Registers several users in one request.
    pub async fn create_users(&self, users: &[NewUser]) -> Result<Value> {
        self.post(&["users"], users).await
    }

    pub async fn reset_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<Value> {
        let change = PasswordChange {
            oldpassword: old_password,
            newpassword: new_password,
        };
        self.put(&["users", username, "password"], &change)
            .await
    }

    pub async fn get_user(&self, username: &str) -> Result<Value> {
        self.get(&["users", username]).await
    }

    /// Lists up to `limit` users.
    pub async fn get_users(&self, limit: u32) -> Result<Value> {
        self.get_with_query(&["users"], &[("limit", limit.to_string())])
            .await
    }

    pub async fn delete_user(&self, username: &str) -> Result<Value> {
        self.delete(&["users", username]).await
    }

    /// Deletes up to `limit` users, oldest first.
    ///
    /// There is no way to pick which users go; callers wanting a specific
    /// user should use `delete_user` instead.
    pub async fn delete_users(&self, limit: u32) -> Result<Value> {
        self.delete_with_query(&["users"], &[("limit", limit.to_string())])
            .await
    }

    pub async fn edit_nickname(&self, username: &str, nickname: &str) -> Result<Value> {
        self.put(&["users", username], &NicknameChange { nickname })
            .await
    }

    pub async fn add_friend(&self, username: &str, friend: &str) -> Result<Value> {
        self.post_empty(&["users", username, "contacts", "users", friend])
            .await
    }

    pub async fn delete_friend(&self, username: &str, friend: &str) -> Result<Value> {
        self.delete(&["users", username, "contacts", "users", friend])
            .await
    }

    pub async fn get_friends(&self, username: &str) -> Result<Value> {
        self.get(&["users", username, "contacts", "users"]).await
    }

    pub async fn get_blacklist(&self, username: &str) -> Result<Value> {
        self.get(&["users", username, "blocks", "users"]).await
    }

    pub async fn add_users_to_blacklist(
        &self,
        username: &str,
        blocked: impl Into<Targets>,
    ) -> Result<Value> {
        let body = Usernames {
            usernames: blocked.into(),
        };
        self.post(&["users", username, "blocks", "users"], &body)
            .await
    }

    pub async fn delete_user_from_blacklist(&self, username: &str, blocked: &str) -> Result<Value> {
        self.delete(&["users", username, "blocks", "users", blocked])
            .await
    }

    pub async fn get_online_status(&self, username: &str) -> Result<Value> {
        self.get(&["users", username, "status"]).await
    }

    /// Counts messages waiting for the user to come back online.
    pub async fn get_offline_message_count(&self, username: &str) -> Result<Value> {
        // The API answers this one on POST, even though nothing is created.
        self.post_empty(&["users", username, "offline_msg_count"])
            .await
    }

    /// Reports whether a specific offline message has been delivered.
    /// The response maps the message id to `delivered` or `undelivered`.
    pub async fn get_offline_message_status(&self, username: &str, msg_id: &str) -> Result<Value> {
        self.get(&["users", username, "offline_msg_status", msg_id])
            .await
    }

    pub async fn deactivate_user(&self, username: &str) -> Result<Value> {
        self.post_empty(&["users", username, "deactivate"])
            .await
    }

    pub async fn activate_user(&self, username: &str) -> Result<Value> {
        self.post_empty(&["users", username, "activate"])
            .await
    }

    /// Forces every session of the user offline.
    pub async fn disconnect_user(&self, username: &str) -> Result<Value> {
        self.post_empty(&["users", username, "disconnect"])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        stub::{
            seeded_client, seeded_client_with, transport_error, unseeded_client_with,
            StubTransport,
        },
        EmChatError,
    };
    use reqwest::{header::AUTHORIZATION, Method, StatusCode};

    #[tokio::test]
    async fn create_user_fetches_token_first() {
        let transport = StubTransport::new()
            .respond(StatusCode::OK, json!({"access_token": "fresh"}))
            .respond(StatusCode::OK, json!({"entities": [{"username": "u1"}]}));
        let client = unseeded_client_with(transport);

        let value = client.create_user("u1", "p1").await.unwrap();
        assert_eq!(value, json!({"entities": [{"username": "u1"}]}));

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url.path(), "/o/a/token");
        assert_eq!(
            requests[0].body,
            Some(json!({"grant_type": "client_credentials", "client_id": "i", "client_secret": "s"}))
        );
        assert_eq!(requests[1].method, Method::POST);
        assert_eq!(requests[1].url.path(), "/o/a/users");
        assert_eq!(requests[1].body, Some(json!({"username": "u1", "password": "p1"})));
        assert_eq!(requests[1].headers[AUTHORIZATION], "Bearer fresh");
    }

    #[tokio::test]
    async fn get_user_with_seeded_token_skips_token_fetch() {
        let client = seeded_client();
        client.get_user("u1").await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url.as_str(), "http://api.test/o/a/users/u1");
        assert_eq!(requests[0].headers[AUTHORIZATION], "Bearer T");
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn failed_token_fetch_prevents_request() {
        let transport = StubTransport::new().respond(
            StatusCode::UNAUTHORIZED,
            json!({"error": "invalid_grant"}),
        );
        let client = unseeded_client_with(transport);

        let err = client.get_user("u1").await.unwrap_err();
        assert_eq!(err.api_body(), Some(&json!({"error": "invalid_grant"})));
        assert_eq!(client.transport().requests().len(), 1);
        assert_eq!(client.transport().token_requests(), 1);
    }

    #[tokio::test]
    async fn delete_user_surfaces_api_error_body() {
        let client = seeded_client_with(
            StubTransport::new().respond(StatusCode::BAD_REQUEST, json!({"error": "invalid_username"})),
        );

        let err = client.delete_user("u1").await.unwrap_err();
        match err {
            EmChatError::Api { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, json!({"error": "invalid_username"}));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(client.transport().last().method, Method::DELETE);
    }

    #[tokio::test]
    async fn transport_failure_during_token_fetch_skips_request() {
        let expected = transport_error().to_string();
        let client = unseeded_client_with(StubTransport::new().respond_err(transport_error()));

        let err = client.delete_user("u1").await.unwrap_err();
        assert!(matches!(err, EmChatError::Transport(_)));
        assert_eq!(err.to_string(), expected);

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/o/a/token");
    }

    #[tokio::test]
    async fn usernames_never_escape_their_segment() {
        let client = seeded_client();

        client.delete_user("../../other/users/victim").await.unwrap();
        let request = client.transport().last();
        assert_eq!(
            request.url.as_str(),
            "http://api.test/o/a/users/..%2F..%2Fother%2Fusers%2Fvictim"
        );

        client.delete_user("alice#x").await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.url.path(), "/o/a/users/alice%23x");
        assert!(request.url.fragment().is_none());

        client.get_user("a?limit=1").await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.url.path(), "/o/a/users/a%3Flimit=1");
        assert!(request.url.query().is_none());
    }

    #[tokio::test]
    async fn parent_segment_username_is_refused() {
        let client = seeded_client();
        let err = client.delete_user("..").await.unwrap_err();
        assert!(matches!(err, EmChatError::InvalidPathSegment(_)));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn batch_create_sends_array() {
        let client = seeded_client();
        let users = vec![
            NewUser::new("u1", "p1"),
            NewUser::new("u2", "p2").with_nickname("two"),
        ];
        client.create_users(&users).await.unwrap();

        assert_eq!(
            client.transport().last().body,
            Some(json!([
                {"username": "u1", "password": "p1"},
                {"username": "u2", "password": "p2", "nickname": "two"},
            ]))
        );
    }

    #[tokio::test]
    async fn limit_is_sent_as_query() {
        let client = seeded_client();
        client.get_users(10).await.unwrap();
        assert_eq!(client.transport().last().url.as_str(), "http://api.test/o/a/users?limit=10");

        client.delete_users(5).await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url.as_str(), "http://api.test/o/a/users?limit=5");
    }

    #[tokio::test]
    async fn password_and_nickname_updates_use_put() {
        let client = seeded_client();
        client.reset_password("u1", "old", "new").await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url.path(), "/o/a/users/u1/password");
        assert_eq!(request.body, Some(json!({"oldpassword": "old", "newpassword": "new"})));

        client.edit_nickname("u1", "Nick").await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url.path(), "/o/a/users/u1");
        assert_eq!(request.body, Some(json!({"nickname": "Nick"})));
    }

    #[tokio::test]
    async fn bodiless_posts_send_empty_object() {
        let client = seeded_client();
        client.add_friend("u1", "u2").await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.url.path(), "/o/a/users/u1/contacts/users/u2");
        assert_eq!(request.body, Some(json!({})));

        for (path, body) in [
            ("/o/a/users/u1/deactivate", client.deactivate_user("u1").await),
            ("/o/a/users/u1/activate", client.activate_user("u1").await),
            ("/o/a/users/u1/disconnect", client.disconnect_user("u1").await),
            ("/o/a/users/u1/offline_msg_count", client.get_offline_message_count("u1").await),
        ] {
            body.unwrap();
            let sent = client
                .transport()
                .requests()
                .into_iter()
                .find(|request| request.url.path() == path)
                .expect("request should have been sent");
            assert_eq!(sent.method, Method::POST);
            assert_eq!(sent.body, Some(json!({})));
        }
    }

    #[tokio::test]
    async fn blacklist_accepts_single_or_many() {
        let client = seeded_client();
        client.add_users_to_blacklist("u1", "u2").await.unwrap();
        assert_eq!(client.transport().last().body, Some(json!({"usernames": ["u2"]})));

        client.add_users_to_blacklist("u1", vec!["u2", "u3"]).await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.url.path(), "/o/a/users/u1/blocks/users");
        assert_eq!(request.body, Some(json!({"usernames": ["u2", "u3"]})));

        client.delete_user_from_blacklist("u1", "u2").await.unwrap();
        let request = client.transport().last();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url.path(), "/o/a/users/u1/blocks/users/u2");
    }

    #[tokio::test]
    async fn read_only_user_queries_use_get() {
        let client = seeded_client();
        client.get_friends("u1").await.unwrap();
        client.get_blacklist("u1").await.unwrap();
        client.get_online_status("u1").await.unwrap();
        client.get_offline_message_status("u1", "m1").await.unwrap();
        client.delete_friend("u1", "u2").await.unwrap();

        let sent: Vec<(Method, String)> = client
            .transport()
            .requests()
            .into_iter()
            .map(|request| (request.method, request.url.path().to_string()))
            .collect();
        assert_eq!(
            sent,
            vec![
                (Method::GET, "/o/a/users/u1/contacts/users".to_string()),
                (Method::GET, "/o/a/users/u1/blocks/users".to_string()),
                (Method::GET, "/o/a/users/u1/status".to_string()),
                (Method::GET, "/o/a/users/u1/offline_msg_status/m1".to_string()),
                (Method::DELETE, "/o/a/users/u1/contacts/users/u2".to_string()),
            ]
        );
    }
}
