//! Client for the Easemob instant-messaging REST API.
//!
//! An [`EmChat`] holds the organization/application identity and a bearer
//! token. Every operation lazily obtains the token with the client
//! credentials before sending its request:
//!
//! ```no_run
//! use emchat::{EmChat, TargetType};
//! use serde_json::json;
//!
//! # async fn run() -> emchat::Result<()> {
//! let client = EmChat::new("org", "app", "client-id", "client-secret");
//! client.create_user("alice", "hunter2").await?;
//! client
//!     .send_text(TargetType::Users, "alice", "bob", "hello", json!({}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
mod endpoints;
pub mod models;

pub use api::{ClientConfig, EmChat, EmChatError, Result, TokenGrant};
pub use models::{
    AudioAttachment, ChatRoomUpdate, GroupUpdate, ImageAttachment, ImageSize, MessageBody,
    MessageEnvelope, NewChatRoom, NewGroup, NewUser, TargetType, Targets, VideoAttachment,
};
