mod storage;

use anyhow::Context;
use emchat::{EmChat, NewChatRoom, NewGroup, TargetType};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("emchat=info")),
        )
        .init();

    let client = EmChat::from_config(storage::load_config()?);

    // A throwaway user, so repeated runs never collide.
    let username = format!("test_{}", Uuid::new_v4().simple());
    client
        .create_user(&username, "123123")
        .await
        .context("unable to register user")?;
    info!(%username, "registered user");

    let group = NewGroup {
        group_name: format!("gp{username}"),
        desc: "desc".to_string(),
        public: true,
        max_users: 20,
        approval: true,
        owner: username.clone(),
        members: vec![username.clone()],
    };
    match client.create_group(&group).await {
        Ok(_) => match client.get_groups(10).await {
            Ok(groups) => info!(%groups, "listed groups"),
            Err(err) => error!(%err, "unable to list groups"),
        },
        Err(err) => error!(%err, "unable to create group"),
    }

    let room = NewChatRoom::new(format!("room{username}"), "xxx", username.clone())
        .with_max_users(5000)
        .with_members(username.as_str());
    let created = client
        .create_chat_room(&room)
        .await
        .context("unable to create chatroom")?;

    let Some(chat_room_id) = created["data"]["id"].as_str() else {
        anyhow::bail!("chatroom response did not contain an id: {created}");
    };

    match client
        .send_text(
            TargetType::ChatRooms,
            &username,
            chat_room_id,
            "HELLO, WORLD!",
            json!({}),
        )
        .await
    {
        Ok(sent) => info!(%sent, "sent message"),
        Err(err) => error!(%err, "unable to send message"),
    }

    let rooms = client
        .get_chat_rooms()
        .await
        .context("unable to list chatrooms")?;
    info!(%rooms, "listed chatrooms");

    Ok(())
}
