use serde_json::Value;

use crate::{
    api::{EmChat, Result, Transport},
    models::{ChatRoomUpdate, NewChatRoom},
};

impl<T: Transport> EmChat<T> {
    pub async fn create_chat_room(&self, room: &NewChatRoom) -> Result<Value> {
        self.post(&["chatrooms"], room).await
    }

    pub async fn modify_chat_room(
        &self,
        chat_room_id: &str,
        update: &ChatRoomUpdate,
    ) -> Result<Value> {
        self.put(&["chatrooms", chat_room_id], update).await
    }

    pub async fn delete_chat_room(&self, chat_room_id: &str) -> Result<Value> {
        self.delete(&["chatrooms", chat_room_id]).await
    }

    /// Lists every chatroom of the application.
    pub async fn get_chat_rooms(&self) -> Result<Value> {
        self.get(&["chatrooms"]).await
    }

    pub async fn get_chat_room_detail(&self, chat_room_id: &str) -> Result<Value> {
        self.get(&["chatrooms", chat_room_id]).await
    }

    pub async fn get_chat_rooms_for_user(&self, username: &str) -> Result<Value> {
        self.get(&["users", username, "joined_chatrooms"])
            .await
    }

    pub async fn add_chat_room_member(&self, chat_room_id: &str, username: &str) -> Result<Value> {
        self.post_empty(&["chatrooms", chat_room_id, "users", username])
            .await
    }

    pub async fn delete_chat_room_member(
        &self,
        chat_room_id: &str,
        username: &str,
    ) -> Result<Value> {
        self.delete(&["chatrooms", chat_room_id, "users", username])
            .await
    }
}
