mod message;
mod resources;

pub use message::{
    AudioAttachment, ImageAttachment, ImageSize, MessageBody, MessageEnvelope, TargetType,
    Targets, VideoAttachment,
};
pub use resources::{ChatRoomUpdate, GroupUpdate, NewChatRoom, NewGroup, NewUser};
pub(crate) use resources::{NicknameChange, OwnerChange, PasswordChange, Usernames};
