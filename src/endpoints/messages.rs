use serde_json::Value;

use crate::{
    api::{EmChat, Result, Transport},
    models::{
        AudioAttachment, ImageAttachment, MessageBody, MessageEnvelope, TargetType, Targets,
        VideoAttachment,
    },
};

impl<T: Transport> EmChat<T> {
    /// Sends a prebuilt envelope as-is.
    pub async fn send_message(&self, envelope: &MessageEnvelope) -> Result<Value> {
        self.post(&["messages"], envelope).await
    }

    /// Sends a plain text message.
    ///
    /// `target` may name one recipient or several. It is always sent as a list.
    pub async fn send_text(
        &self,
        target_type: TargetType,
        from: &str,
        target: impl Into<Targets>,
        content: &str,
        ext: Value,
    ) -> Result<Value> {
        let msg = MessageBody::Text {
            msg: content.to_string(),
        };
        self.send_body(target_type, from, target, msg, ext).await
    }

    /// Sends an image that has already been uploaded.
    pub async fn send_image(
        &self,
        target_type: TargetType,
        from: &str,
        target: impl Into<Targets>,
        image: ImageAttachment,
        ext: Value,
    ) -> Result<Value> {
        self.send_body(target_type, from, target, MessageBody::Image(image), ext)
            .await
    }

    pub async fn send_audio(
        &self,
        target_type: TargetType,
        from: &str,
        target: impl Into<Targets>,
        audio: AudioAttachment,
        ext: Value,
    ) -> Result<Value> {
        self.send_body(target_type, from, target, MessageBody::Audio(audio), ext)
            .await
    }

    pub async fn send_video(
        &self,
        target_type: TargetType,
        from: &str,
        target: impl Into<Targets>,
        video: VideoAttachment,
        ext: Value,
    ) -> Result<Value> {
        self.send_body(target_type, from, target, MessageBody::Video(video), ext)
            .await
    }

    /// Sends a pass-through command message carrying only an `action`.
    pub async fn send_command(
        &self,
        target_type: TargetType,
        from: &str,
        target: impl Into<Targets>,
        action: &str,
        ext: Value,
    ) -> Result<Value> {
        let msg = MessageBody::Command {
            action: action.to_string(),
        };
        self.send_body(target_type, from, target, msg, ext).await
    }

    async fn send_body(
        &self,
        target_type: TargetType,
        from: &str,
        target: impl Into<Targets>,
        msg: MessageBody,
        ext: Value,
    ) -> Result<Value> {
        let envelope = MessageEnvelope::new(target_type, from, target, msg).with_ext(ext);
        self.send_message(&envelope).await
    }
}
