use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which kind of collection a message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Users,
    #[serde(rename = "chatgroups")]
    ChatGroups,
    #[serde(rename = "chatrooms")]
    ChatRooms,
}

/// One or more identifiers, always sent over the wire as a list.
///
/// Anything that names a single target (`&str`, `String`) or several
/// (`Vec`, slices, arrays) converts into this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Targets(pub Vec<String>);

impl Targets {
    /// Comma separated, as used in multi-resource paths.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<&str> for Targets {
    fn from(target: &str) -> Self {
        Targets(vec![target.to_string()])
    }
}

impl From<String> for Targets {
    fn from(target: String) -> Self {
        Targets(vec![target])
    }
}

impl From<&String> for Targets {
    fn from(target: &String) -> Self {
        Targets(vec![target.clone()])
    }
}

impl From<Vec<String>> for Targets {
    fn from(targets: Vec<String>) -> Self {
        Targets(targets)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(targets: Vec<&str>) -> Self {
        Targets(targets.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Targets {
    fn from(targets: &[&str]) -> Self {
        Targets(targets.iter().map(|target| target.to_string()).collect())
    }
}

impl From<&[String]> for Targets {
    fn from(targets: &[String]) -> Self {
        Targets(targets.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(targets: [&str; N]) -> Self {
        Targets(targets.iter().map(|target| target.to_string()).collect())
    }
}

/// Display dimensions reported alongside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 480,
            height: 720,
        }
    }
}

/// A previously uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub url: String,
    pub filename: String,
    /// The share secret returned by the upload.
    pub secret: String,
    #[serde(default)]
    pub size: ImageSize,
}

impl ImageAttachment {
    pub fn new(
        filename: impl Into<String>,
        url: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            secret: secret.into(),
            size: ImageSize::default(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = ImageSize { width, height };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAttachment {
    pub url: String,
    pub filename: String,
    /// Duration in seconds.
    pub length: u64,
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAttachment {
    pub url: String,
    pub filename: String,
    /// URL of the uploaded thumbnail.
    pub thumb: String,
    /// Duration in seconds.
    pub length: u64,
    /// Size of the video file in bytes.
    pub file_length: u64,
    pub thumb_secret: String,
    pub secret: String,
}

/// The `msg` object of an envelope, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MessageBody {
    #[serde(rename = "txt")]
    Text { msg: String },
    #[serde(rename = "img")]
    Image(ImageAttachment),
    #[serde(rename = "audio")]
    Audio(AudioAttachment),
    #[serde(rename = "video")]
    Video(VideoAttachment),
    /// Pass-through command, delivered but never shown to the user.
    #[serde(rename = "cmd")]
    Command { action: String },
}

/// Everything POSTed to `/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub target_type: TargetType,
    pub target: Targets,
    pub msg: MessageBody,
    pub from: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub ext: Value,
}

impl MessageEnvelope {
    pub fn new(
        target_type: TargetType,
        from: impl Into<String>,
        target: impl Into<Targets>,
        msg: MessageBody,
    ) -> Self {
        Self {
            target_type,
            target: target.into(),
            msg,
            from: from.into(),
            ext: Value::Null,
        }
    }

    /// Attaches application-defined extension fields.
    pub fn with_ext(mut self, ext: Value) -> Self {
        self.ext = ext;
        self
    }
}
