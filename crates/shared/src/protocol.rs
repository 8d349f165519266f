use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CommentId, UserId, WallpaperId};

pub const COMMENTS_PATH: &str = "/api/comments";
pub const RENAME_PATH: &str = "/rename";
pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub wallpaper_id: WallpaperId,
    #[serde(default = "unknown_user")]
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

fn unknown_user() -> UserId {
    UserId(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub wallpaper_id: WallpaperId,
    pub text: String,
}

/// Body of a `201 Created` reply to [`CreateCommentRequest`]. Older backends
/// answer with an empty body, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CommentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameForm {
    pub wallpaper_id: String,
    pub new_name: String,
}

impl RenameForm {
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("wallpaper_id".to_string(), self.wallpaper_id.clone()),
            ("new_name".to_string(), self.new_name.clone()),
        ]
    }
}
