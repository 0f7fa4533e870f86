//! API response models for the following relationship.
//!
//! Followings are addressed entirely through path parameters, so there is no
//! request body and no validation schema here.

use crate::db::models::followings::Following;
use crate::types::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingResponse {
    pub user_id: UserId,
    pub follower_id: UserId,
}

impl From<Following> for FollowingResponse {
    fn from(following: Following) -> Self {
        Self {
            user_id: following.user_id,
            follower_id: following.follower_id,
        }
    }
}
