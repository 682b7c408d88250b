use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<db::models::member::Model> for MemberResponse {
    fn from(m: db::models::member::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberReq {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
}
