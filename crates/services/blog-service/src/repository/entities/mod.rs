//! Stored document shapes.

mod post;
mod user;

pub use post::PostDocument;
pub use user::UserDocument;

use mongodb::bson::oid::ObjectId;

/// Parse a hex id; malformed ids simply match nothing.
pub fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Parse a list of hex ids, dropping malformed ones.
pub fn parse_ids(ids: &[String]) -> Vec<ObjectId> {
    ids.iter().filter_map(|id| parse_id(id)).collect()
}
