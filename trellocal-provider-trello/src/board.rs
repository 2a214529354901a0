use serde::{Deserialize, Serialize};

/// A Trello board, as listed by `/members/me/boards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub url: String,
}
