use crate::capabilities::Keyworded;
use crate::models::types::ItemId;
use serde::{Deserialize, Serialize};
use waygate_core::Keyword;

/// An item a player carries around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display name (ie: "a brass key")
    pub name: String,
    /// Keywords the item answers to (ie: "brass", "key")
    pub keywords: Vec<Keyword>,
}

impl Item {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            keywords: keywords.iter().filter_map(|k| Keyword::parse(k)).collect(),
        }
    }
}

impl Keyworded for Item {
    fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.matches(keyword))
    }
}
