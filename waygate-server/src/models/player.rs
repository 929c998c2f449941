use crate::capabilities::Actor;
use crate::models::item::Item;
use crate::models::types::PlayerId;
use crate::net::output::OutputHandle;
use waygate_core::RoomKey;

/// Online player. Cloning is cheap enough to hand a snapshot to the world worker; the
/// output handle of a clone still talks to the same session.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Locale tag (ie: "en"), passed along but not used for translation
    pub locale: String,
    /// Current room
    pub location: RoomKey,
    pub inventory: Vec<Item>,
    /// Set by the combat engine; fighting players can't operate doors or walk away
    pub in_combat: bool,
    pub output: OutputHandle,
}

impl Player {
    pub fn new(name: impl Into<String>, location: RoomKey, output: OutputHandle) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            locale: "en".to_string(),
            location,
            inventory: Vec::new(),
            in_combat: false,
            output,
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }
}

impl Actor for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn location(&self) -> &RoomKey {
        &self.location
    }

    fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    fn say(&self, text: &str) {
        self.output.line(text);
    }
}
