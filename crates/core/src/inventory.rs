//! Inventory module - named values shown beside the map
//!
//! Each item owns an update function. Hosts pass a candidate value and the
//! function decides what the item's new value is; the old value is replaced,
//! never accumulated.
//!
//! Labels are drawn as raw terminal text, so names and text values never
//! carry control characters.

use std::fmt;

use crate::types::ConfigError;

/// A displayable inventory value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValue {
    Int(i64),
    Text(String),
    Flag(bool),
}

impl ItemValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ItemValue::Flag(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemValue::Int(v) => write!(f, "{}", v),
            ItemValue::Text(v) => f.write_str(v),
            ItemValue::Flag(true) => f.write_str("yes"),
            ItemValue::Flag(false) => f.write_str("no"),
        }
    }
}

impl From<i64> for ItemValue {
    fn from(v: i64) -> Self {
        ItemValue::Int(v)
    }
}

impl From<i32> for ItemValue {
    fn from(v: i32) -> Self {
        ItemValue::Int(i64::from(v))
    }
}

impl From<bool> for ItemValue {
    fn from(v: bool) -> Self {
        ItemValue::Flag(v)
    }
}

impl From<&str> for ItemValue {
    fn from(v: &str) -> Self {
        ItemValue::Text(v.to_owned())
    }
}

impl From<String> for ItemValue {
    fn from(v: String) -> Self {
        ItemValue::Text(v)
    }
}

pub type UpdateFn = Box<dyn Fn(ItemValue) -> ItemValue>;

pub struct InventoryItem {
    name: String,
    value: ItemValue,
    update: UpdateFn,
}

impl fmt::Debug for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryItem")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<ItemValue>,
        update: impl Fn(ItemValue) -> ItemValue + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            update: Box::new(update),
        }
    }

    /// An item whose update stores the candidate unchanged.
    pub fn replacing(name: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        Self::new(name, value, |candidate| candidate)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ItemValue {
        &self.value
    }

    /// Run the update function on `candidate` and store the result.
    ///
    /// Control characters in a text result become U+FFFD.
    pub fn apply(&mut self, candidate: ItemValue) -> &ItemValue {
        self.value = match (self.update)(candidate) {
            ItemValue::Text(text) if text.chars().any(char::is_control) => {
                tracing::warn!(name = %self.name, "control characters replaced in inventory text");
                ItemValue::Text(
                    text.chars()
                        .map(|c| if c.is_control() { char::REPLACEMENT_CHARACTER } else { c })
                        .collect(),
                )
            }
            value => value,
        };
        &self.value
    }

    fn first_control_char(&self) -> Option<char> {
        let value = match &self.value {
            ItemValue::Text(text) => text.as_str(),
            _ => "",
        };
        self.name.chars().chain(value.chars()).find(|c| c.is_control())
    }

    /// Overlay text, `"name : value"`.
    pub fn label(&self) -> String {
        format!("{} : {}", self.name, self.value)
    }
}

/// Items in insertion order.
#[derive(Debug, Default)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: InventoryItem) -> Result<(), ConfigError> {
        if let Some(ch) = item.first_control_char() {
            return Err(ConfigError::ControlText {
                item: item.name,
                ch,
            });
        }
        if self.items.iter().any(|i| i.name == item.name) {
            return Err(ConfigError::DuplicateItem(item.name));
        }
        self.items.push(item);
        Ok(())
    }

    /// Builder-style [`Inventory::insert`].
    pub fn with(mut self, item: InventoryItem) -> Result<Self, ConfigError> {
        self.insert(item)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ItemValue> {
        self.items.iter().find(|i| i.name == name).map(|i| &i.value)
    }

    /// Update the named item with `candidate`.
    /// Returns the new value, or `None` if no such item exists.
    pub fn update(&mut self, name: &str, candidate: impl Into<ItemValue>) -> Option<&ItemValue> {
        let Some(item) = self.items.iter_mut().find(|i| i.name == name) else {
            tracing::warn!(name, "update for unknown inventory item");
            return None;
        };
        Some(item.apply(candidate.into()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> InventoryItem {
        InventoryItem::new("Gold", 10, |candidate| {
            ItemValue::Int(candidate.as_int().unwrap_or(0).max(0))
        })
    }

    #[test]
    fn update_replaces_value() {
        let mut inv = Inventory::new().with(gold()).unwrap();
        assert_eq!(inv.update("Gold", 25), Some(&ItemValue::Int(25)));
        assert_eq!(inv.update("Gold", 3), Some(&ItemValue::Int(3)));
        assert_eq!(inv.get("Gold"), Some(&ItemValue::Int(3)));
    }

    #[test]
    fn update_runs_the_item_function() {
        let mut inv = Inventory::new().with(gold()).unwrap();
        assert_eq!(inv.update("Gold", -7), Some(&ItemValue::Int(0)));
        assert_eq!(inv.update("Gold", "lots"), Some(&ItemValue::Int(0)));
    }

    #[test]
    fn unknown_items_are_ignored() {
        let mut inv = Inventory::new().with(gold()).unwrap();
        assert_eq!(inv.update("Mana", 1), None);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let inv = Inventory::new().with(gold()).unwrap();
        assert_eq!(
            inv.with(InventoryItem::replacing("Gold", 1)).unwrap_err(),
            ConfigError::DuplicateItem("Gold".into())
        );
    }

    #[test]
    fn control_characters_are_rejected_on_insert() {
        let err = Inventory::new()
            .with(InventoryItem::replacing("Note", "\x1b[4\x1b[1m1m"))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ControlText {
                item: "Note".into(),
                ch: '\x1b'
            }
        );

        let err = Inventory::new()
            .with(InventoryItem::replacing("Two\nlines", 1))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ControlText {
                item: "Two\nlines".into(),
                ch: '\n'
            }
        );
    }

    #[test]
    fn updated_text_loses_control_characters() {
        let mut inv = Inventory::new()
            .with(InventoryItem::replacing("Note", "plain"))
            .unwrap();
        inv.update("Note", "a\x1b[1mb\nc");
        let label = inv.iter().next().unwrap().label();
        assert_eq!(label, "Note : a\u{FFFD}[1mb\u{FFFD}c");
        assert!(!label.chars().any(char::is_control));
    }

    #[test]
    fn labels_keep_insertion_order() {
        let inv = Inventory::new()
            .with(InventoryItem::replacing("Health", 3))
            .unwrap()
            .with(InventoryItem::replacing("Weapon", "stick"))
            .unwrap()
            .with(InventoryItem::replacing("Key", false))
            .unwrap();

        let labels: Vec<String> = inv.iter().map(InventoryItem::label).collect();
        assert_eq!(labels, ["Health : 3", "Weapon : stick", "Key : no"]);
    }
}
