//! Message stacks: ordered message storage plus immutable layout settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::message::{Message, MessageType};

/// Direction a stack grows in as messages are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StackDirection {
    #[default]
    Downward,
    Upward,
    Leftward,
    Rightward,
}

impl StackDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Downward | Self::Upward)
    }
}

/// Placement settings for a stack, fixed when the stack is registered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StackLayout {
    /// Registry key; empty for the default stack.
    #[serde(default)]
    pub name: String,
    /// Anchor offset added to the screen margins, in pixels.
    #[serde(default)]
    pub x_offset: f32,
    #[serde(default)]
    pub y_offset: f32,
    #[serde(default)]
    pub direction: StackDirection,
    /// Center each message on the axis perpendicular to `direction`.
    #[serde(default)]
    pub centered: bool,
    /// Walk messages newest-type-first instead of in key order.
    #[serde(default)]
    pub reversed: bool,
}

impl StackLayout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn direction(mut self, direction: StackDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn is_vertical(&self) -> bool {
        self.direction.is_vertical()
    }
}

/// Messages sort by type, then by submission order within a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MessageKey {
    message_type: MessageType,
    seq: u64,
}

/// Outcome of visiting one message during [`MessageStack::walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Remove,
}

#[derive(Debug)]
pub struct MessageStack {
    layout: StackLayout,
    messages: BTreeMap<MessageKey, Message>,
    next_seq: u64,
}

impl MessageStack {
    pub fn new(layout: StackLayout) -> Self {
        Self {
            layout,
            messages: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    pub fn name(&self) -> &str {
        &self.layout.name
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in render order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> {
        self.messages.values()
    }

    /// True if a message with this type and text is queued and would still
    /// be drawn by a pass at `now_ms`.
    pub fn has_message(&self, message_type: MessageType, text: &str, now_ms: u64) -> bool {
        self.of_type(message_type)
            .any(|msg| msg.is_pending(now_ms) && msg.text() == text)
    }

    /// Mark every queued message of `message_type` as discarded.
    pub fn discard_type(&mut self, message_type: MessageType) -> usize {
        let mut count = 0;
        for msg in self.messages.range_mut(Self::type_range(message_type)).map(|(_, m)| m) {
            msg.discard();
            count += 1;
        }
        count
    }

    pub fn insert(&mut self, message: Message) {
        let key = MessageKey {
            message_type: message.message_type(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.messages.insert(key, message);
    }

    /// Remove and return every message.
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages).into_values().collect()
    }

    /// Visit messages in key order (or reverse order), removing those the
    /// visitor rejects. Removal mid-walk does not disturb the remaining
    /// visits. Returns the removed messages in visit order.
    pub fn walk<F>(&mut self, reversed: bool, mut visit: F) -> Vec<Message>
    where
        F: FnMut(&mut Message) -> Visit,
    {
        let keys: Vec<MessageKey> = if reversed {
            self.messages.keys().rev().copied().collect()
        } else {
            self.messages.keys().copied().collect()
        };

        let mut removed = Vec::new();
        for key in keys {
            let Some(msg) = self.messages.get_mut(&key) else { continue };
            if visit(msg) == Visit::Remove {
                removed.extend(self.messages.remove(&key));
            }
        }
        removed
    }

    fn of_type(&self, message_type: MessageType) -> impl Iterator<Item = &Message> {
        self.messages.range(Self::type_range(message_type)).map(|(_, m)| m)
    }

    fn type_range(message_type: MessageType) -> std::ops::RangeInclusive<MessageKey> {
        MessageKey { message_type, seq: 0 }..=MessageKey { message_type, seq: u64::MAX }
    }
}
