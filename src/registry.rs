//! Registry of all message stacks.

use std::collections::BTreeMap;

use crate::message::Message;
use crate::render::TextureHandle;
use crate::stack::{MessageStack, StackLayout};

/// The default stack plus every named stack.
///
/// Named stacks are kept sorted by name so every frame draws them in the
/// same order.
#[derive(Debug)]
pub struct StackRegistry {
    default_stack: MessageStack,
    stacks: BTreeMap<String, MessageStack>,
    /// Textures of messages removed outside a layout pass, waiting to be
    /// released by the next one.
    orphaned_textures: Vec<TextureHandle>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self {
            default_stack: MessageStack::new(StackLayout::default()),
            stacks: BTreeMap::new(),
            orphaned_textures: Vec::new(),
        }
    }

    /// Register a named stack. An existing stack with the same name is kept
    /// as is, along with its queued messages. The empty name belongs to the
    /// default stack.
    pub fn add_stack(&mut self, layout: StackLayout) -> bool {
        if layout.name.is_empty() {
            tracing::warn!("Ignoring stack registration with empty name");
            return false;
        }
        if self.stacks.contains_key(&layout.name) {
            tracing::warn!("Stack '{}' already registered, keeping original", layout.name);
            return false;
        }
        tracing::debug!("Registered message stack '{}' ({:?})", layout.name, layout.direction);
        self.stacks.insert(layout.name.clone(), MessageStack::new(layout));
        true
    }

    pub fn default_stack(&self) -> &MessageStack {
        &self.default_stack
    }

    /// Look up a stack by name; `""` is the default stack.
    pub fn get(&self, name: &str) -> Option<&MessageStack> {
        if name.is_empty() {
            return Some(&self.default_stack);
        }
        self.stacks.get(name)
    }

    /// The named stack, or the default stack if no such name is registered.
    pub fn resolve_mut(&mut self, name: &str) -> &mut MessageStack {
        match self.stacks.get_mut(name) {
            Some(stack) => stack,
            None => {
                if !name.is_empty() {
                    tracing::trace!("Unknown stack '{}', using default", name);
                }
                &mut self.default_stack
            }
        }
    }

    /// Default stack first, then named stacks by name.
    pub fn stacks_mut(&mut self) -> impl Iterator<Item = &mut MessageStack> {
        std::iter::once(&mut self.default_stack).chain(self.stacks.values_mut())
    }

    pub fn stack_names(&self) -> impl Iterator<Item = &str> {
        self.stacks.keys().map(String::as_str)
    }

    /// Empty every stack. Stacks stay registered.
    pub fn clear(&mut self) -> usize {
        let mut removed: Vec<Message> = Vec::new();
        for stack in std::iter::once(&mut self.default_stack).chain(self.stacks.values_mut()) {
            removed.extend(stack.drain());
        }
        let count = removed.len();
        self.orphaned_textures
            .extend(removed.into_iter().filter_map(|mut msg| msg.texture.take()).map(|t| t.handle));
        count
    }

    pub(crate) fn take_orphaned_textures(&mut self) -> Vec<TextureHandle> {
        std::mem::take(&mut self.orphaned_textures)
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
