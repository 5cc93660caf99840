//! Toolbar model: the fixed button list and its rendering against a snapshot.
//!
//! Buttons and keyboard accelerators share one table, so Ctrl+B and clicking
//! the bold button resolve to the very same [`Command`].

use crate::actions::{Key, KeyCombo, Modifiers};
use crate::capability::{Capability, Command};
use crate::snapshot::FormatSnapshot;

/// Visual grouping; groups are separated when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarGroup {
    Format,
    Alignment,
    List,
}

/// Immutable description of a toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    pub command: Command,
    pub icon: &'static str,
    pub title: &'static str,
    pub group: ToolbarGroup,
    /// Character that triggers this button together with the primary modifier.
    pub accelerator: Option<char>,
}

impl ToolbarButton {
    fn new(capability: Capability, icon: &'static str, title: &'static str, group: ToolbarGroup) -> Self {
        Self {
            command: Command::new(capability),
            icon,
            title,
            group,
            accelerator: None,
        }
    }

    fn accelerator(mut self, key: char) -> Self {
        self.accelerator = Some(key);
        self
    }

    pub fn is_active(&self, snapshot: &FormatSnapshot) -> bool {
        snapshot.is_active(self.command.capability)
    }

    /// Tooltip text, including the platform's shortcut when there is one.
    pub fn tooltip(&self, is_mac: bool) -> String {
        match self.accelerator {
            Some(key) if is_mac => format!("{} (⌘{})", self.title, key.to_ascii_uppercase()),
            Some(key) => format!("{} (Ctrl+{})", self.title, key.to_ascii_uppercase()),
            None => self.title.to_string(),
        }
    }
}

/// One rendered toolbar slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarItem<'a> {
    Button {
        /// Index into [`Toolbar::buttons`], passed back to `activate`.
        index: usize,
        button: &'a ToolbarButton,
        active: bool,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    buttons: Vec<ToolbarButton>,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::standard()
    }
}

impl Toolbar {
    /// The article editor's button set.
    pub fn standard() -> Self {
        use Capability::*;
        use ToolbarGroup::*;

        Self {
            buttons: vec![
                ToolbarButton::new(Bold, "B", "Bold", Format).accelerator('b'),
                ToolbarButton::new(Italic, "I", "Italic", Format).accelerator('i'),
                ToolbarButton::new(Underline, "U", "Underline", Format).accelerator('u'),
                ToolbarButton::new(StrikeThrough, "S", "Strikethrough", Format),
                ToolbarButton::new(AlignLeft, "⇤", "Align Left", Alignment),
                ToolbarButton::new(AlignCenter, "↔", "Align Center", Alignment),
                ToolbarButton::new(AlignRight, "⇥", "Align Right", Alignment),
                ToolbarButton::new(OrderedList, "1.", "Numbered List", List),
                ToolbarButton::new(UnorderedList, "•", "Bullet List", List),
            ],
        }
    }

    pub fn buttons(&self) -> &[ToolbarButton] {
        &self.buttons
    }

    /// Render buttons with their pressed state, separators between groups.
    pub fn render(&self, snapshot: &FormatSnapshot) -> Vec<ToolbarItem<'_>> {
        let mut items = Vec::with_capacity(self.buttons.len() + 2);
        let mut last_group = None;
        for (index, button) in self.buttons.iter().enumerate() {
            if last_group.is_some_and(|group| group != button.group) {
                items.push(ToolbarItem::Separator);
            }
            last_group = Some(button.group);
            items.push(ToolbarItem::Button {
                index,
                button,
                active: button.is_active(snapshot),
            });
        }
        items
    }

    /// Command bound to the button at `index`.
    pub fn activate(&self, index: usize) -> Option<&Command> {
        self.buttons.get(index).map(|button| &button.command)
    }

    /// Command bound to a keyboard accelerator, if `combo` is one.
    pub fn command_for_key(&self, combo: &KeyCombo, is_mac: bool) -> Option<&Command> {
        if combo.modifiers != Modifiers::primary(is_mac) {
            return None;
        }
        let Key::Character(ref s) = combo.key else {
            return None;
        };
        let mut chars = s.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let ch = ch.to_ascii_lowercase();
        self.buttons
            .iter()
            .find(|button| button.accelerator == Some(ch))
            .map(|button| &button.command)
    }
}
