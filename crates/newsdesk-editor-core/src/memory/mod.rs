//! In-process host surface.
//!
//! `MemorySurface` behaves like a `contenteditable` region that understands
//! the editor's command set: inline marks, block alignment and lists, a
//! selection, pending "typing" marks at a collapsed caret, and markup in/out.
//! Headless hosts (server-side previews, tests) use it where no browser is
//! available. It can also be told to ignore commands or fail queries, to
//! reproduce host quirks.

mod html;

use std::collections::HashSet;

use crate::capability::Capability;
use crate::platform::{ClipboardPlatform, EditSurface, PlatformError};
use crate::types::Selection;

/// Inline formatting carried by each character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

impl Marks {
    fn slot(&mut self, capability: Capability) -> Option<&mut bool> {
        match capability {
            Capability::Bold => Some(&mut self.bold),
            Capability::Italic => Some(&mut self.italic),
            Capability::Underline => Some(&mut self.underline),
            Capability::StrikeThrough => Some(&mut self.strike),
            _ => None,
        }
    }

    fn get(mut self, capability: Capability) -> bool {
        self.slot(capability).is_some_and(|v| *v)
    }

    fn set(&mut self, capability: Capability, value: bool) {
        if let Some(slot) = self.slot(capability) {
            *slot = value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StyledChar {
    pub ch: char,
    pub marks: Marks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Block {
    pub align: Align,
    pub list: Option<ListKind>,
    pub chars: Vec<StyledChar>,
}

impl Block {
    fn split_off(&mut self, col: usize) -> Block {
        Block {
            align: self.align,
            list: self.list,
            chars: self.chars.split_off(col),
        }
    }
}

/// In-memory [`EditSurface`].
///
/// Offsets are character offsets over the plain text, with one offset between
/// consecutive blocks (like a `\n`).
#[derive(Debug, Clone)]
pub struct MemorySurface {
    blocks: Vec<Block>,
    selection: Selection,
    /// Marks to apply to the next insertion at a collapsed caret.
    typing_marks: Option<Marks>,
    focused: bool,
    ignored: HashSet<Capability>,
    failing_queries: HashSet<Capability>,
    set_content_calls: usize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// An empty, unfocused surface.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default()],
            selection: Selection::default(),
            typing_marks: None,
            focused: false,
            ignored: HashSet::new(),
            failing_queries: HashSet::new(),
            set_content_calls: 0,
        }
    }

    /// A surface preloaded with `markup`, caret at the end.
    pub fn from_markup(markup: &str) -> Self {
        let mut surface = Self::new();
        surface.load(markup);
        surface
    }

    /// Content as plain text, blocks separated by `\n`.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.chars.iter().map(|c| c.ch).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len_chars(&self) -> usize {
        let chars: usize = self.blocks.iter().map(|b| b.chars.len()).sum();
        chars + self.blocks.len() - 1
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the selection. Offsets past the end are clamped.
    pub fn select(&mut self, anchor: usize, head: usize) {
        self.selection = Selection::new(anchor, head).clamp(self.len_chars());
        self.typing_marks = None;
    }

    pub fn select_all(&mut self) {
        self.select(0, self.len_chars());
    }

    /// Simulate the user typing at the selection. `\n` starts a new block.
    pub fn type_text(&mut self, text: &str) {
        self.insert_text(text);
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Make the host accept `capability` commands without applying them.
    pub fn ignore_command(&mut self, capability: Capability) {
        self.ignored.insert(capability);
    }

    /// Make state queries for `capability` fail.
    pub fn fail_query(&mut self, capability: Capability) {
        self.failing_queries.insert(capability);
    }

    /// How many times the content was replaced wholesale.
    pub fn set_content_calls(&self) -> usize {
        self.set_content_calls
    }

    fn load(&mut self, markup: &str) {
        self.blocks = html::parse(markup);
        let end = self.len_chars();
        self.selection = Selection::collapsed(end);
        self.typing_marks = None;
    }

    /// Block index and column for a document offset.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (i, block) in self.blocks.iter().enumerate() {
            if remaining <= block.chars.len() {
                return (i, remaining);
            }
            remaining -= block.chars.len() + 1;
        }
        let last = self.blocks.len() - 1;
        (last, self.blocks[last].chars.len())
    }

    /// Blocks touched by the current selection.
    fn selected_blocks(&self) -> std::ops::RangeInclusive<usize> {
        let (first, _) = self.locate(self.selection.start());
        let (last, _) = self.locate(self.selection.end());
        first..=last
    }

    /// Characters inside the selection, skipping block boundaries.
    fn selected_chars(&self) -> Vec<(usize, usize)> {
        let (start_block, start_col) = self.locate(self.selection.start());
        let (end_block, end_col) = self.locate(self.selection.end());
        let mut out = Vec::new();
        for bi in start_block..=end_block {
            let len = self.blocks[bi].chars.len();
            let from = if bi == start_block { start_col } else { 0 };
            let to = if bi == end_block { end_col } else { len };
            out.extend((from..to).map(|col| (bi, col)));
        }
        out
    }

    /// Marks a new character at the caret would get.
    fn caret_marks(&self) -> Marks {
        if let Some(marks) = self.typing_marks {
            return marks;
        }
        let (bi, col) = self.locate(self.selection.start());
        let chars = &self.blocks[bi].chars;
        if col > 0 {
            chars[col - 1].marks
        } else {
            chars.first().map(|c| c.marks).unwrap_or_default()
        }
    }

    fn delete_selection(&mut self) {
        let start = self.selection.start();
        let end = self.selection.end();
        if start == end {
            return;
        }
        let (start_block, start_col) = self.locate(start);
        let (end_block, end_col) = self.locate(end);
        if start_block == end_block {
            self.blocks[start_block].chars.drain(start_col..end_col);
        } else {
            let tail = self.blocks[end_block].chars.split_off(end_col);
            self.blocks[start_block].chars.truncate(start_col);
            self.blocks[start_block].chars.extend(tail);
            self.blocks.drain(start_block + 1..=end_block);
        }
        self.selection = Selection::collapsed(start);
    }

    fn insert_text(&mut self, text: &str) {
        let marks = self.caret_marks();
        self.delete_selection();
        let mut offset = self.selection.start();
        for ch in text.chars() {
            let (bi, col) = self.locate(offset);
            if ch == '\n' {
                let rest = self.blocks[bi].split_off(col);
                self.blocks.insert(bi + 1, rest);
            } else {
                self.blocks[bi].chars.insert(col, StyledChar { ch, marks });
            }
            offset += 1;
        }
        self.selection = Selection::collapsed(offset);
        self.typing_marks = None;
    }

    fn toggle_inline(&mut self, capability: Capability) -> bool {
        let targets = self.selected_chars();
        if targets.is_empty() {
            let mut marks = self.caret_marks();
            marks.set(capability, !marks.get(capability));
            self.typing_marks = Some(marks);
            return true;
        }
        let all_set = targets
            .iter()
            .all(|&(bi, col)| self.blocks[bi].chars[col].marks.get(capability));
        for (bi, col) in targets {
            self.blocks[bi].chars[col].marks.set(capability, !all_set);
        }
        true
    }

    fn set_align(&mut self, align: Align) -> bool {
        for bi in self.selected_blocks() {
            self.blocks[bi].align = align;
        }
        true
    }

    fn toggle_list(&mut self, kind: ListKind) -> bool {
        let range = self.selected_blocks();
        let all_in_list = self.blocks[range.clone()]
            .iter()
            .all(|b| b.list == Some(kind));
        let list = if all_in_list { None } else { Some(kind) };
        for bi in range {
            self.blocks[bi].list = list;
        }
        true
    }
}

fn align_of(capability: Capability) -> Option<Align> {
    match capability {
        Capability::AlignLeft => Some(Align::Left),
        Capability::AlignCenter => Some(Align::Center),
        Capability::AlignRight => Some(Align::Right),
        _ => None,
    }
}

fn list_of(capability: Capability) -> Option<ListKind> {
    match capability {
        Capability::OrderedList => Some(ListKind::Ordered),
        Capability::UnorderedList => Some(ListKind::Unordered),
        _ => None,
    }
}

impl EditSurface for MemorySurface {
    fn exec_command(
        &mut self,
        capability: Capability,
        _argument: Option<&str>,
    ) -> Result<bool, PlatformError> {
        if self.ignored.contains(&capability) {
            return Ok(false);
        }
        if capability.is_inline() {
            return Ok(self.toggle_inline(capability));
        }
        if let Some(align) = align_of(capability) {
            return Ok(self.set_align(align));
        }
        if let Some(kind) = list_of(capability) {
            return Ok(self.toggle_list(kind));
        }
        Ok(false)
    }

    fn query_state(&self, capability: Capability) -> Result<bool, PlatformError> {
        if self.failing_queries.contains(&capability) {
            return Err(PlatformError(format!("query for {capability} rejected")));
        }
        if capability.is_inline() {
            let targets = self.selected_chars();
            if targets.is_empty() {
                return Ok(self.caret_marks().get(capability));
            }
            return Ok(targets
                .iter()
                .all(|&(bi, col)| self.blocks[bi].chars[col].marks.get(capability)));
        }
        let (bi, _) = self.locate(self.selection.start());
        let block = &self.blocks[bi];
        if let Some(align) = align_of(capability) {
            return Ok(block.align == align);
        }
        Ok(list_of(capability).is_some_and(|kind| block.list == Some(kind)))
    }

    fn content(&self) -> String {
        html::serialize(&self.blocks)
    }

    fn set_content(&mut self, markup: &str) {
        self.set_content_calls += 1;
        self.load(markup);
    }

    fn insert_plain_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.insert_text(text);
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

/// In-memory clipboard payload with separate plain and rich flavors.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    html: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Rich flavor. Present so paste handling can be shown to ignore it.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }
}

impl ClipboardPlatform for MemoryClipboard {
    fn read_text(&self) -> Option<String> {
        self.text.clone()
    }
}
