//! Formatting capabilities and the commands that toggle them.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::EditorError;

/// A single toggleable formatting attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    AlignLeft,
    AlignCenter,
    AlignRight,
    OrderedList,
    UnorderedList,
}

impl Capability {
    pub const COUNT: usize = 9;

    /// Every capability, in snapshot order.
    pub const ALL: [Capability; Self::COUNT] = [
        Capability::Bold,
        Capability::Italic,
        Capability::Underline,
        Capability::StrikeThrough,
        Capability::AlignLeft,
        Capability::AlignCenter,
        Capability::AlignRight,
        Capability::OrderedList,
        Capability::UnorderedList,
    ];

    /// Position of this capability in [`Capability::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name used in snapshots and at the JS boundary.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::StrikeThrough => "strikeThrough",
            Self::AlignLeft => "alignLeft",
            Self::AlignCenter => "alignCenter",
            Self::AlignRight => "alignRight",
            Self::OrderedList => "orderedList",
            Self::UnorderedList => "unorderedList",
        }
    }

    /// Command id understood by `contenteditable` hosts
    /// (`document.execCommand` / `queryCommandState`).
    pub const fn command_id(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::StrikeThrough => "strikeThrough",
            Self::AlignLeft => "justifyLeft",
            Self::AlignCenter => "justifyCenter",
            Self::AlignRight => "justifyRight",
            Self::OrderedList => "insertOrderedList",
            Self::UnorderedList => "insertUnorderedList",
        }
    }

    /// Inline style toggles, as opposed to block-level alignment and lists.
    pub const fn is_inline(self) -> bool {
        matches!(
            self,
            Self::Bold | Self::Italic | Self::Underline | Self::StrikeThrough
        )
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = EditorError;

    /// Accepts either the snapshot name or the host command id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|cap| cap.name() == s || cap.command_id() == s)
            .ok_or_else(|| EditorError::UnknownCommand(s.to_string()))
    }
}

/// A formatting instruction bound to a toolbar button or key accelerator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub capability: Capability,
    pub argument: Option<SmolStr>,
}

impl Command {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            argument: None,
        }
    }

    pub fn with_argument(capability: Capability, argument: impl Into<SmolStr>) -> Self {
        Self {
            capability,
            argument: Some(argument.into()),
        }
    }

    /// Parse a command id plus optional argument from the string boundary.
    pub fn parse(command_id: &str, argument: Option<&str>) -> Result<Self, EditorError> {
        let capability = command_id.parse()?;
        Ok(Self {
            capability,
            argument: argument.map(SmolStr::new),
        })
    }

    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }
}

impl From<Capability> for Command {
    fn from(capability: Capability) -> Self {
        Self::new(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, cap) in Capability::ALL.into_iter().enumerate() {
            assert_eq!(cap.index(), i);
        }
    }

    #[test]
    fn test_parse_accepts_both_names() {
        assert_eq!("alignCenter".parse::<Capability>().unwrap(), Capability::AlignCenter);
        assert_eq!("justifyCenter".parse::<Capability>().unwrap(), Capability::AlignCenter);
        assert_eq!("insertOrderedList".parse::<Capability>().unwrap(), Capability::OrderedList);
        assert_eq!("strikeThrough".parse::<Capability>().unwrap(), Capability::StrikeThrough);
    }

    #[test]
    fn test_parse_unknown() {
        match "fontSize".parse::<Capability>() {
            Err(EditorError::UnknownCommand(s)) => assert_eq!(s, "fontSize"),
            other => panic!("Expected UnknownCommand, got {other:?}"),
        }
    }

    #[test]
    fn test_command_parse_keeps_argument() {
        let cmd = Command::parse("bold", Some("x")).unwrap();
        assert_eq!(cmd.capability, Capability::Bold);
        assert_eq!(cmd.argument(), Some("x"));
    }
}
