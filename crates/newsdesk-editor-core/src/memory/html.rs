//! Markup for [`MemorySurface`](super::MemorySurface).
//!
//! Serializes to the same shape browsers produce for the command set, and
//! parses that subset back. Unknown elements are unwrapped to their text.

use markdown_weaver_escape::escape_html_body_text;

use super::{Align, Block, ListKind, Marks, StyledChar};

pub(crate) fn serialize(blocks: &[Block]) -> String {
    if let [only] = blocks
        && *only == Block::default()
    {
        return String::new();
    }

    let mut out = String::new();
    let mut open_list: Option<ListKind> = None;
    for block in blocks {
        if block.list != open_list {
            if let Some(kind) = open_list {
                out.push_str(close_list(kind));
            }
            if let Some(kind) = block.list {
                out.push_str(open_list_tag(kind));
            }
            open_list = block.list;
        }

        let tag = if block.list.is_some() { "li" } else { "p" };
        out.push('<');
        out.push_str(tag);
        match block.align {
            Align::Left => {}
            Align::Center => out.push_str(r#" style="text-align: center;""#),
            Align::Right => out.push_str(r#" style="text-align: right;""#),
        }
        out.push('>');
        if block.chars.is_empty() {
            out.push_str("<br>");
        } else {
            write_runs(&mut out, &block.chars);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    if let Some(kind) = open_list {
        out.push_str(close_list(kind));
    }
    out
}

fn open_list_tag(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Ordered => "<ol>",
        ListKind::Unordered => "<ul>",
    }
}

fn close_list(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Ordered => "</ol>",
        ListKind::Unordered => "</ul>",
    }
}

fn mark_tags(marks: Marks) -> impl DoubleEndedIterator<Item = &'static str> {
    [
        (marks.bold, "b"),
        (marks.italic, "i"),
        (marks.underline, "u"),
        (marks.strike, "strike"),
    ]
    .into_iter()
    .filter_map(|(on, tag)| on.then_some(tag))
}

/// Writes maximal runs of identically marked characters, each run wrapped
/// in its own `<b><i><u><strike>` nest.
fn write_runs(out: &mut String, chars: &[StyledChar]) {
    let mut start = 0;
    while start < chars.len() {
        let marks = chars[start].marks;
        let end = chars[start..]
            .iter()
            .position(|c| c.marks != marks)
            .map_or(chars.len(), |n| start + n);
        let text: String = chars[start..end].iter().map(|c| c.ch).collect();

        for tag in mark_tags(marks) {
            out.push('<');
            out.push_str(tag);
            out.push('>');
        }
        // Writing into a String cannot fail.
        let _ = escape_html_body_text(&mut *out, &text);
        for tag in mark_tags(marks).rev() {
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        start = end;
    }
}

#[derive(Default)]
struct Parser {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<ListKind>,
    bold: usize,
    italic: usize,
    underline: usize,
    strike: usize,
    /// A `<br>` followed non-empty text in the current block.
    pending_break: bool,
}

impl Parser {
    fn marks(&self) -> Marks {
        Marks {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
            strike: self.strike > 0,
        }
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
        self.pending_break = false;
    }

    fn open_block(&mut self, tag: &str, attrs: &str) {
        let align = parse_align(attrs);
        if let Some(current) = self.current.as_mut()
            && current.chars.is_empty()
        {
            // `<li><p>..` and friends: the outer element already made a block.
            if let Some(align) = align {
                current.align = align;
            }
            return;
        }
        self.flush();
        let list = if tag == "li" {
            self.lists.last().copied()
        } else {
            None
        };
        self.current = Some(Block {
            align: align.unwrap_or_default(),
            list,
            chars: Vec::new(),
        });
    }

    fn start_tag(&mut self, tag: &str, attrs: &str) {
        match tag {
            "p" | "div" | "li" => self.open_block(tag, attrs),
            "ul" => {
                self.flush();
                self.lists.push(ListKind::Unordered);
            }
            "ol" => {
                self.flush();
                self.lists.push(ListKind::Ordered);
            }
            "br" => {
                if self.current.as_ref().is_some_and(|b| !b.chars.is_empty()) {
                    self.pending_break = true;
                }
            }
            "b" | "strong" => self.bold += 1,
            "i" | "em" => self.italic += 1,
            "u" => self.underline += 1,
            "s" | "strike" | "del" => self.strike += 1,
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: &str) {
        match tag {
            "p" | "div" | "li" => self.flush(),
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
            }
            "b" | "strong" => self.bold = self.bold.saturating_sub(1),
            "i" | "em" => self.italic = self.italic.saturating_sub(1),
            "u" => self.underline = self.underline.saturating_sub(1),
            "s" | "strike" | "del" => self.strike = self.strike.saturating_sub(1),
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        let text = decode_entities(raw);
        if self.current.is_none() && text.trim().is_empty() {
            return;
        }
        let marks = self.marks();
        for ch in text.chars() {
            let ch = if matches!(ch, '\n' | '\r') { ' ' } else { ch };
            if self.pending_break {
                let (align, list) = self
                    .current
                    .as_ref()
                    .map(|b| (b.align, b.list))
                    .unwrap_or_default();
                self.flush();
                self.current = Some(Block {
                    align,
                    list,
                    chars: Vec::new(),
                });
            }
            let list = self.lists.last().copied();
            self.current
                .get_or_insert_with(|| Block {
                    list,
                    ..Block::default()
                })
                .chars
                .push(StyledChar { ch, marks });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        if self.blocks.is_empty() {
            self.blocks.push(Block::default());
        }
        self.blocks
    }
}

pub(crate) fn parse(markup: &str) -> Vec<Block> {
    let mut parser = Parser::default();
    let mut rest = markup;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }
        if let Some(after) = rest.strip_prefix('<') {
            let Some(end) = after.find('>') else {
                parser.text(rest);
                break;
            };
            let inner = after[..end].trim();
            rest = &after[end + 1..];

            let (closing, inner) = match inner.strip_prefix('/') {
                Some(inner) => (true, inner),
                None => (false, inner),
            };
            let inner = inner.trim_end_matches('/');
            let name_end = inner
                .find(|c: char| c.is_whitespace())
                .unwrap_or(inner.len());
            let tag = inner[..name_end].to_ascii_lowercase();
            if closing {
                parser.end_tag(&tag);
            } else {
                parser.start_tag(&tag, &inner[name_end..]);
            }
            continue;
        }
        let end = rest.find('<').unwrap_or(rest.len());
        parser.text(&rest[..end]);
        rest = &rest[end..];
    }
    parser.finish()
}

fn parse_align(attrs: &str) -> Option<Align> {
    let attrs = attrs.to_ascii_lowercase();
    let at = attrs.find("text-align")?;
    let value = attrs[at + "text-align".len()..]
        .trim_start()
        .strip_prefix(':')?
        .trim_start();
    let value = &value[..value.find([';', '"', '\'']).unwrap_or(value.len())];
    match value.trim() {
        "center" => Some(Align::Center),
        "right" | "end" => Some(Align::Right),
        "left" | "start" => Some(Align::Left),
        _ => None,
    }
}

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
