//! Line based parsing shared by `pci.ids` and `usb.ids`
//!
//! The files are split into sections that follow each other. A section starts
//! at a sentinel line and runs until the sentinel of the next section. Inside
//! a section the nesting level of a line is given by its leading tabs, and the
//! fields are at fixed columns.
//!
//! Lines are parsed one at a time and attached to their parent through a set
//! of accumulators. The accumulators are flushed whenever a line at a higher
//! level starts and once more at the end of the section, so the last entry of
//! a section keeps its children.

use winnow::ModalResult;
use winnow::Parser;
use winnow::combinator::trace;
use winnow::error::StrContext;
use winnow::token::rest;
use winnow::token::take;

use crate::EntryKind;
use crate::ParseError;
use crate::tree::Branch;
use crate::tree::Entry;
use crate::tree::Leaf;
use crate::tree::Levels;
use crate::tree::Root;
use crate::tree::SubEntry;
use crate::tree::SubsystemId;

/// A line that is neither blank nor a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLine<'input> {
    /// 1-based line number in the whole file
    pub(crate) number: usize,
    pub(crate) text: &'input str,
}

/// Split the input into numbered lines, dropping comments and blank lines
pub(crate) fn significant_lines(input: &str) -> Vec<RawLine<'_>> {
    input
        .lines()
        .enumerate()
        .map(|(idx, text)| RawLine {
            number: idx + 1,
            text,
        })
        .filter(|line| !line.text.starts_with('#') && !line.text.trim().is_empty())
        .collect()
}

/// The lines of one section
///
/// Without a start sentinel the section starts at the first line. A missing
/// start sentinel gives an empty section, a missing end sentinel runs to the
/// end of the input. The start line itself is part of the section.
pub(crate) fn section<'a, 'input>(
    lines: &'a [RawLine<'input>],
    start: Option<&str>,
    end: Option<&str>,
) -> &'a [RawLine<'input>] {
    let from = match start {
        None => 0,
        Some(start) => match lines.iter().position(|l| l.text.starts_with(start)) {
            Some(pos) => pos,
            None => return &[],
        },
    };
    let lines = &lines[from..];
    let skip = usize::from(start.is_some());
    let len = end
        .and_then(|end| {
            lines
                .iter()
                .skip(skip)
                .position(|l| l.text.starts_with(end))
                .map(|pos| pos + skip)
        })
        .unwrap_or(lines.len());
    &lines[..len]
}

/// Nesting level, i.e. number of leading tabs
fn depth(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b'\t').count()
}

/// Parser for a single line, producing the ID and the name
pub(crate) type LineParser<T> = for<'i> fn(&mut &'i str) -> ModalResult<(T, &'i str)>;

/// Run a line parser on a complete line
fn parse_line<'input, T>(
    mut parser: LineParser<T>,
    line: &RawLine<'input>,
) -> Result<(T, &'input str), ParseError> {
    parser
        .parse(line.text)
        .map_err(|e| ParseError::from_parse(&e, line))
}

/// How to parse each level of a three level section
pub(crate) struct TreeFormat<R, C, G> {
    pub(crate) root: LineParser<R>,
    pub(crate) child: LineParser<C>,
    pub(crate) leaf: LineParser<G>,
    pub(crate) levels: Levels,
}

/// Build a three level hierarchy from the lines of a section
pub(crate) fn build_tree<R: Copy, C, G>(
    lines: &[RawLine<'_>],
    format: &TreeFormat<R, C, G>,
) -> Result<Vec<Root<R, C, G>>, ParseError> {
    let mut roots: Vec<Root<R, C, G>> = Vec::new();
    let mut children: Vec<Branch<C, R, G>> = Vec::new();
    let mut leaves: Vec<Leaf<G>> = Vec::new();

    for line in lines {
        match depth(line.text) {
            0 => {
                flush_into_last(&mut children, &mut leaves);
                flush_into_last(&mut roots, &mut children);
                let (id, name) = parse_line(format.root, line)?;
                roots.push(Entry {
                    id,
                    name: name.to_owned(),
                    children: Vec::new(),
                });
            }
            1 => {
                let Some(parent) = roots.last().map(|root| root.id) else {
                    return Err(ParseError::orphan(
                        line,
                        format.levels.child,
                        format.levels.root,
                    ));
                };
                flush_into_last(&mut children, &mut leaves);
                let (id, name) = parse_line(format.child, line)?;
                children.push(SubEntry {
                    id,
                    name: name.to_owned(),
                    parent,
                    children: Vec::new(),
                });
            }
            _ => {
                if children.is_empty() {
                    return Err(ParseError::orphan(
                        line,
                        format.levels.leaf,
                        format.levels.child,
                    ));
                }
                let (id, name) = parse_line(format.leaf, line)?;
                leaves.push(Leaf {
                    id,
                    name: name.to_owned(),
                });
            }
        }
    }
    flush_into_last(&mut children, &mut leaves);
    flush_into_last(&mut roots, &mut children);

    Ok(roots)
}

/// Build a two level hierarchy from the lines of a section
pub(crate) fn build_groups<R, C>(
    lines: &[RawLine<'_>],
    group: LineParser<R>,
    member: LineParser<C>,
    kinds: (EntryKind, EntryKind),
) -> Result<Vec<Entry<R, Leaf<C>>>, ParseError> {
    let mut groups: Vec<Entry<R, Leaf<C>>> = Vec::new();
    let mut members: Vec<Leaf<C>> = Vec::new();

    for line in lines {
        if depth(line.text) == 0 {
            flush_into_last(&mut groups, &mut members);
            let (id, name) = parse_line(group, line)?;
            groups.push(Entry {
                id,
                name: name.to_owned(),
                children: Vec::new(),
            });
        } else {
            if groups.is_empty() {
                return Err(ParseError::orphan(line, kinds.1, kinds.0));
            }
            let (id, name) = parse_line(member, line)?;
            members.push(Leaf {
                id,
                name: name.to_owned(),
            });
        }
    }
    flush_into_last(&mut groups, &mut members);

    Ok(groups)
}

/// Build a flat list from the lines of a section
pub(crate) fn build_table<Id>(
    lines: &[RawLine<'_>],
    parser: LineParser<Id>,
) -> Result<Vec<Leaf<Id>>, ParseError> {
    lines
        .iter()
        .map(|line| {
            let (id, name) = parse_line(parser, line)?;
            Ok(Leaf {
                id,
                name: name.to_owned(),
            })
        })
        .collect()
}

/// Something that owns a list of children
trait Parent {
    type Child;

    fn children_mut(&mut self) -> &mut Vec<Self::Child>;
}

impl<Id, Child> Parent for Entry<Id, Child> {
    type Child = Child;

    fn children_mut(&mut self) -> &mut Vec<Child> {
        &mut self.children
    }
}

impl<Id, ParentId, Child> Parent for SubEntry<Id, ParentId, Child> {
    type Child = Child;

    fn children_mut(&mut self) -> &mut Vec<Child> {
        &mut self.children
    }
}

/// Hand the accumulated children to the most recent parent and reset the
/// accumulator
fn flush_into_last<P: Parent>(parents: &mut [P], pending: &mut Vec<P::Child>) {
    if let Some(parent) = parents.last_mut() {
        parent.children_mut().append(pending);
    }
}

// Fixed column field parsers. The separator between the ID and the name is
// always two characters wide, its content is not checked.

fn is_hex(s: &str) -> bool {
    s.bytes().all(|c| c.is_ascii_hexdigit())
}

pub(crate) fn hex1(i: &mut &str) -> ModalResult<u8> {
    trace("hex1", take(1usize).verify(is_hex))
        .try_map(|s| u8::from_str_radix(s, 16))
        .parse_next(i)
}

pub(crate) fn hex2(i: &mut &str) -> ModalResult<u8> {
    trace("hex2", take(2usize).verify(is_hex))
        .try_map(|s| u8::from_str_radix(s, 16))
        .parse_next(i)
}

pub(crate) fn hex3(i: &mut &str) -> ModalResult<u16> {
    trace("hex3", take(3usize).verify(is_hex))
        .try_map(|s| u16::from_str_radix(s, 16))
        .parse_next(i)
}

pub(crate) fn hex4(i: &mut &str) -> ModalResult<u16> {
    trace("hex4", take(4usize).verify(is_hex))
        .try_map(|s| u16::from_str_radix(s, 16))
        .parse_next(i)
}

/// The gap between an ID and the name, exactly two spaces
pub(crate) fn gap(i: &mut &str) -> ModalResult<()> {
    trace("gap", "  ").void().parse_next(i)
}

/// The name, everything after the gap
pub(crate) fn name<'input>(i: &mut &'input str) -> ModalResult<&'input str> {
    trace("name", rest).parse_next(i)
}

/// `vvvv  Vendor name`
pub(crate) fn vendor_line<'i>(i: &mut &'i str) -> ModalResult<(u16, &'i str)> {
    let parser = (hex4.context(StrContext::Label("vendor ID")), gap, name)
        .map(|(id, (), name)| (id, name));
    trace("vendor", parser).parse_next(i)
}

/// `\tdddd  Device name`
pub(crate) fn device_line<'i>(i: &mut &'i str) -> ModalResult<(u16, &'i str)> {
    let parser = ('\t', hex4.context(StrContext::Label("device ID")), gap, name)
        .map(|(_, id, (), name)| (id, name));
    trace("device", parser).parse_next(i)
}

/// `\t\tvvvv dddd  Subsystem name`
pub(crate) fn subsystem_line<'i>(i: &mut &'i str) -> ModalResult<(SubsystemId, &'i str)> {
    let parser = (
        "\t\t",
        hex4.context(StrContext::Label("subsystem vendor ID")),
        ' ',
        hex4.context(StrContext::Label("subsystem device ID")),
        gap,
        name,
    )
        .map(|(_, vendor, _, device, (), name)| (SubsystemId { vendor, device }, name));
    trace("subsystem", parser).parse_next(i)
}

/// `C cc  Class name`
pub(crate) fn class_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    let parser = ("C ", hex2.context(StrContext::Label("class ID")), gap, name)
        .map(|(_, id, (), name)| (id, name));
    trace("class", parser).parse_next(i)
}

/// `\tss  Subclass name`
pub(crate) fn subclass_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    let parser = ('\t', hex2.context(StrContext::Label("subclass ID")), gap, name)
        .map(|(_, id, (), name)| (id, name));
    trace("subclass", parser).parse_next(i)
}

/// `\t\tii  Interface (or protocol) name`
pub(crate) fn interface_line<'i>(i: &mut &'i str) -> ModalResult<(u8, &'i str)> {
    let parser = (
        "\t\t",
        hex2.context(StrContext::Label("interface ID")),
        gap,
        name,
    )
        .map(|(_, id, (), name)| (id, name));
    trace("interface", parser).parse_next(i)
}
