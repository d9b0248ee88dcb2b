//! Generic containers for the hierarchies in the ID databases
//!
//! `pci.ids` and `usb.ids` both describe vendors and device classes as three
//! level trees (vendor, device, subsystem and class, subclass, interface).
//! They only differ in the width of their IDs, so storage and lookups are
//! implemented once here and the database types are thin named wrappers.

use std::hash::Hash;

use ahash::AHashMap;

use crate::EntryKind;
use crate::Error;
use crate::NotFound;

/// Top level entry, such as a vendor or a class
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry<Id, Child> {
    pub id: Id,
    pub name: String,
    /// Nested entries, in file order
    pub children: Vec<Child>,
}

/// Second level entry, remembers the top level entry it was declared under
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubEntry<Id, ParentId, Child> {
    pub id: Id,
    pub name: String,
    pub parent: ParentId,
    pub children: Vec<Child>,
}

/// Entry without children
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Leaf<Id> {
    pub id: Id,
    pub name: String,
}

/// Key of a subsystem (sub-device) line
///
/// The subsystem vendor can differ from the vendor the device is listed
/// under, so both halves are needed to identify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubsystemId {
    pub vendor: u16,
    pub device: u16,
}

impl From<SubsystemId> for u32 {
    fn from(value: SubsystemId) -> Self {
        (Self::from(value.vendor) << 16) | Self::from(value.device)
    }
}

/// Second level of a three level tree
pub type Branch<C, R, G> = SubEntry<C, R, Leaf<G>>;

/// Top level of a three level tree
pub type Root<R, C, G> = Entry<R, Branch<C, R, G>>;

/// Anything with a numeric ID that can be searched for
pub trait Identified {
    type Id: Copy + Eq + Into<u32>;

    fn id(&self) -> Self::Id;
}

impl<Id: Copy + Eq + Into<u32>, Child> Identified for Entry<Id, Child> {
    type Id = Id;

    fn id(&self) -> Id {
        self.id
    }
}

impl<Id: Copy + Eq + Into<u32>, ParentId, Child> Identified for SubEntry<Id, ParentId, Child> {
    type Id = Id;

    fn id(&self) -> Id {
        self.id
    }
}

impl<Id: Copy + Eq + Into<u32>> Identified for Leaf<Id> {
    type Id = Id;

    fn id(&self) -> Id {
        self.id
    }
}

/// First entry with the given ID
fn find<T: Identified>(items: &[T], id: T::Id) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Search the children of a parent that has already been resolved
fn find_child<T: Identified>(
    items: &[T],
    id: T::Id,
    kind: EntryKind,
    parent_kind: EntryKind,
    parent_id: u32,
) -> Result<&T, Error> {
    if items.is_empty() {
        return Err(NotFound::NoChildren {
            parent_kind,
            parent_id,
            kind,
        }
        .into());
    }
    find(items, id).ok_or_else(|| {
        NotFound::Missing {
            kind,
            id: id.into(),
        }
        .into()
    })
}

/// Index of top level entries, the first occurrence of a duplicate ID wins
fn build_index<T>(items: &[T]) -> AHashMap<T::Id, usize>
where
    T: Identified,
    T::Id: Hash,
{
    let mut index = AHashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        index.entry(item.id()).or_insert(pos);
    }
    index
}

/// Names of the levels, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Levels {
    pub(crate) root: EntryKind,
    pub(crate) child: EntryKind,
    pub(crate) leaf: EntryKind,
}

/// Three level hierarchy (vendor/device/subsystem or class/subclass/interface)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<R: Eq + Hash, C, G> {
    roots: Vec<Root<R, C, G>>,
    index: AHashMap<R, usize>,
    levels: Levels,
}

impl<R, C, G> Tree<R, C, G>
where
    R: Copy + Eq + Hash + Into<u32>,
    C: Copy + Eq + Into<u32>,
    G: Copy + Eq + Into<u32>,
{
    pub(crate) fn new(roots: Vec<Root<R, C, G>>, levels: Levels) -> Self {
        let index = build_index(&roots);
        Self {
            roots,
            index,
            levels,
        }
    }

    /// All top level entries in file order
    pub fn roots(&self) -> &[Root<R, C, G>] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn root(&self, id: R) -> Result<&Root<R, C, G>, Error> {
        self.index
            .get(&id)
            .and_then(|&pos| self.roots.get(pos))
            .ok_or_else(|| {
                NotFound::Missing {
                    kind: self.levels.root,
                    id: id.into(),
                }
                .into()
            })
    }

    pub fn children(&self, root: R) -> Result<&[Branch<C, R, G>], Error> {
        Ok(&self.root(root)?.children)
    }

    pub fn child(&self, root: R, child: C) -> Result<&Branch<C, R, G>, Error> {
        find_child(
            self.children(root)?,
            child,
            self.levels.child,
            self.levels.root,
            root.into(),
        )
    }

    pub fn leaves(&self, root: R, child: C) -> Result<&[Leaf<G>], Error> {
        Ok(&self.child(root, child)?.children)
    }

    pub fn leaf(&self, root: R, child: C, leaf: G) -> Result<&Leaf<G>, Error> {
        find_child(
            self.leaves(root, child)?,
            leaf,
            self.levels.leaf,
            self.levels.child,
            child.into(),
        )
    }

    /// Total number of second and third level entries
    pub(crate) fn descendant_count(&self) -> usize {
        self.roots
            .iter()
            .flat_map(|root| root.children.iter())
            .map(|child| 1 + child.children.len())
            .sum()
    }
}

/// Two level hierarchy (HID usage pages and languages)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups<R: Eq + Hash, C> {
    groups: Vec<Entry<R, Leaf<C>>>,
    index: AHashMap<R, usize>,
    kind: EntryKind,
    member_kind: EntryKind,
}

impl<R, C> Groups<R, C>
where
    R: Copy + Eq + Hash + Into<u32>,
    C: Copy + Eq + Into<u32>,
{
    pub(crate) fn new(groups: Vec<Entry<R, Leaf<C>>>, kind: EntryKind, member_kind: EntryKind) -> Self {
        let index = build_index(&groups);
        Self {
            groups,
            index,
            kind,
            member_kind,
        }
    }

    pub fn groups(&self) -> &[Entry<R, Leaf<C>>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, id: R) -> Result<&Entry<R, Leaf<C>>, Error> {
        self.index
            .get(&id)
            .and_then(|&pos| self.groups.get(pos))
            .ok_or_else(|| {
                NotFound::Missing {
                    kind: self.kind,
                    id: id.into(),
                }
                .into()
            })
    }

    pub fn members(&self, group: R) -> Result<&[Leaf<C>], Error> {
        Ok(&self.group(group)?.children)
    }

    pub fn member(&self, group: R, member: C) -> Result<&Leaf<C>, Error> {
        find_child(
            self.members(group)?,
            member,
            self.member_kind,
            self.kind,
            group.into(),
        )
    }
}

/// Flat list of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<Id> {
    entries: Vec<Leaf<Id>>,
    kind: EntryKind,
}

impl<Id: Copy + Eq + Into<u32>> Table<Id> {
    pub(crate) fn new(entries: Vec<Leaf<Id>>, kind: EntryKind) -> Self {
        Self { entries, kind }
    }

    pub fn entries(&self) -> &[Leaf<Id>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Id) -> Result<&Leaf<Id>, Error> {
        find(&self.entries, id).ok_or_else(|| {
            NotFound::Missing {
                kind: self.kind,
                id: id.into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LEVELS: Levels = Levels {
        root: EntryKind::Vendor,
        child: EntryKind::Device,
        leaf: EntryKind::SubDevice,
    };

    fn leaf<Id>(id: Id, name: &str) -> Leaf<Id> {
        Leaf {
            id,
            name: name.to_owned(),
        }
    }

    fn sample() -> Tree<u16, u16, SubsystemId> {
        Tree::new(
            vec![
                Entry {
                    id: 0x10,
                    name: "First".into(),
                    children: vec![SubEntry {
                        id: 0x1,
                        name: "Dev".into(),
                        parent: 0x10,
                        children: vec![leaf(
                            SubsystemId {
                                vendor: 0x20,
                                device: 0x2,
                            },
                            "Sub",
                        )],
                    }],
                },
                Entry {
                    id: 0x11,
                    name: "Empty".into(),
                    children: vec![],
                },
                Entry {
                    id: 0x10,
                    name: "Shadowed".into(),
                    children: vec![],
                },
            ],
            LEVELS,
        )
    }

    #[test]
    fn test_first_duplicate_wins() {
        let tree = sample();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(0x10).unwrap().name, "First");
    }

    #[test]
    fn test_missing_levels() {
        let tree = sample();
        assert_eq!(
            tree.root(0x99).unwrap_err(),
            Error::NotFound(NotFound::Missing {
                kind: EntryKind::Vendor,
                id: 0x99
            })
        );
        assert_eq!(
            tree.child(0x11, 0x1).unwrap_err(),
            Error::NotFound(NotFound::NoChildren {
                parent_kind: EntryKind::Vendor,
                parent_id: 0x11,
                kind: EntryKind::Device,
            })
        );
        assert_eq!(
            tree.child(0x10, 0x2).unwrap_err(),
            Error::NotFound(NotFound::Missing {
                kind: EntryKind::Device,
                id: 0x2
            })
        );
        assert_eq!(
            tree.leaf(
                0x10,
                0x1,
                SubsystemId {
                    vendor: 0x20,
                    device: 0x3
                }
            )
            .unwrap_err(),
            Error::NotFound(NotFound::Missing {
                kind: EntryKind::SubDevice,
                id: 0x0020_0003
            })
        );
        assert_eq!(tree.descendant_count(), 2);
    }

    #[test]
    fn test_table() {
        let table = Table::new(vec![leaf(1u8, "a"), leaf(2u8, "b")], EntryKind::HidItem);
        assert_eq!(table.get(2).unwrap().name, "b");
        assert!(table.get(3).unwrap_err().is_not_found());
    }

    #[test]
    fn test_groups() {
        let groups = Groups::new(
            vec![Entry {
                id: 0x0409u16,
                name: "English".into(),
                children: vec![leaf(0x01u8, "US")],
            }],
            EntryKind::Language,
            EntryKind::Dialect,
        );
        assert_eq!(groups.member(0x0409, 0x01).unwrap().name, "US");
        assert!(groups.member(0x0409, 0x02).is_err());
        assert!(groups.group(0x0407).is_err());
    }
}
