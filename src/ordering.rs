// vim: tw=80
//! Call-order bookkeeping for ordered expectations.
//!
//! Order numbers are handed out monotonically at declaration time.  A group
//! tag claims a number on first use and every later member of the group
//! shares it, so calls within a group may interleave freely while the group
//! as a whole holds one position in the sequence.  At call time the manager
//! keeps a high-water mark: dispatching an expectation whose number is below
//! the mark is an out-of-order failure.
//!
//! Every mock owns one manager; mocks created together in a
//! [`use_mocks`](crate::use_mocks) scope additionally share a second manager
//! that backs `globally()` ordering, keeping per-mock and cross-mock
//! watermarks independent.

use std::collections::HashMap;
use std::fmt::{self, Display};

/// Names one shared position in a call sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupTag {
    Number(u64),
    Name(String),
}

impl From<u64> for GroupTag {
    fn from(n: u64) -> Self {
        GroupTag::Number(n)
    }
}

impl From<&str> for GroupTag {
    fn from(s: &str) -> Self {
        GroupTag::Name(s.to_owned())
    }
}

impl From<String> for GroupTag {
    fn from(s: String) -> Self {
        GroupTag::Name(s)
    }
}

impl Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GroupTag::Number(n) => write!(f, "{n}"),
            GroupTag::Name(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Default)]
pub(crate) struct OrderingManager {
    next_order: usize,
    groups: HashMap<GroupTag, usize>,
    current: usize,
}

impl OrderingManager {
    /// Allocate the order number for a newly declared expectation.  An
    /// ungrouped expectation gets a fresh number; a grouped one gets its
    /// group's number, claimed on first use.
    pub fn assign(&mut self, tag: Option<GroupTag>) -> usize {
        match tag {
            None => self.allocate(),
            Some(tag) => {
                if let Some(&n) = self.groups.get(&tag) {
                    n
                } else {
                    let n = self.allocate();
                    self.groups.insert(tag, n);
                    n
                }
            }
        }
    }

    fn allocate(&mut self) -> usize {
        self.next_order += 1;
        self.next_order
    }

    /// Check a dispatch against the watermark and advance it.
    pub fn validate(&mut self, order: usize) -> Result<(), ()> {
        if order < self.current {
            return Err(());
        }
        self.current = order;
        Ok(())
    }
}
