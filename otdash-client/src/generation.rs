use std::cell::Cell;
use std::rc::Rc;

/// Guards a page against applying a response that a newer fetch has superseded.
///
/// Call [`begin`](Self::begin) before each fetch and apply the result only while
/// [`is_current`](Self::is_current) still holds for its ticket.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Rc<Cell<u64>>,
}

/// Identifies one fetch started through a [`RequestGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> GenerationTicket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        GenerationTicket(next)
    }

    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.current.get() == ticket.0
    }

    /// Drop every outstanding ticket, e.g. when the page unmounts.
    pub fn invalidate(&self) {
        self.begin();
    }
}

impl PartialEq for RequestGeneration {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.current, &other.current)
    }
}
