use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tilewalk_core::Point;

/// A search node. Nodes live in the searcher's arena and refer to their
/// parent by arena index.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) pos: Point,
    pub(crate) parent: Option<usize>,
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) open: bool,
}

/// How the open list picks the next node to expand.
///
/// Both strategies select the minimum `f` and break ties in favour of the
/// node that entered the open list first, so they produce identical
/// searches. `Scan` walks the whole list on every pick; `Heap` keeps a
/// binary heap with lazy deletion and scales better on large searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Frontier {
    #[default]
    Scan,
    Heap,
}

/// Heap entry ordered by `f`, then by arena index (insertion order).
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then oldest node.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenRef {}

/// Open list in one of the two [`Frontier`] layouts.
#[derive(Debug)]
pub(crate) enum OpenList {
    /// Arena indices in insertion order; removal keeps the order.
    Scan(Vec<usize>),
    /// May hold stale entries for nodes that were relaxed or closed.
    Heap(BinaryHeap<OpenRef>),
}

impl OpenList {
    pub(crate) fn new(frontier: Frontier) -> Self {
        match frontier {
            Frontier::Scan => Self::Scan(Vec::new()),
            Frontier::Heap => Self::Heap(BinaryHeap::new()),
        }
    }

    pub(crate) fn frontier(&self) -> Frontier {
        match self {
            Self::Scan(_) => Frontier::Scan,
            Self::Heap(_) => Frontier::Heap,
        }
    }

    pub(crate) fn clear(&mut self) {
        match self {
            Self::Scan(list) => list.clear(),
            Self::Heap(heap) => heap.clear(),
        }
    }

    /// Add a node that was just inserted into the arena.
    pub(crate) fn push(&mut self, idx: usize, f: f64) {
        match self {
            Self::Scan(list) => list.push(idx),
            Self::Heap(heap) => heap.push(OpenRef { idx, f }),
        }
    }

    /// Record that an open node's `f` dropped to `f`.
    pub(crate) fn decrease(&mut self, idx: usize, f: f64) {
        match self {
            // The scan reads f from the arena and keeps the node's slot.
            Self::Scan(_) => {}
            Self::Heap(heap) => heap.push(OpenRef { idx, f }),
        }
    }

    /// Remove and return the open node with the smallest `f`, earliest
    /// inserted on ties.
    pub(crate) fn pop(&mut self, nodes: &[Node]) -> Option<usize> {
        match self {
            Self::Scan(list) => {
                let mut best = 0;
                for (i, &idx) in list.iter().enumerate().skip(1) {
                    if nodes[idx].f < nodes[list[best]].f {
                        best = i;
                    }
                }
                if list.is_empty() {
                    None
                } else {
                    Some(list.remove(best))
                }
            }
            Self::Heap(heap) => {
                while let Some(entry) = heap.pop() {
                    let n = &nodes[entry.idx];
                    // Skip entries superseded by a relaxation or a close.
                    if n.open && n.f == entry.f {
                        return Some(entry.idx);
                    }
                }
                None
            }
        }
    }
}
