use std::collections::{HashMap, HashSet};

use tilewalk_core::{Direction, Point, TileMap};

use crate::node::{Frontier, Node, OpenList};
use crate::result::{Outcome, SearchResult};
use crate::{CARDINAL_COST, DIAGONAL_COST};

/// Reusable best-first route searcher.
///
/// The arena, open list, open index and closed set are cleared, not freed,
/// between searches.
#[derive(Debug)]
pub struct Searcher {
    nodes: Vec<Node>,
    open: OpenList,
    /// Position -> arena index, for nodes currently open.
    open_at: HashMap<Point, usize>,
    closed: HashSet<Point>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Frontier::default())
    }
}

impl Searcher {
    pub fn new(frontier: Frontier) -> Self {
        Self {
            nodes: Vec::new(),
            open: OpenList::new(frontier),
            open_at: HashMap::new(),
            closed: HashSet::new(),
        }
    }

    pub fn frontier(&self) -> Frontier {
        self.open.frontier()
    }

    /// Switch open-list strategy. Takes effect from the next search.
    pub fn set_frontier(&mut self, frontier: Frontier) {
        if frontier != self.frontier() {
            self.open = OpenList::new(frontier);
        }
    }

    /// Search for a route from `start` to `goal`.
    ///
    /// Neighbours are evaluated in keypad order; with `diagonal` off only
    /// the four cardinal directions are tried. At most `max_expansions`
    /// nodes are expanded. When the goal is not reached the route leads to
    /// the cell with the smallest distance estimate seen during the search.
    pub fn search<M: TileMap + ?Sized>(
        &mut self,
        map: &M,
        start: Point,
        goal: Point,
        diagonal: bool,
        max_expansions: usize,
    ) -> SearchResult {
        if start == goal {
            return SearchResult {
                path: Vec::new(),
                outcome: Outcome::Arrived,
                expansions: 0,
            };
        }

        self.nodes.clear();
        self.open.clear();
        self.open_at.clear();
        self.closed.clear();

        let start_h = map.distance(start, goal);
        self.insert(Node {
            pos: start,
            parent: None,
            g: 0.0,
            f: start_h,
            open: true,
        });

        let dirs: &[Direction] = if diagonal {
            &Direction::ALL
        } else {
            &Direction::CARDINAL
        };

        let mut best = 0;
        let mut best_h = start_h;
        let mut expansions = 0;

        let outcome = loop {
            let Some(ci) = self.open.pop(&self.nodes) else {
                break Outcome::Approximate;
            };
            self.nodes[ci].open = false;
            let current = self.nodes[ci];
            self.open_at.remove(&current.pos);
            self.closed.insert(current.pos);

            if current.pos == goal {
                best = ci;
                break Outcome::Arrived;
            }
            if expansions >= max_expansions {
                break Outcome::LimitExceeded;
            }
            expansions += 1;

            for &dir in dirs {
                let np = map.step(current.pos, dir);
                if self.closed.contains(&np) || !map.can_step(current.pos, dir) {
                    continue;
                }

                let step = if dir.is_diagonal() {
                    DIAGONAL_COST
                } else {
                    CARDINAL_COST
                };
                let g = current.g + step;
                let h = map.distance(np, goal);

                let existing = self.open_at.get(&np).copied();
                let ni = match existing {
                    Some(ni) => {
                        let n = &mut self.nodes[ni];
                        if g >= n.g {
                            continue;
                        }
                        n.parent = Some(ci);
                        n.g = g;
                        n.f = g + h;
                        self.open.decrease(ni, n.f);
                        ni
                    }
                    None => self.insert(Node {
                        pos: np,
                        parent: Some(ci),
                        g,
                        f: g + h,
                        open: true,
                    }),
                };

                if h < best_h {
                    best = ni;
                    best_h = h;
                }
            }
        };

        SearchResult {
            path: self.trace(best),
            outcome,
            expansions,
        }
    }

    fn insert(&mut self, node: Node) -> usize {
        let idx = self.nodes.len();
        self.open_at.insert(node.pos, idx);
        self.open.push(idx, node.f);
        self.nodes.push(node);
        idx
    }

    /// Waypoints from just after the start to `end`. A route ending on the
    /// start node itself is returned as that single cell.
    fn trace(&self, end: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ni = end;
        while let Some(parent) = self.nodes[ni].parent {
            path.push(self.nodes[ni].pos);
            ni = parent;
        }
        if path.is_empty() {
            path.push(self.nodes[end].pos);
        }
        path.reverse();
        path
    }
}
