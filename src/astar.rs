//! A generic A* search over any hashable node type. Unlike
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! it never re-opens a finalized node, keeps one node per key (cheaper routes to an open node
//! update it in place) and reports every finalized node in the order it was finalized.
use fxhash::{FxBuildHasher, FxHashMap};
use indexmap::IndexMap;
use log::{debug, trace, warn};
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Identity of a [SearchNode]: its index in the node arena of a single search. Identities are
/// handed out in discovery order, starting at 0 for the start node.
pub type NodeId = usize;

/// State of one node during a single search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode<N, C> {
    pub node: N,
    pub id: NodeId,
    /// The node through which the cheapest known route arrives. [None] for the start.
    pub parent: Option<NodeId>,
    pub g: C,
    /// Fixed when the node is created.
    pub h: C,
    pub f: C,
}

impl<N, C: Zero + Copy> SearchNode<N, C> {
    fn new(node: N, id: NodeId, parent: Option<NodeId>, g: C, h: C) -> Self {
        SearchNode {
            node,
            id,
            parent,
            g,
            h,
            f: g + h,
        }
    }
}

/// Result of a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<N, C> {
    /// Nodes from start to goal, both inclusive.
    pub path: Vec<N>,
    /// Every finalized node, in the order it was finalized. Ends with the goal.
    pub checked: Vec<N>,
    /// Accumulated cost of the goal.
    pub cost: C,
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    id: NodeId,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.id == other.id
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the earliest discovered node. Open nodes are
        // never reordered, so this picks the first minimum of a left-to-right scan over the
        // open set in discovery order.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.id.cmp(&self.id),
            s => s,
        }
    }
}

/// The open set. A binary heap orders the candidates while a map from key to identity answers
/// "is this node open" without scanning.
struct Frontier<N, C> {
    heap: BinaryHeap<SmallestCostHolder<C>>,
    open: FxHashMap<N, NodeId>,
}

impl<N: Eq + Hash + Clone, C: Ord + Copy> Frontier<N, C> {
    fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            open: FxHashMap::default(),
        }
    }
    fn insert(&mut self, node: &SearchNode<N, C>) {
        self.open.insert(node.node.clone(), node.id);
        self.reprioritize(node);
    }
    fn get(&self, node: &N) -> Option<NodeId> {
        self.open.get(node).copied()
    }
    /// Queues the node under its current f-cost. The entry for its old f-cost stays in the
    /// heap and is skipped when popped.
    fn reprioritize(&mut self, node: &SearchNode<N, C>) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: node.f,
            id: node.id,
        });
    }
    /// Removes and returns the open node with the smallest f-cost.
    fn pop(&mut self, arena: &[SearchNode<N, C>]) -> Option<NodeId> {
        while let Some(SmallestCostHolder { estimated_cost, id }) = self.heap.pop() {
            let node = &arena[id];
            // Stale entry, the node was found again more cheaply.
            if estimated_cost != node.f {
                continue;
            }
            if self.open.remove(&node.node).is_some() {
                return Some(id);
            }
        }
        None
    }
}

fn reverse_path<N: Clone, C>(arena: &[SearchNode<N, C>], goal: NodeId) -> Vec<N> {
    let mut path: Vec<N> = std::iter::successors(Some(goal), |&id| arena[id].parent)
        .map(|id| arena[id].node.clone())
        .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `success` holds for a finalized node.
///
/// `successors` yields the reachable neighbours of a node with their move cost, in the order
/// they should be discovered. `heuristic` must not overestimate the remaining cost, as
/// finalized nodes are never re-opened. When `max_expansions` is set, the search gives up once
/// that many nodes have been finalized without reaching the goal.
///
/// Returns [None] if the goal is unreachable or the expansion limit was hit.
pub fn astar_closed<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    max_expansions: Option<usize>,
) -> Option<SearchOutcome<N, C>>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut arena: Vec<SearchNode<N, C>> = Vec::new();
    let mut frontier: Frontier<N, C> = Frontier::new();
    let mut visited: FxIndexMap<N, NodeId> = FxIndexMap::default();

    let h = heuristic(start);
    arena.push(SearchNode::new(start.clone(), 0, None, Zero::zero(), h));
    frontier.insert(&arena[0]);

    while let Some(id) = frontier.pop(&arena) {
        let node = arena[id].node.clone();
        let cost = arena[id].g;
        visited.insert(node.clone(), id);
        trace!("Finalized node {} ({} open)", id, frontier.open.len());

        if success(&node) {
            return Some(SearchOutcome {
                path: reverse_path(&arena, id),
                checked: visited.into_keys().collect(),
                cost,
            });
        }
        if let Some(limit) = max_expansions {
            if visited.len() >= limit {
                warn!("Search abandoned after {} expansions", visited.len());
                return None;
            }
        }

        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            if visited.contains_key(&successor) {
                continue;
            }
            match frontier.get(&successor) {
                Some(open_id) => {
                    let open = &mut arena[open_id];
                    if new_cost < open.g {
                        open.parent = Some(id);
                        open.g = new_cost;
                        open.f = new_cost + open.h;
                        frontier.reprioritize(open);
                    }
                }
                None => {
                    let h = heuristic(&successor);
                    let new_id = arena.len();
                    arena.push(SearchNode::new(successor, new_id, Some(id), new_cost, h));
                    frontier.insert(&arena[new_id]);
                }
            }
        }
    }
    debug!(
        "Open set exhausted after {} expansions, no path",
        visited.len()
    );
    None
}
