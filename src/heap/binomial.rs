//! Arena-backed binomial heap.

use crate::dispatching::is_higher_priority;
use crate::models::Process;

type NodeId = usize;

#[derive(Debug, Clone)]
struct HeapNode {
    process: Process,
    /// Number of children.
    degree: usize,
    /// First (highest-degree) child.
    child: Option<NodeId>,
    /// Next node in the root list or in the parent's child list.
    sibling: Option<NodeId>,
    /// Back-reference, only read when checking structure.
    parent: Option<NodeId>,
}

/// Binomial heap of processes ordered by the dispatch tie-break rule.
///
/// The root list is kept in strictly increasing degree order with at most
/// one tree per degree. Freed node slots are reused by later inserts.
///
/// # Example
/// ```
/// use u_quantum::heap::BinomialHeap;
/// use u_quantum::models::{JobSpec, Process};
///
/// let mut heap = BinomialHeap::new();
/// heap.insert(Process::new(0, &JobSpec::new("long", 8, 0)));
/// heap.insert(Process::new(1, &JobSpec::new("short", 3, 0)));
///
/// assert_eq!(heap.extract_best().map(|p| p.name), Some("short".to_string()));
/// assert_eq!(heap.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinomialHeap {
    nodes: Vec<HeapNode>,
    free: Vec<NodeId>,
    head: Option<NodeId>,
    len: usize,
}

impl BinomialHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the heap holds no processes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of queued processes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts a process as a singleton tree and unions it in.
    pub fn insert(&mut self, process: Process) {
        let id = self.alloc(process);
        self.len += 1;
        self.union(Some(id));
    }

    /// Removes and returns the highest-priority process.
    ///
    /// Returns `None` when the heap is empty.
    pub fn extract_best(&mut self) -> Option<Process> {
        let (best, best_prev) = self.find_best()?;

        // Detach from the root list
        let after = self.nodes[best].sibling;
        match best_prev {
            None => self.head = after,
            Some(prev) => self.nodes[prev].sibling = after,
        }

        // Children are linked highest degree first; reverse into a root list
        let mut child = self.nodes[best].child;
        let mut reversed = None;
        while let Some(c) = child {
            let next = self.nodes[c].sibling;
            self.nodes[c].sibling = reversed;
            self.nodes[c].parent = None;
            reversed = Some(c);
            child = next;
        }
        self.union(reversed);

        self.len -= 1;
        Some(self.release(best))
    }

    /// The process `extract_best` would return, without removing it.
    pub fn peek_best(&self) -> Option<&Process> {
        self.find_best().map(|(best, _)| &self.nodes[best].process)
    }

    /// Copies of all queued processes, in no guaranteed order.
    ///
    /// Walks each tree child-first, then siblings.
    pub fn snapshot(&self) -> Vec<Process> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.head.into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            out.push(node.process.clone());
            if let Some(sibling) = node.sibling {
                stack.push(sibling);
            }
            if let Some(child) = node.child {
                stack.push(child);
            }
        }

        out
    }

    /// Degrees of the root list, head first.
    pub fn root_degrees(&self) -> Vec<usize> {
        let mut degrees = Vec::new();
        let mut cur = self.head;
        while let Some(id) = cur {
            degrees.push(self.nodes[id].degree);
            cur = self.nodes[id].sibling;
        }
        degrees
    }

    /// Verifies the binomial-heap structure.
    ///
    /// Checks strictly increasing root degrees, child degrees `d-1..0`
    /// under every node of degree `d`, parent back-references, heap order
    /// under the tie-break rule, and the node count.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut counted = 0;
        let mut prev_degree: Option<usize> = None;
        let mut root = self.head;

        while let Some(id) = root {
            let node = &self.nodes[id];
            if node.parent.is_some() {
                return Err(format!("root {} has a parent", node.process.name));
            }
            if let Some(prev) = prev_degree {
                if node.degree <= prev {
                    return Err(format!(
                        "root degrees not strictly increasing: {} after {}",
                        node.degree, prev
                    ));
                }
            }
            prev_degree = Some(node.degree);
            counted += self.check_tree(id)?;
            root = node.sibling;
        }

        if counted != self.len {
            return Err(format!("found {} nodes, expected {}", counted, self.len));
        }
        Ok(())
    }

    fn check_tree(&self, root: NodeId) -> Result<usize, String> {
        let mut counted = 0;
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            counted += 1;
            let node = &self.nodes[id];
            let mut expected = node.degree;
            let mut child = node.child;

            while let Some(c) = child {
                let child_node = &self.nodes[c];
                if expected == 0 {
                    return Err(format!(
                        "{} has more than {} children",
                        node.process.name, node.degree
                    ));
                }
                expected -= 1;
                if child_node.degree != expected {
                    return Err(format!(
                        "child {} of {} has degree {}, expected {}",
                        child_node.process.name, node.process.name, child_node.degree, expected
                    ));
                }
                if child_node.parent != Some(id) {
                    return Err(format!(
                        "child {} does not point back to {}",
                        child_node.process.name, node.process.name
                    ));
                }
                if is_higher_priority(&child_node.process, &node.process) {
                    return Err(format!(
                        "child {} outranks parent {}",
                        child_node.process.name, node.process.name
                    ));
                }
                stack.push(c);
                child = child_node.sibling;
            }

            if expected != 0 {
                return Err(format!(
                    "{} has degree {} but fewer children",
                    node.process.name, node.degree
                ));
            }
        }

        Ok(counted)
    }

    /// Best root and its predecessor in the root list.
    fn find_best(&self) -> Option<(NodeId, Option<NodeId>)> {
        let head = self.head?;
        let mut best = head;
        let mut best_prev = None;
        let mut prev = head;
        let mut cur = self.nodes[head].sibling;

        while let Some(id) = cur {
            if is_higher_priority(&self.nodes[id].process, &self.nodes[best].process) {
                best = id;
                best_prev = Some(prev);
            }
            prev = id;
            cur = self.nodes[id].sibling;
        }

        Some((best, best_prev))
    }

    /// Unions a detached root list into this heap.
    fn union(&mut self, other: Option<NodeId>) {
        let merged = self.merge_roots(self.head, other);
        self.head = self.coalesce(merged);
    }

    /// Merges two root lists by non-decreasing degree; `a` wins ties.
    fn merge_roots(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        let (mut a, mut b) = (a, b);
        let head = match (a, b) {
            (None, _) => return b,
            (_, None) => return a,
            (Some(x), Some(y)) => {
                if self.nodes[x].degree <= self.nodes[y].degree {
                    a = self.nodes[x].sibling;
                    x
                } else {
                    b = self.nodes[y].sibling;
                    y
                }
            }
        };

        let mut tail = head;
        while let (Some(x), Some(y)) = (a, b) {
            let next = if self.nodes[x].degree <= self.nodes[y].degree {
                a = self.nodes[x].sibling;
                x
            } else {
                b = self.nodes[y].sibling;
                y
            };
            self.nodes[tail].sibling = Some(next);
            tail = next;
        }
        self.nodes[tail].sibling = a.or(b);

        Some(head)
    }

    /// Links equal-degree trees until at most one tree per degree remains.
    fn coalesce(&mut self, head: Option<NodeId>) -> Option<NodeId> {
        let mut head = head?;
        let mut prev: Option<NodeId> = None;
        let mut cur = head;
        let mut next = self.nodes[cur].sibling;

        while let Some(nx) = next {
            let cur_degree = self.nodes[cur].degree;
            let after = self.nodes[nx].sibling;
            let three_in_a_row = after.is_some_and(|s| self.nodes[s].degree == cur_degree);

            if cur_degree != self.nodes[nx].degree || three_in_a_row {
                prev = Some(cur);
                cur = nx;
            } else if is_higher_priority(&self.nodes[cur].process, &self.nodes[nx].process) {
                self.nodes[cur].sibling = after;
                self.link(nx, cur);
            } else {
                match prev {
                    None => head = nx,
                    Some(p) => self.nodes[p].sibling = Some(nx),
                }
                self.link(cur, nx);
                cur = nx;
            }
            next = self.nodes[cur].sibling;
        }

        Some(head)
    }

    /// Makes `child` the first child of `parent`.
    fn link(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[child].sibling = self.nodes[parent].child;
        self.nodes[parent].child = Some(child);
        self.nodes[parent].degree += 1;
    }

    fn alloc(&mut self, process: Process) -> NodeId {
        let node = HeapNode {
            process,
            degree: 0,
            child: None,
            sibling: None,
            parent: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Process {
        let process = self.nodes[id].process.clone();
        if self.len == 0 {
            self.nodes.clear();
            self.free.clear();
        } else {
            let node = &mut self.nodes[id];
            node.child = None;
            node.sibling = None;
            node.parent = None;
            node.degree = 0;
            self.free.push(id);
        }
        process
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobSpec, Ticks};
    use proptest::prelude::*;

    fn proc(id: usize, exec: Ticks, arrival: Ticks) -> Process {
        Process::new(id, &JobSpec::new(format!("P{}", id + 1), exec, arrival))
    }

    fn drain(heap: &mut BinomialHeap) -> Vec<Process> {
        let mut out = Vec::new();
        while let Some(p) = heap.extract_best() {
            heap.check_invariants().unwrap();
            out.push(p);
        }
        out
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = BinomialHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(heap.extract_best().is_none());
        assert!(heap.peek_best().is_none());
        assert!(heap.snapshot().is_empty());
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_extracts_shortest_first() {
        let mut heap = BinomialHeap::new();
        heap.insert(proc(0, 5, 0));
        heap.insert(proc(1, 3, 1));
        heap.insert(proc(2, 8, 2));

        assert_eq!(heap.peek_best().map(|p| p.id), Some(1));
        let order: Vec<usize> = drain(&mut heap).iter().map(|p| p.id).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_root_degrees_follow_binary_count() {
        let mut heap = BinomialHeap::new();
        for i in 0..13 {
            heap.insert(proc(i, 10 + i as Ticks, 0));
        }
        // 13 = 0b1101
        assert_eq!(heap.root_degrees(), vec![0, 2, 3]);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_equal_length_extracts_by_arrival() {
        let mut heap = BinomialHeap::new();
        let mut late = proc(0, 2, 6);
        late.priority_value = 0.1;
        let mut early = proc(1, 2, 5);
        early.priority_value = 99.0;
        heap.insert(late);
        heap.insert(early);

        let order: Vec<usize> = drain(&mut heap).iter().map(|p| p.id).collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_full_tie_prefers_later_insert() {
        // Identical keys: the union keeps the second tree on top.
        let mut heap = BinomialHeap::new();
        heap.insert(proc(0, 4, 0));
        heap.insert(proc(1, 4, 0));
        heap.insert(proc(2, 4, 0));

        let order: Vec<usize> = drain(&mut heap).iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_snapshot_contains_everything() {
        let mut heap = BinomialHeap::new();
        for i in 0..7 {
            heap.insert(proc(i, (7 - i) as Ticks, i as Ticks));
        }
        let mut ids: Vec<usize> = heap.snapshot().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_slots_reused_after_extract() {
        let mut heap = BinomialHeap::new();
        heap.insert(proc(0, 3, 0));
        heap.insert(proc(1, 4, 0));
        let first = heap.extract_best().unwrap();
        assert_eq!(first.id, 0);
        heap.insert(first);
        assert_eq!(heap.nodes.len(), 2);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_interleaved_operations_keep_structure() {
        let mut heap = BinomialHeap::new();
        let mut next_id = 0;
        for round in 0..20u64 {
            for _ in 0..3 {
                heap.insert(proc(next_id, (round * 7 + next_id as u64) % 11 + 1, round));
                next_id += 1;
            }
            heap.extract_best();
            heap.check_invariants().unwrap();
        }
        assert_eq!(heap.len(), 40);
        assert_eq!(drain(&mut heap).len(), 40);
    }

    proptest! {
        #[test]
        fn prop_drain_is_sorted_and_complete(
            jobs in prop::collection::vec((0u64..20, 0u64..20), 0..64)
        ) {
            let mut heap = BinomialHeap::new();
            for (id, &(exec, arrival)) in jobs.iter().enumerate() {
                heap.insert(proc(id, exec, arrival));
                prop_assert!(heap.check_invariants().is_ok());
            }
            prop_assert_eq!(heap.len(), jobs.len());

            let drained = drain(&mut heap);
            prop_assert_eq!(drained.len(), jobs.len());

            // Fresh processes are keyed by (length, arrival)
            for pair in drained.windows(2) {
                let a = (pair[0].original_execution_time, pair[0].arrival_time);
                let b = (pair[1].original_execution_time, pair[1].arrival_time);
                prop_assert!(a <= b);
            }

            let mut ids: Vec<usize> = drained.iter().map(|p| p.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..jobs.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_drain_respects_priority_values(
            keys in prop::collection::vec((0u32..6, 0u64..4), 0..64)
        ) {
            // Distinct lengths: ordering is by (priority value, arrival)
            let mut heap = BinomialHeap::new();
            for (id, &(value, arrival)) in keys.iter().enumerate() {
                let mut p = proc(id, id as Ticks + 1, arrival);
                p.priority_value = f64::from(value) * 0.5;
                heap.insert(p);
            }

            let drained = drain(&mut heap);
            prop_assert_eq!(drained.len(), keys.len());
            for pair in drained.windows(2) {
                prop_assert!(!is_higher_priority(&pair[1], &pair[0]));
            }
        }

        #[test]
        fn prop_structure_survives_mixed_ops(
            ops in prop::collection::vec(prop::option::of(1u64..30), 1..120)
        ) {
            let mut heap = BinomialHeap::new();
            let mut expected = 0usize;
            for (id, op) in ops.into_iter().enumerate() {
                match op {
                    Some(exec) => {
                        heap.insert(proc(id, exec, id as Ticks));
                        expected += 1;
                    }
                    None => {
                        if heap.extract_best().is_some() {
                            expected -= 1;
                        }
                    }
                }
                prop_assert!(heap.check_invariants().is_ok());
                prop_assert_eq!(heap.len(), expected);
                prop_assert_eq!(heap.snapshot().len(), expected);
            }
        }
    }
}
