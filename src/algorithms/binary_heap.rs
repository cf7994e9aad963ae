//! Binary min-heap over node identifiers whose keys live outside the heap.
//!
//! The search owns the `f` scores; every operation borrows them, so a score
//! can be lowered in place and the heap repaired with [`OpenHeap::resort`].
//! A side table maps each node to its slot, which makes finding a member for
//! a decrease-key O(1).

const ABSENT: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct OpenHeap {
    items: Vec<usize>,
    positions: Vec<usize>,
}

impl OpenHeap {
    /// An empty heap able to hold node ids `0..node_count`.
    pub fn with_nodes(node_count: usize) -> Self {
        OpenHeap {
            items: Vec::with_capacity(node_count),
            positions: vec![ABSENT; node_count],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The minimum-score member, if any.
    pub fn peek(&self) -> Option<usize> {
        self.items.first().copied()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.positions[id] != ABSENT
    }

    /// Slot of `id` in the heap array.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        match self.positions[id] {
            ABSENT => None,
            pos => Some(pos),
        }
    }

    /// Members in heap-array order.
    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }

    pub fn push(&mut self, id: usize, scores: &[u32]) {
        debug_assert!(!self.contains(id), "node {id} pushed twice");
        let pos = self.items.len();
        self.items.push(id);
        self.positions[id] = pos;
        self.sift_up(pos, scores);
    }

    /// Remove and return the member with the smallest score. The last member
    /// takes the vacated root slot and sinks back into place.
    pub fn pull_min(&mut self, scores: &[u32]) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        self.positions[min] = ABSENT;
        if let Some(&moved) = self.items.first() {
            self.positions[moved] = 0;
            self.sift_down(0, scores);
        }
        Some(min)
    }

    /// Restore order around slot `pos` after its member's score changed.
    /// A lowered score only ever moves up; sinking is attempted too so a
    /// raised score is also handled.
    pub fn resort(&mut self, pos: usize, scores: &[u32]) {
        let pos = self.sift_up(pos, scores);
        self.sift_down(pos, scores);
    }

    /// Resort the slot holding `id`. Returns `false` if `id` is not queued.
    pub fn decrease(&mut self, id: usize, scores: &[u32]) -> bool {
        match self.position_of(id) {
            Some(pos) => {
                self.resort(pos, scores);
                true
            }
            None => false,
        }
    }

    /// Whether every parent scores no higher than its children and the slot
    /// table agrees with the array.
    pub fn is_valid(&self, scores: &[u32]) -> bool {
        let ordered = (1..self.items.len())
            .all(|i| scores[self.items[(i - 1) / 2]] <= scores[self.items[i]]);
        let indexed = self
            .items
            .iter()
            .enumerate()
            .all(|(pos, &id)| self.positions[id] == pos);
        let members = self.positions.iter().filter(|&&p| p != ABSENT).count();
        ordered && indexed && members == self.items.len()
    }

    fn sift_up(&mut self, mut pos: usize, scores: &[u32]) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if scores[self.items[parent]] > scores[self.items[pos]] {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize, scores: &[u32]) {
        let len = self.items.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && scores[self.items[right]] < scores[self.items[left]] {
                right
            } else {
                left
            };
            if scores[self.items[smaller]] < scores[self.items[pos]] {
                self.swap(pos, smaller);
                pos = smaller;
            } else {
                break;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.positions[self.items[a]] = a;
        self.positions[self.items[b]] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pulls_in_score_order() {
        let scores = [5, 3, 8, 1, 4];
        let mut heap = OpenHeap::with_nodes(scores.len());
        for id in 0..scores.len() {
            heap.push(id, &scores);
        }
        assert_eq!(heap.peek(), Some(3));

        let mut order = Vec::new();
        while let Some(id) = heap.pull_min(&scores) {
            order.push(id);
        }
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
        assert!(heap.is_empty());
    }

    #[test]
    fn pull_from_empty_heap_is_none() {
        let mut heap = OpenHeap::with_nodes(3);
        assert_eq!(heap.pull_min(&[0, 0, 0]), None);
    }

    #[test]
    fn decrease_moves_member_to_front() {
        let mut scores = [10, 20, 30, 40];
        let mut heap = OpenHeap::with_nodes(scores.len());
        for id in 0..scores.len() {
            heap.push(id, &scores);
        }

        scores[3] = 1;
        assert!(heap.decrease(3, &scores));
        assert_eq!(heap.peek(), Some(3));
        assert_eq!(heap.position_of(3), Some(0));
        assert!(heap.is_valid(&scores));
    }

    #[test]
    fn decrease_of_absent_node_is_rejected() {
        let scores = [1, 2];
        let mut heap = OpenHeap::with_nodes(2);
        heap.push(0, &scores);
        assert!(!heap.decrease(1, &scores));
        heap.pull_min(&scores);
        assert!(!heap.contains(0));
        assert_eq!(heap.position_of(0), None);
    }

    #[test]
    fn equal_scores_pop_in_insertion_order_for_small_heaps() {
        let scores = [7, 7, 7];
        let mut heap = OpenHeap::with_nodes(3);
        for id in 0..3 {
            heap.push(id, &scores);
        }
        assert_eq!(heap.pull_min(&scores), Some(0));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u32),
        Pull,
        Decrease(usize, u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..100).prop_map(Op::Push),
            Just(Op::Pull),
            (0usize..64, 0u32..100).prop_map(|(i, by)| Op::Decrease(i, by)),
        ]
    }

    proptest! {
        #[test]
        fn invariant_holds_after_every_operation(ops in prop::collection::vec(op(), 1..200)) {
            let capacity = ops.len();
            let mut scores = vec![0u32; capacity];
            let mut heap = OpenHeap::with_nodes(capacity);
            let mut next_id = 0;

            for op in ops {
                match op {
                    Op::Push(score) => {
                        scores[next_id] = score;
                        heap.push(next_id, &scores);
                        next_id += 1;
                    }
                    Op::Pull => {
                        if let Some(id) = heap.pull_min(&scores) {
                            let min_left = heap.as_slice().iter().map(|&m| scores[m]).min();
                            prop_assert!(min_left.map_or(true, |m| scores[id] <= m));
                        }
                    }
                    Op::Decrease(pick, by) => {
                        if !heap.is_empty() {
                            let id = heap.as_slice()[pick % heap.len()];
                            scores[id] = scores[id].saturating_sub(by);
                            prop_assert!(heap.decrease(id, &scores));
                        }
                    }
                }
                prop_assert!(heap.is_valid(&scores));
            }
        }
    }
}
