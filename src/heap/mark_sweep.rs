use crate::heap::{Heap, ObjectRef};

/// Summary of a completed collection cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionStats {
    /// Objects freed by the sweep phase
    pub reclaimed: usize,
    /// Objects surviving the cycle
    pub live: usize,
    /// Live-object count at which the next allocation collects
    pub next_threshold: usize,
}

/// Mark-sweep garbage collector
///
/// A cycle marks everything reachable from the roots, frees every unmarked
/// object, and doubles the heap's collection threshold off the survivor
/// count so collection frequency tracks the working-set size.
pub struct Collector;

impl Collector {
    /// Run one full collection cycle over the heap
    pub fn run(heap: &mut Heap, roots: &[ObjectRef]) -> CollectionStats {
        Self::mark(heap, roots);
        let reclaimed = Self::sweep(heap);

        let live = heap.live_count();
        heap.set_threshold(live * 2);

        CollectionStats {
            reclaimed,
            live,
            next_threshold: heap.threshold(),
        }
    }

    /// Mark phase: set the mark bit on every object reachable from the roots
    ///
    /// Driven by an explicit worklist rather than recursion, so arbitrarily
    /// deep or cyclic object graphs cannot exhaust the call stack. The mark
    /// bit doubles as the visited set: an already-marked object is never
    /// re-expanded, bounding the work to O(reachable objects).
    fn mark(heap: &mut Heap, roots: &[ObjectRef]) {
        let mut pending: Vec<ObjectRef> = roots.to_vec();

        while let Some(reference) = pending.pop() {
            let Some(object) = heap.get_mut(reference) else {
                continue;
            };

            if !object.mark() {
                continue;
            }

            // A pair keeps both of its children reachable
            if let Some((first, second)) = object.children() {
                pending.push(first);
                pending.push(second);
            }
        }
    }

    /// Sweep phase: free every unmarked object, unmark the survivors
    ///
    /// Returns the number of objects reclaimed.
    fn sweep(heap: &mut Heap) -> usize {
        let mut reclaimed = 0;

        for index in 0..heap.slot_count() {
            let Some(object) = heap.get_mut(ObjectRef::new(index as u32)) else {
                continue;
            };

            if object.is_marked() {
                object.clear_mark();
            } else {
                heap.release(index);
                reclaimed += 1;
            }
        }

        reclaimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::object::Payload;
    use crate::heap::Object;
    use rustc_hash::FxHashSet;

    fn scalar(heap: &mut Heap, value: i64) -> ObjectRef {
        heap.allocate(Object::scalar(value)).unwrap()
    }

    fn pair(heap: &mut Heap, first: ObjectRef, second: ObjectRef) -> ObjectRef {
        heap.allocate(Object::pair(first, second)).unwrap()
    }

    /// Reachable set computed independently of the collector's mark bits
    fn reachable(heap: &Heap, roots: &[ObjectRef]) -> FxHashSet<ObjectRef> {
        let mut seen = FxHashSet::default();
        let mut pending = roots.to_vec();
        while let Some(reference) = pending.pop() {
            if heap.get(reference).is_err() || !seen.insert(reference) {
                continue;
            }
            if let Some((first, second)) = heap.get(reference).unwrap().children() {
                pending.push(first);
                pending.push(second);
            }
        }
        seen
    }

    fn live_refs(heap: &Heap) -> FxHashSet<ObjectRef> {
        heap.iter().map(|(reference, _)| reference).collect()
    }

    #[test]
    fn test_collect_no_roots_frees_everything() {
        let mut heap = Heap::new(16);
        for i in 0..5 {
            scalar(&mut heap, i);
        }

        let stats = Collector::run(&mut heap, &[]);

        assert_eq!(stats.reclaimed, 5);
        assert_eq!(stats.live, 0);
        assert_eq!(heap.live_count(), 0);
    }

    #[test]
    fn test_collect_keeps_rooted_scalar() {
        let mut heap = Heap::new(16);
        let rooted = scalar(&mut heap, 1);
        scalar(&mut heap, 2);

        let stats = Collector::run(&mut heap, &[rooted]);

        assert_eq!(stats.reclaimed, 1);
        assert_eq!(stats.live, 1);
        assert_eq!(heap.get(rooted).unwrap().value(), Some(1));
    }

    #[test]
    fn test_collect_keeps_chained_pairs() {
        let mut heap = Heap::new(16);
        let a = scalar(&mut heap, 1);
        let b = scalar(&mut heap, 2);
        let inner = pair(&mut heap, a, b);
        let c = scalar(&mut heap, 3);
        let outer = pair(&mut heap, c, inner);
        scalar(&mut heap, 99); // garbage

        let stats = Collector::run(&mut heap, &[outer]);

        // Exactly the chain from the root survives
        assert_eq!(stats.reclaimed, 1);
        assert_eq!(stats.live, 5);
        let expected: FxHashSet<_> = [a, b, inner, c, outer].into_iter().collect();
        assert_eq!(live_refs(&heap), expected);
    }

    #[test]
    fn test_collect_shared_pair_survives_once() {
        let mut heap = Heap::new(16);
        let shared = scalar(&mut heap, 7);
        let left = pair(&mut heap, shared, shared);
        let right = pair(&mut heap, shared, shared);

        let stats = Collector::run(&mut heap, &[left, right]);

        assert_eq!(stats.reclaimed, 0);
        assert_eq!(stats.live, 3);
    }

    #[test]
    fn test_collect_survivors_match_transitive_closure() {
        let mut heap = Heap::new(64);

        // Build a small graph with garbage mixed in
        let mut leaves = Vec::new();
        for i in 0..8 {
            leaves.push(scalar(&mut heap, i));
        }
        let p1 = pair(&mut heap, leaves[0], leaves[1]);
        let p2 = pair(&mut heap, p1, leaves[2]);
        let p3 = pair(&mut heap, leaves[3], leaves[4]); // unrooted
        let _p4 = pair(&mut heap, p3, leaves[5]); // unrooted
        let roots = [p2, leaves[6]];

        let expected = reachable(&heap, &roots);
        Collector::run(&mut heap, &roots);

        assert_eq!(live_refs(&heap), expected);
    }

    #[test]
    fn test_collect_rooted_self_cycle_terminates() {
        let mut heap = Heap::new(16);
        let a = scalar(&mut heap, 0);
        let cyclic = pair(&mut heap, a, a);

        // Rewrite the pair's payload with a back-edge onto itself
        *heap.get_mut(cyclic).unwrap().payload_mut() = Payload::Pair {
            first: cyclic,
            second: a,
        };

        let stats = Collector::run(&mut heap, &[cyclic]);

        assert_eq!(stats.live, 2);
        assert_eq!(stats.reclaimed, 0);
    }

    #[test]
    fn test_collect_unrooted_cycle_is_freed() {
        let mut heap = Heap::new(16);
        let a = scalar(&mut heap, 0);
        let p1 = pair(&mut heap, a, a);
        let p2 = pair(&mut heap, p1, a);

        // Close the loop: p1 -> p2 -> p1; no reference counting to confuse
        *heap.get_mut(p1).unwrap().payload_mut() = Payload::Pair {
            first: p2,
            second: a,
        };

        let stats = Collector::run(&mut heap, &[]);

        assert_eq!(stats.reclaimed, 3);
        assert_eq!(heap.live_count(), 0);
    }

    #[test]
    fn test_collect_deep_chain_does_not_overflow() {
        let mut heap = Heap::new(usize::MAX);
        let mut head = scalar(&mut heap, 0);
        for _ in 0..100_000 {
            let leaf = scalar(&mut heap, 1);
            head = pair(&mut heap, leaf, head);
        }

        let stats = Collector::run(&mut heap, &[head]);

        assert_eq!(stats.reclaimed, 0);
        assert_eq!(stats.live, 200_001);
    }

    #[test]
    fn test_collect_clears_marks_on_survivors() {
        let mut heap = Heap::new(16);
        let a = scalar(&mut heap, 1);
        let b = scalar(&mut heap, 2);
        let root = pair(&mut heap, a, b);

        Collector::run(&mut heap, &[root]);

        for (_, object) in heap.iter() {
            assert!(!object.is_marked());
        }
    }

    #[test]
    fn test_collect_twice_is_idempotent() {
        let mut heap = Heap::new(16);
        let a = scalar(&mut heap, 1);
        let root = pair(&mut heap, a, a);
        scalar(&mut heap, 3); // garbage

        let first = Collector::run(&mut heap, &[root]);
        let second = Collector::run(&mut heap, &[root]);

        assert_eq!(first.live, 2);
        assert_eq!(second.live, 2);
        assert_eq!(second.reclaimed, 0);
        assert_eq!(first.next_threshold, second.next_threshold);
    }

    #[test]
    fn test_collect_doubles_threshold_from_survivors() {
        let mut heap = Heap::new(16);
        let roots: Vec<_> = (0..3).map(|i| scalar(&mut heap, i)).collect();
        scalar(&mut heap, 99);

        let stats = Collector::run(&mut heap, &roots);

        assert_eq!(stats.live, 3);
        assert_eq!(stats.next_threshold, 6);
        assert_eq!(heap.threshold(), 6);
    }

    #[test]
    fn test_collect_empty_heap_yields_zero_threshold() {
        let mut heap = Heap::new(16);
        scalar(&mut heap, 1);

        let stats = Collector::run(&mut heap, &[]);

        assert_eq!(stats.live, 0);
        assert_eq!(stats.next_threshold, 0);
        assert!(heap.should_collect());
    }

    #[test]
    fn test_collect_dangling_root_is_skipped() {
        let mut heap = Heap::new(16);
        scalar(&mut heap, 1);

        let stats = Collector::run(&mut heap, &[ObjectRef::new(999)]);

        assert_eq!(stats.reclaimed, 1);
        assert_eq!(stats.live, 0);
    }
}
