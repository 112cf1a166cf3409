use crate::heap::{CollectionStats, Collector, Heap, Object, ObjectRef};
use crate::vm::{OperandStack, VmConfig, VmError, VmResult};

/// A machine context: heap, root stack, and collection policy
///
/// Each machine owns its heap and root stack outright; independent machines
/// never share objects. All operations are synchronous and run to
/// completion, and a collection triggered mid-allocation is stop-the-world
/// relative to the single caller.
pub struct Machine {
    heap: Heap,
    stack: OperandStack,
    trace: bool,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self {
            heap: Heap::new(config.initial_threshold),
            stack: OperandStack::new(config.max_roots),
            trace: config.trace,
        }
    }

    /// Allocate a scalar object without rooting it
    ///
    /// Runs a collection cycle first if the live-object count has reached
    /// the threshold. The new object does not exist yet at that point, so
    /// the cycle can never reclaim it.
    pub fn allocate_scalar(&mut self, value: i64) -> VmResult<ObjectRef> {
        self.collect_if_needed();
        let reference = self.heap.allocate(Object::scalar(value))?;
        if self.trace {
            println!("ALLOC: {} = scalar {}", reference, value);
        }
        Ok(reference)
    }

    /// Allocate a scalar object and push it onto the root stack
    pub fn push_scalar(&mut self, value: i64) -> VmResult<ObjectRef> {
        let reference = self.allocate_scalar(value)?;
        self.push_root(reference)?;
        Ok(reference)
    }

    /// Pop the top two roots, allocate a pair of them, and root the pair
    ///
    /// The last-pushed root becomes the pair's second element. Fails with
    /// `StackUnderflow`, without popping anything, if fewer than two roots
    /// are held.
    pub fn allocate_pair(&mut self) -> VmResult<ObjectRef> {
        if self.stack.len() < 2 {
            return Err(VmError::StackUnderflow);
        }

        // Collect before popping so the children stay rooted through a
        // triggered cycle.
        self.collect_if_needed();

        let second = self.stack.pop()?;
        let first = self.stack.pop()?;
        let reference = self.heap.allocate(Object::pair(first, second))?;
        if self.trace {
            println!("ALLOC: {} = pair({}, {})", reference, first, second);
        }

        // Two pops preceded this push, so it cannot overflow
        self.stack.push(reference)?;
        Ok(reference)
    }

    /// Push a reference onto the root stack
    pub fn push_root(&mut self, reference: ObjectRef) -> VmResult<()> {
        if self.trace {
            println!("PUSH: {}", reference);
        }
        self.stack.push(reference)
    }

    /// Pop the most recently pushed root
    pub fn pop_root(&mut self) -> VmResult<ObjectRef> {
        let reference = self.stack.pop()?;
        if self.trace {
            println!("POP: {}", reference);
        }
        Ok(reference)
    }

    /// Run a full collection cycle using the root stack as the root set
    pub fn collect(&mut self) -> CollectionStats {
        let roots: Vec<ObjectRef> = self.stack.iter().collect();
        let stats = Collector::run(&mut self.heap, &roots);
        if self.trace {
            println!(
                "GC: reclaimed {} objects, {} live, next threshold {}",
                stats.reclaimed, stats.live, stats.next_threshold
            );
        }
        stats
    }

    fn collect_if_needed(&mut self) {
        if self.heap.should_collect() {
            self.collect();
        }
    }

    /// Get the object behind a reference
    pub fn get(&self, reference: ObjectRef) -> VmResult<&Object> {
        Ok(self.heap.get(reference)?)
    }

    /// Get the current number of live objects
    pub fn live_object_count(&self) -> usize {
        self.heap.live_count()
    }

    /// Get the live-object count at which the next allocation collects
    pub fn current_threshold(&self) -> usize {
        self.heap.threshold()
    }

    /// Get the current root stack depth
    pub fn root_count(&self) -> usize {
        self.stack.len()
    }

    /// Read-only access to the heap
    pub fn heap(&self) -> &Heap {
        &self.heap
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
