/// Single element of the [`DisjointSets`] forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Set {
    parent: usize,
    rank: u32,
}

impl Set {
    fn root(index: usize) -> Self {
        Set {
            parent: index,
            rank: 0,
        }
    }
}

/// Partition of `0..n` into disjoint sets.
///
/// Uses both union by rank and path compression, so a sequence of `m` operations over `n`
/// elements takes `O(m α(n))` time.
#[derive(Debug, Clone, Default)]
pub struct DisjointSets {
    sets: Vec<Set>,
    count: usize,
}

impl DisjointSets {
    pub fn new(initial_size: usize) -> Self {
        let mut sets = DisjointSets {
            sets: Vec::with_capacity(initial_size),
            count: 0,
        };
        for _ in 0..initial_size {
            sets.make_set();
        }

        sets
    }

    /// Appends a new singleton set and returns its index.
    pub fn make_set(&mut self) -> usize {
        let index = self.sets.len();
        self.sets.push(Set::root(index));
        self.count += 1;
        index
    }

    /// Returns the representative of the set containing `x`.
    ///
    /// Every node on the path from `x` to the root is re-pointed directly at the root.
    ///
    /// # Panics
    ///
    /// If `x` is not an element of this structure.
    pub fn find(&mut self, x: usize) -> usize {
        self.check(x);

        let mut root = x;
        while self.sets[root].parent != root {
            root = self.sets[root].parent;
        }

        let mut node = x;
        while node != root {
            let next = self.sets[node].parent;
            self.sets[node].parent = root;
            node = next;
        }

        root
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` if they already were in the same set, in which case nothing changes.
    ///
    /// # Panics
    ///
    /// If either `x` or `y` is not an element of this structure.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let x_root = self.find(x);
        let y_root = self.find(y);

        if x_root == y_root {
            return false;
        }

        let (x_rank, y_rank) = (self.sets[x_root].rank, self.sets[y_root].rank);
        if x_rank < y_rank {
            self.sets[x_root].parent = y_root;
        } else if x_rank > y_rank {
            self.sets[y_root].parent = x_root;
        } else {
            self.sets[y_root].parent = x_root;
            self.sets[x_root].rank += 1;
        }

        self.count -= 1;
        true
    }

    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Puts every element back into its own singleton set, keeping the element count.
    pub fn reset(&mut self) {
        for (i, set) in self.sets.iter_mut().enumerate() {
            *set = Set::root(i);
        }
        self.count = self.sets.len();
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of disjoint sets currently in the partition.
    pub fn set_count(&self) -> usize {
        self.count
    }

    /// Direct parent of `x`, without compressing anything.
    pub fn parent(&self, x: usize) -> usize {
        self.check(x);
        self.sets[x].parent
    }

    pub fn rank(&self, x: usize) -> u32 {
        self.check(x);
        self.sets[x].rank
    }

    fn check(&self, x: usize) {
        assert!(
            x < self.sets.len(),
            "element {} out of range, there are only {} elements",
            x,
            self.sets.len()
        );
    }
}
