//! Array-backed union-find over provisional labels.

/// Equivalence table for provisional labels `1..=len`.
///
/// Slot 0 is reserved for the background label. Unions always attach the
/// larger root to the smaller one, so a class root is the earliest label
/// created for that class.
#[derive(Debug)]
pub(crate) struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Creates a table with room for `capacity` labels before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut parent = Vec::with_capacity(capacity.saturating_add(1));
        parent.push(0);
        Self { parent }
    }

    /// Number of provisional labels handed out.
    pub(crate) fn len(&self) -> usize {
        self.parent.len() - 1
    }

    /// Allocates a new singleton class.
    #[inline]
    pub(crate) fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    /// Finds the class root with two-pass path compression.
    #[inline]
    pub(crate) fn find(&mut self, label: u32) -> u32 {
        let mut root = label;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut current = label;
        while current != root {
            let next = self.parent[current as usize];
            self.parent[current as usize] = root;
            current = next;
        }
        root
    }

    /// Merges the classes of `a` and `b`.
    #[inline]
    pub(crate) fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        let (smaller, larger) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[larger as usize] = smaller;
    }

    /// Maps every provisional label to a dense final label.
    ///
    /// Roots receive `1..=count` in order of creation; the returned table is
    /// indexed by provisional label and keeps `table[0] == 0`.
    pub(crate) fn resolve(&mut self) -> (Vec<u32>, usize) {
        let len = self.parent.len();
        let mut table = vec![0u32; len];
        let mut next = 0u32;
        for label in 1..len as u32 {
            let root = self.find(label);
            if root == label {
                next += 1;
                table[label as usize] = next;
            } else {
                // Roots are smaller than their members, so already numbered.
                table[label as usize] = table[root as usize];
            }
        }
        (table, next as usize)
    }
}
