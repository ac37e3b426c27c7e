use crate::error::{Result, SpinlockError};
use crate::node::{Node, NodeIndex};

/// Fixed-capacity arena for [`Node`] allocation.
///
/// The whole pool is reserved up front, so indices handed out by
/// [`allocate`](NodePool::allocate) stay valid for the lifetime of the pool.
/// The node at index `v` always holds value `v`.
pub struct NodePool {
    nodes: Vec<Node>,
    capacity: usize,
}

impl NodePool {
    /// Reserve room for exactly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(capacity)
            .map_err(|source| SpinlockError::Allocation {
                nodes: capacity,
                source,
            })?;

        Ok(NodePool { nodes, capacity })
    }

    /// Allocate the next node, linked to `next`. Returns its index.
    pub(crate) fn allocate(&mut self, next: NodeIndex) -> Result<NodeIndex> {
        let exhausted = SpinlockError::PoolExhausted {
            capacity: self.capacity,
        };
        if self.nodes.len() == self.capacity {
            return Err(exhausted);
        }

        let index = NodeIndex::try_from(self.nodes.len()).map_err(|_| exhausted)?;
        self.nodes.push(Node { value: index, next });
        Ok(index)
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index as usize)
    }

    #[inline]
    pub(crate) fn next(&self, index: NodeIndex) -> NodeIndex {
        self.nodes[index as usize].next
    }

    #[inline]
    pub(crate) fn value(&self, index: NodeIndex) -> u32 {
        self.nodes[index as usize].value
    }

    #[inline]
    pub(crate) fn set_next(&mut self, index: NodeIndex, next: NodeIndex) {
        self.nodes[index as usize].next = next;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_creation() {
        let pool = NodePool::with_capacity(16).unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 16);
        assert!(pool.nodes.capacity() >= 16);
    }

    #[test]
    fn node_allocation() {
        let mut pool = NodePool::with_capacity(4).unwrap();

        for expected in 0..4 {
            let index = pool.allocate(0).unwrap();
            assert_eq!(index, expected);

            let node = pool.get(index).unwrap();
            assert_eq!(node.value(), expected);
            assert_eq!(node.next(), 0);
        }

        assert_eq!(pool.len(), 4);
        assert!(pool.get(4).is_none());
    }

    #[test]
    fn links() {
        let mut pool = NodePool::with_capacity(3).unwrap();

        // Connect nodes: 0 -> 1 -> 2 -> 0
        let node0 = pool.allocate(0).unwrap();
        let node1 = pool.allocate(0).unwrap();
        let node2 = pool.allocate(node0).unwrap();
        pool.set_next(node0, node1);
        pool.set_next(node1, node2);

        assert_eq!(pool.next(node0), node1);
        assert_eq!(pool.next(node1), node2);
        assert_eq!(pool.next(node2), node0);

        // Relinking leaves values untouched
        pool.set_next(node0, node2);
        assert_eq!(pool.next(node0), node2);
        assert_eq!(pool.get(node0).unwrap().value(), 0);
    }

    #[test]
    fn exhausted_pool() {
        let mut pool = NodePool::with_capacity(1).unwrap();
        pool.allocate(0).unwrap();

        assert!(matches!(
            pool.allocate(0),
            Err(SpinlockError::PoolExhausted { capacity: 1 })
        ));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn allocation_failure() {
        match NodePool::with_capacity(usize::MAX) {
            Err(SpinlockError::Allocation { nodes, .. }) => assert_eq!(nodes, usize::MAX),
            Err(other) => panic!("expected Allocation, got {:?}", other),
            Ok(_) => panic!("reserving usize::MAX nodes should fail"),
        }
    }
}
