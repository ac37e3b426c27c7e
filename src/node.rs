/// Index of a node inside a [`NodePool`](crate::node_pool::NodePool)
pub type NodeIndex = u32;

/// Index of the node holding value 0
pub const HEAD: NodeIndex = 0;

// One entry of the circular sequence, packed into 8 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    // Inserted value, equal to the node's pool index
    pub(crate) value: u32,
    // Successor in the circular sequence (non-owning)
    pub(crate) next: NodeIndex,
}

impl Node {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn next(&self) -> NodeIndex {
        self.next
    }
}
