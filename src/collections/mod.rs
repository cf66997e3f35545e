mod bplus_tree;

pub use bplus_tree::{
    BPlusTree, Capacity, Config, InnerId, InnerNode, LeafId, LeafNode, NodeRef, SearchStrategy,
    BINARY_SEARCH_THRESHOLD,
};
