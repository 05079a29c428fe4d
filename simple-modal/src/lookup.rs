use simpledom::{Document, NodeId};

/// Resolves element ids to nodes.
pub trait ElementLookup {
    fn find_by_id(&self, id: &str) -> Option<NodeId>;
}

impl ElementLookup for Document {
    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.get_element_by_id(id)
    }
}
