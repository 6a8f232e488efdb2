use crate::id::NodeId;

/// A node of an auxiliary network: either one of the synthetic endpoints
/// grafted on by the feasibility constructions, or a node of the original
/// graph.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Node<Id> {
    Source,
    Sink,
    WithId(Id),
}

impl<Id: NodeId> NodeId for Node<Id> {}

impl<Id> From<Id> for Node<Id>
where
    Id: NodeId,
{
    fn from(id: Id) -> Self {
        Self::WithId(id)
    }
}
