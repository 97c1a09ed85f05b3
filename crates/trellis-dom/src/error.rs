//! Errors reported by the document facade.

use thiserror::Error;

use crate::NodeId;

/// Failures raised by [`DomFacade`](crate::DomFacade) operations.
///
/// The widget layer treats the facade as trusted infrastructure and passes
/// these through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node id does not refer to a node of this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// The operation needs an element but the node is text, a comment or the
    /// document itself.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// `child` was expected to be a child of `parent`.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node that was not found among its children.
        child: NodeId,
    },
    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a HierarchyRequestError."
    #[error("cannot insert {node:?} into {parent:?}: hierarchy request")]
    HierarchyRequest {
        /// The prospective parent.
        parent: NodeId,
        /// The node being inserted.
        node: NodeId,
    },
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// "If qualifiedName does not match the Name production in XML, then
    /// throw an InvalidCharacterError."
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
    /// An HTML template could not be turned into exactly one element.
    #[error("malformed template at byte {offset}: {reason}")]
    MalformedTemplate {
        /// Byte offset into the template source.
        offset: usize,
        /// What went wrong.
        reason: String,
    },
    /// The document has no body element.
    #[error("document has no body element")]
    MissingBody,
}
