use glam::Mat4;
use log::trace;

use crate::ImportError;
use crate::scene::{SceneSource, SourceNode};

pub struct NodeVisitContext<'a, N> {
    pub parent: Option<&'a N>,
    pub node_to_parent: Mat4,
    /// Identity when the node has no geometry transform.
    pub geometry_to_node: Mat4,
}

/// Observes one scene traversal. Every `on_node_begin` is matched by an `on_node_end` after all
/// of the node's descendants ended.
pub trait NodeListener<S: SceneSource> {
    fn on_node_begin(
        &mut self,
        scene: &S,
        node: &S::Node,
        context: &NodeVisitContext<'_, S::Node>,
    ) -> Result<(), ImportError>;

    fn on_node_end(&mut self, scene: &S, node: &S::Node) -> Result<(), ImportError>;
}

enum Visit<'a, N> {
    Begin { node: &'a N, parent: Option<&'a N> },
    End(&'a N),
}

/// Walks every root of `scene` depth first, children in source order, handing each event to the
/// listeners in slice order. The first listener error aborts the walk.
pub fn traverse<S: SceneSource>(scene: &S, listeners: &mut [&mut dyn NodeListener<S>]) -> Result<(), ImportError> {
    let mut stack: Vec<Visit<'_, S::Node>> = scene
        .roots()
        .map(|node| Visit::Begin { node, parent: None })
        .collect();
    stack.reverse();

    let mut visited = 0usize;
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Begin { node, parent } => {
                let context = NodeVisitContext {
                    parent,
                    node_to_parent: node.node_to_parent(),
                    geometry_to_node: node.geometry_to_node().unwrap_or(Mat4::IDENTITY),
                };

                for listener in listeners.iter_mut() {
                    listener.on_node_begin(scene, node, &context)?;
                }
                visited += 1;

                stack.push(Visit::End(node));
                let first_child = stack.len();
                stack.extend(node.children().map(|child| Visit::Begin {
                    node: child,
                    parent: Some(node),
                }));
                stack[first_child..].reverse();
            }
            Visit::End(node) => {
                for listener in listeners.iter_mut() {
                    listener.on_node_end(scene, node)?;
                }
            }
        }
    }

    trace!("Traversed {} scene nodes", visited);
    Ok(())
}
