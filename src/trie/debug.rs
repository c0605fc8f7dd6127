//! Console dump, Graphviz export and integrity checks.

use std::collections::HashSet;
use std::fmt::Write;

use crate::arena::NodeId;
use crate::payload::Payload;

use super::{NodeRef, ReducedTrie};

impl<P: Payload> ReducedTrie<P> {
    /// Indented dump of the edge labels, two spaces per level. Terminal nodes
    /// are marked with `*`.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for child in self.root().children() {
            Self::pretty_node(child, 0, &mut out);
        }
        out
    }

    fn pretty_node(node: NodeRef<'_, P>, depth: usize, out: &mut String) {
        let marker = if node.is_terminal() { "*" } else { "" };
        let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), node.label(), marker);
        for child in node.children() {
            Self::pretty_node(child, depth + 1, out);
        }
    }

    /// Graphviz description of the tree. Node names come from arena ids.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        Self::dot_nodes(self.root(), &mut out);
        Self::dot_edges(self.root(), &mut out);
        out.push_str("}\n");
        out
    }

    fn dot_nodes(node: NodeRef<'_, P>, out: &mut String) {
        let _ = write!(out, "n{} [label=\"{}\"", node.id().as_usize(), node.label());
        if node.is_terminal() {
            out.push_str(", fillcolor=\"palegreen\", style=\"filled,rounded\"");
        }
        out.push_str("];\n");
        for child in node.children() {
            Self::dot_nodes(child, out);
        }
    }

    fn dot_edges(node: NodeRef<'_, P>, out: &mut String) {
        for child in node.children() {
            let _ = writeln!(out, "n{} -> n{};", node.id().as_usize(), child.id().as_usize());
            Self::dot_edges(child, out);
        }
    }

    /// Check the structural invariants. Returns a description of every
    /// violation found; empty means the tree is sound.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let root = self.root();

        if !root.label().is_empty() {
            issues.push(format!("root has label {:?}", root.label()));
        }
        if root.is_terminal() {
            issues.push("root is terminal".to_owned());
        }

        let mut reachable = HashSet::new();
        let mut terminals = 0;
        Self::verify_node(root, String::new(), &mut issues, &mut reachable, &mut terminals);

        if terminals != self.len {
            issues.push(format!("{terminals} terminal nodes but len is {}", self.len));
        }
        for (id, node) in self.nodes.iter() {
            if !reachable.contains(&id) {
                issues.push(format!(
                    "slot {} ({:?}) is live but unreachable from the root",
                    id.as_usize(),
                    String::from_utf8_lossy(&node.label)
                ));
            }
        }
        issues
    }

    fn verify_node(
        node: NodeRef<'_, P>,
        path: String,
        issues: &mut Vec<String>,
        reachable: &mut HashSet<NodeId>,
        terminals: &mut usize,
    ) {
        reachable.insert(node.id());

        if !node.is_root() {
            if node.label().is_empty() {
                issues.push(format!("node under {path:?} has an empty label"));
            }
            if !node.label().bytes().all(|b| b.is_ascii_lowercase()) {
                issues.push(format!("label {:?} under {path:?} is not lowercase ASCII", node.label()));
            }
        }

        if let Some(payload) = node.payload() {
            *terminals += 1;
            if payload.is_empty() {
                issues.push(format!("{path:?} holds an empty payload"));
            }
        } else if !node.is_root() {
            match node.child_count() {
                0 => issues.push(format!("{path:?} is a non-terminal leaf")),
                1 => issues.push(format!("{path:?} is a non-terminal node with one child")),
                _ => {}
            }
        }

        let mut seen = HashSet::new();
        for child in node.children() {
            if child.parent().map(|p| p.id()) != Some(node.id()) {
                issues.push(format!("child {:?} of {path:?} has a wrong parent link", child.id()));
                continue;
            }
            if let Some(first) = child.label().bytes().next() {
                if !seen.insert(first) {
                    issues.push(format!(
                        "{path:?} has two children starting with {:?}",
                        first as char
                    ));
                }
            }
            let child_path = format!("{path}{}", child.label());
            Self::verify_node(child, child_path, issues, reachable, terminals);
        }
    }
}
