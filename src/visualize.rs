//! Plain text drawings of subtrees, e.g.
//!
//! ```text
//! 5
//! |-3
//! | |-1
//! | |-4
//! |-8
//! ```

use std::fmt;

use crate::node::{Forest, NodeId};

/// Marks the first line of a child subtree.
const BRANCH: &str = "|-";
/// Marks every following line of a child subtree.
const CONTINUATION: &str = "| ";

impl<T> Forest<T>
where
    T: fmt::Display,
{
    /// Draws the subtree rooted at `id`: its value on the first line, then the left and right
    /// subtrees (in that order) indented one level below it.
    pub fn visualize(&self, id: NodeId) -> String {
        self.lines(id).join("\n")
    }

    fn lines(&self, id: NodeId) -> Vec<String> {
        let mut lines = vec![self.value(id).to_string()];
        for child in [self.left(id), self.right(id)].into_iter().flatten() {
            let mut child_lines = self.lines(child).into_iter();
            if let Some(first) = child_lines.next() {
                lines.push(format!("{BRANCH}{first}"));
            }
            lines.extend(child_lines.map(|line| format!("{CONTINUATION}{line}")));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node() {
        let mut forest = Forest::new();
        let root = forest.new_node("root");

        assert_eq!(forest.visualize(root), "root");
    }

    #[test]
    fn nested_children() {
        let mut forest = Forest::new();
        let root = forest.build([5, 3, 8, 1, 4, 7, 9]).unwrap();

        let expected = ["5", "|-3", "| |-1", "| |-4", "|-8", "| |-7", "| |-9"].join("\n");
        assert_eq!(forest.visualize(root), expected);
    }

    #[test]
    fn lone_right_child_uses_same_markers() {
        let mut forest = Forest::new();
        let root = forest.build([1, 2, 3]).unwrap();

        assert_eq!(forest.visualize(root), "1\n|-2\n| |-3");
    }
}
