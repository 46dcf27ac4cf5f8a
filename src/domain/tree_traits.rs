use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::answer::Branch;
use crate::domain::arena::{KnowledgeBase, KnowledgeNode};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

// Questions render as "? text" with their children labelled by branch,
// animals render as their name.
impl TreeNodeConvert for KnowledgeBase {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn label(kb: &KnowledgeBase, idx: Index, branch: Option<Branch>) -> String {
            let text = match kb.node(idx) {
                Ok(KnowledgeNode::Question { text, .. }) => format!("? {}", text),
                Ok(KnowledgeNode::Animal { name }) => name.clone(),
                Err(e) => format!("<{}>", e),
            };
            match branch {
                Some(b) => format!("[{}] {}", b, text),
                None => text,
            }
        }

        fn build_tree(kb: &KnowledgeBase, idx: Index, parent_tree: &mut Tree<String>) {
            for branch in [Branch::Yes, Branch::No] {
                if let Ok(child) = kb.child(idx, branch) {
                    let mut child_tree = Tree::new(label(kb, child, Some(branch)));
                    build_tree(kb, child, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let root = self.root();
        let mut tree = Tree::new(label(self, root, None));
        build_tree(self, root, &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arena::Slot;

    #[test]
    fn test_single_animal_renders_name() {
        let kb = KnowledgeBase::default();
        assert_eq!(kb.to_tree_string().to_string().trim_end(), "cat");
    }

    #[test]
    fn test_question_renders_both_branches() {
        let mut kb = KnowledgeBase::default();
        kb.grow(Slot::Root, "dog", "Does it bark?").unwrap();
        let rendered = kb.to_tree_string().to_string();
        assert!(rendered.starts_with("? Does it bark?"));
        assert!(rendered.contains("[Yes] dog"));
        assert!(rendered.contains("[No] cat"));
    }
}
