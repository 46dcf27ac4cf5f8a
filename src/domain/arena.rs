use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{debug, instrument};

use crate::domain::answer::Branch;
use crate::domain::error::{DomainError, DomainResult};

/// Default bootstrap animal when no knowledge has been saved yet.
pub const DEFAULT_SEED_ANIMAL: &str = "cat";

/// Node payload: a terminal animal or a question with two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeNode {
    /// Terminal guess
    Animal { name: String },
    /// Discriminating question; `yes` identifies the newer animal
    Question { text: String, yes: Index, no: Index },
}

impl KnowledgeNode {
    /// Name for an animal, question text for a question.
    pub fn text(&self) -> &str {
        match self {
            KnowledgeNode::Animal { name } => name,
            KnowledgeNode::Question { text, .. } => text,
        }
    }

    pub fn is_animal(&self) -> bool {
        matches!(self, KnowledgeNode::Animal { .. })
    }
}

impl fmt::Display for KnowledgeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeNode::Animal { name } => write!(f, "{}", name),
            KnowledgeNode::Question { text, .. } => write!(f, "{}", text),
        }
    }
}

/// Storage location of a node: the root reference or one branch of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Root,
    Child { parent: Index, branch: Branch },
}

/// Arena-based knowledge tree.
///
/// Nodes reference their children by arena index, so a growth event only has
/// to rewrite the single slot that held the wrongly guessed animal.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    arena: Arena<KnowledgeNode>,
    root: Index,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_ANIMAL)
    }
}

impl KnowledgeBase {
    /// Bootstrap tree holding a single animal.
    pub fn new(seed: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(KnowledgeNode::Animal { name: seed.into() });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn node(&self, idx: Index) -> DomainResult<&KnowledgeNode> {
        self.arena.get(idx).ok_or(DomainError::MissingNode(idx))
    }

    /// Child of a question on the given branch.
    pub fn child(&self, idx: Index, branch: Branch) -> DomainResult<Index> {
        match self.node(idx)? {
            KnowledgeNode::Question { yes, no, .. } => Ok(match branch {
                Branch::Yes => *yes,
                Branch::No => *no,
            }),
            KnowledgeNode::Animal { .. } => Err(DomainError::NotAQuestion(idx)),
        }
    }

    /// Node currently stored in a slot.
    pub fn occupant(&self, slot: Slot) -> DomainResult<Index> {
        match slot {
            Slot::Root => Ok(self.root),
            Slot::Child { parent, branch } => self.child(parent, branch),
        }
    }

    fn set_slot(&mut self, slot: Slot, idx: Index) -> DomainResult<()> {
        match slot {
            Slot::Root => {
                self.root = idx;
                Ok(())
            }
            Slot::Child { parent, branch } => match self.arena.get_mut(parent) {
                Some(KnowledgeNode::Question { yes, no, .. }) => {
                    match branch {
                        Branch::Yes => *yes = idx,
                        Branch::No => *no = idx,
                    }
                    Ok(())
                }
                Some(KnowledgeNode::Animal { .. }) => Err(DomainError::NotAQuestion(parent)),
                None => Err(DomainError::MissingNode(parent)),
            },
        }
    }

    /// Replace the animal held by `slot` with a new question.
    ///
    /// The new question's `yes` child is a fresh animal named `animal`, its
    /// `no` child is the previous occupant, untouched. Returns the question.
    #[instrument(level = "debug", skip(self))]
    pub fn grow(&mut self, slot: Slot, animal: &str, question: &str) -> DomainResult<Index> {
        let old = self.occupant(slot)?;
        if !self.node(old)?.is_animal() {
            return Err(DomainError::NotAnAnimal(old));
        }

        let yes = self.arena.insert(KnowledgeNode::Animal {
            name: animal.to_string(),
        });
        let grown = self.arena.insert(KnowledgeNode::Question {
            text: question.to_string(),
            yes,
            no: old,
        });
        self.set_slot(slot, grown)?;
        debug!("grow: {:?} now asks {:?}", slot, question);
        Ok(grown)
    }

    /// Follow `no` children from `start` until an animal is reached.
    ///
    /// `slot` is where `start` itself is stored; the returned slot is where the
    /// found animal is stored.
    #[instrument(level = "trace", skip(self))]
    pub fn rightmost_leaf(&self, start: Index, slot: Slot) -> DomainResult<(Index, Slot)> {
        let mut current = start;
        let mut current_slot = slot;
        loop {
            match self.node(current)? {
                KnowledgeNode::Animal { .. } => return Ok((current, current_slot)),
                KnowledgeNode::Question { no, .. } => {
                    current_slot = Slot::Child {
                        parent: current,
                        branch: Branch::No,
                    };
                    current = *no;
                }
            }
        }
    }

    /// Walk from the root following `answers`, returning the animal reached.
    ///
    /// Questions left after the answers run out are answered `No`.
    pub fn resolve<I>(&self, answers: I) -> DomainResult<&str>
    where
        I: IntoIterator<Item = Branch>,
    {
        let mut answers = answers.into_iter();
        let mut current = self.root;
        loop {
            match self.node(current)? {
                KnowledgeNode::Animal { name } => return Ok(name),
                KnowledgeNode::Question { .. } => {
                    let branch = answers.next().unwrap_or(Branch::No);
                    current = self.child(current, branch)?;
                }
            }
        }
    }

    pub fn animal_count(&self) -> usize {
        self.arena.iter().filter(|(_, n)| n.is_animal()).count()
    }

    pub fn question_count(&self) -> usize {
        self.arena.iter().filter(|(_, n)| !n.is_animal()).count()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        match self.arena.get(idx) {
            Some(KnowledgeNode::Question { yes, no, .. }) => {
                1 + self.calculate_depth(*yes).max(self.calculate_depth(*no))
            }
            Some(KnowledgeNode::Animal { .. }) => 1,
            None => 0,
        }
    }

    /// Animal names in yes-first depth-first order.
    pub fn animals(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_animals(self.root, &mut names);
        names
    }

    fn collect_animals(&self, idx: Index, names: &mut Vec<String>) {
        match self.arena.get(idx) {
            Some(KnowledgeNode::Animal { name }) => names.push(name.clone()),
            Some(KnowledgeNode::Question { yes, no, .. }) => {
                self.collect_animals(*yes, names);
                self.collect_animals(*no, names);
            }
            None => {}
        }
    }

    /// Remove a node from the arena, handing back its payload.
    pub(crate) fn take_node(&mut self, idx: Index) -> DomainResult<KnowledgeNode> {
        self.arena.remove(idx).ok_or(DomainError::MissingNode(idx))
    }
}
