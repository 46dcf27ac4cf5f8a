//! Traversal engine: the question-and-answer state machine
//!
//! Walks the knowledge tree from the root, asking each node's question
//! through a [`Messenger`] and routing on the classified answer. A wrong
//! guess hands over to the [`LearningMutator`]; a win or a growth starts a
//! new round at the root. The loop ends only on `Quit` (or exhausted input).

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::application::prompts;
use crate::application::services::LearningMutator;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Answer, Branch, KnowledgeBase, KnowledgeNode, Slot};
use crate::infrastructure::traits::Messenger;

/// Where the engine stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    AtAnimal,
    AtQuestion,
    Ended,
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Rounds that ended in a win or a growth
    pub rounds: usize,
    /// Correct guesses
    pub wins: usize,
    /// Animals learned
    pub learned: usize,
}

/// Transient cursor: the current node and the slot that holds it.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    node: Index,
    slot: Slot,
}

impl Cursor {
    fn at_root(kb: &KnowledgeBase) -> Self {
        Self {
            node: kb.root(),
            slot: Slot::Root,
        }
    }
}

/// The traversal state machine.
#[derive(Debug, Clone, Default)]
pub struct TraversalEngine {
    intro: bool,
}

impl TraversalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Greet the player before the first question.
    pub fn with_intro(mut self, intro: bool) -> Self {
        self.intro = intro;
        self
    }

    /// Run rounds until the player quits.
    #[instrument(level = "debug", skip_all)]
    pub fn play(
        &self,
        kb: &mut KnowledgeBase,
        io: &mut dyn Messenger,
    ) -> ApplicationResult<SessionSummary> {
        if self.intro {
            io.say(prompts::INTRO).with_context("write intro")?;
        }

        let mut cursor = Cursor::at_root(kb);
        let mut summary = SessionSummary::default();
        while self.step(kb, io, &mut cursor, &mut summary)? != TraversalState::Ended {}

        debug!("play: session ended: {:?}", summary);
        Ok(summary)
    }

    /// Ask the current node's question and act on the answer.
    fn step(
        &self,
        kb: &mut KnowledgeBase,
        io: &mut dyn Messenger,
        cursor: &mut Cursor,
        summary: &mut SessionSummary,
    ) -> ApplicationResult<TraversalState> {
        let (at_animal, prompt) = match kb.node(cursor.node)? {
            KnowledgeNode::Animal { name } => (true, prompts::guess(name)),
            KnowledgeNode::Question { text, .. } => (false, prompts::question(text)),
        };

        let line = io.ask(&prompt).with_context("ask question")?;
        let answer = Answer::from_input(line.as_deref());
        debug!("step: {:?} -> {:?}", prompt.trim_end(), answer);

        match (answer, at_animal) {
            (Answer::Quit, _) => {
                io.say(prompts::GOODBYE).with_context("say goodbye")?;
                return Ok(TraversalState::Ended);
            }
            (Answer::Yes, true) => {
                io.say(prompts::WIN).with_context("announce win")?;
                summary.wins += 1;
                summary.rounds += 1;
                *cursor = Cursor::at_root(kb);
            }
            (Answer::No, true) => match LearningMutator::grow(kb, cursor.slot, io)? {
                Some(_) => {
                    summary.learned += 1;
                    summary.rounds += 1;
                    *cursor = Cursor::at_root(kb);
                }
                None => {
                    io.say(prompts::GOODBYE).with_context("say goodbye")?;
                    return Ok(TraversalState::Ended);
                }
            },
            (Answer::Yes, false) => Self::descend(kb, cursor, Branch::Yes)?,
            (Answer::No, false) => Self::descend(kb, cursor, Branch::No)?,
        }

        Ok(if kb.node(cursor.node)?.is_animal() {
            TraversalState::AtAnimal
        } else {
            TraversalState::AtQuestion
        })
    }

    fn descend(kb: &KnowledgeBase, cursor: &mut Cursor, branch: Branch) -> ApplicationResult<()> {
        let parent = cursor.node;
        cursor.node = kb.child(parent, branch)?;
        cursor.slot = Slot::Child { parent, branch };
        Ok(())
    }
}
