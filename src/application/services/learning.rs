//! Learning mutator: grows the tree after a wrong guess

use generational_arena::Index;
use tracing::{debug, info, instrument};

use crate::application::prompts;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{KnowledgeBase, Slot};
use crate::infrastructure::traits::Messenger;

/// Replaces a wrongly guessed animal with a question.
pub struct LearningMutator;

impl LearningMutator {
    /// Ask for the real animal and a question telling it from the wrong guess,
    /// then splice the new question into `slot`.
    ///
    /// Returns `None` without touching the tree if the player gives an empty
    /// line or input runs out before both answers are in.
    #[instrument(level = "debug", skip(kb, io))]
    pub fn grow(
        kb: &mut KnowledgeBase,
        slot: Slot,
        io: &mut dyn Messenger,
    ) -> ApplicationResult<Option<Index>> {
        let wrong_guess = kb.node(kb.occupant(slot)?)?.text().to_string();

        let Some(animal) = Self::non_empty(io.ask(prompts::ASK_ANIMAL).with_context("ask animal")?)
        else {
            debug!("grow: no animal given, abandoning");
            return Ok(None);
        };
        let Some(question) = Self::non_empty(
            io.ask(&prompts::discriminator(&animal, &wrong_guess))
                .with_context("ask question")?,
        ) else {
            debug!("grow: no question given, abandoning");
            return Ok(None);
        };

        let grown = kb.grow(slot, &animal, &question)?;
        info!("learned {:?} apart from {:?}: {:?}", animal, wrong_guess, question);
        io.say(prompts::LEARNED).with_context("confirm learning")?;
        Ok(Some(grown))
    }

    fn non_empty(line: Option<String>) -> Option<String> {
        line.filter(|l| !l.is_empty())
    }
}
