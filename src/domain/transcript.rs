//! Line-based transcript of a knowledge tree.
//!
//! The transcript is written so that feeding it back, line by line, as the
//! answers of a muted game session rebuilds the tree. Each question is
//! written as one learning round:
//!
//! ```text
//! <markers leading from the root to the question's slot>
//! No                      wrong guess at the animal held there
//! <new animal>
//! <question text>
//! ```
//!
//! The first line of a transcript is the seed animal. Replay skips it, since
//! the bootstrap tree already holds that animal.
//!
//! Writing consumes the tree: every node is moved out of the arena into an
//! owned draft, and each animal is taken out of its slot as it is written,
//! so no animal is written twice.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::answer::{Branch, NO_MARKER};
use crate::domain::arena::{KnowledgeBase, KnowledgeNode};
use crate::domain::error::DomainResult;

/// Owned copy of the tree whose slots can be emptied while writing.
#[derive(Debug)]
enum Draft {
    Animal(String),
    Question {
        text: String,
        yes: Option<Box<Draft>>,
        no: Option<Box<Draft>>,
    },
}

impl Draft {
    fn is_question(slot: &Option<Box<Draft>>) -> bool {
        matches!(slot.as_deref(), Some(Draft::Question { .. }))
    }
}

/// Move the subtree at `idx` out of the arena.
fn detach(kb: &mut KnowledgeBase, idx: Index) -> DomainResult<Draft> {
    match kb.take_node(idx)? {
        KnowledgeNode::Animal { name } => Ok(Draft::Animal(name)),
        KnowledgeNode::Question { text, yes, no } => {
            let yes = detach(kb, yes)?;
            let no = detach(kb, no)?;
            Ok(Draft::Question {
                text,
                yes: Some(Box::new(yes)),
                no: Some(Box::new(no)),
            })
        }
    }
}

/// Follow `no` children from `slot` and take the animal found at the end.
///
/// Returns `None` when the chain ends in a slot that was already emptied.
fn take_rightmost(slot: &mut Option<Box<Draft>>) -> Option<String> {
    if let Some(Draft::Question { no, .. }) = slot.as_deref_mut() {
        return take_rightmost(no);
    }
    match slot.take() {
        Some(node) => match *node {
            Draft::Animal(name) => Some(name),
            question => {
                *slot = Some(Box::new(question));
                None
            }
        },
        None => None,
    }
}

#[derive(Debug, Default)]
struct TranscriptWriter {
    lines: Vec<String>,
}

impl TranscriptWriter {
    fn emit(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn emit_path(&mut self, path: &[Branch]) {
        for branch in path {
            self.emit(branch.marker());
        }
    }

    /// Write one question and, afterwards, the questions below it.
    ///
    /// `path` holds the answers leading from the root to this question.
    fn write_question(&mut self, node: Draft, path: &mut Vec<Branch>) {
        let Draft::Question {
            text,
            mut yes,
            mut no,
        } = node
        else {
            return;
        };
        let first = path.is_empty();

        if let Some(animal) = take_rightmost(&mut no) {
            if !first {
                self.emit(NO_MARKER);
            }
            self.emit(animal);
        }
        self.emit(NO_MARKER);
        if let Some(animal) = take_rightmost(&mut yes) {
            self.emit(animal);
        }
        self.emit(text);

        for (branch, slot) in [(Branch::No, no), (Branch::Yes, yes)] {
            if !Draft::is_question(&slot) {
                continue;
            }
            if let Some(child) = slot {
                path.push(branch);
                self.emit_path(path);
                self.write_question(*child, path);
                path.pop();
            }
        }
    }
}

impl KnowledgeBase {
    /// Consume the tree and produce its transcript lines.
    ///
    /// A tree that is still the single bootstrap animal yields no lines.
    #[instrument(level = "debug", skip(self))]
    pub fn into_transcript(mut self) -> DomainResult<Vec<String>> {
        let root = self.root();
        let draft = detach(&mut self, root)?;

        let mut writer = TranscriptWriter::default();
        writer.write_question(draft, &mut Vec::new());
        debug!("into_transcript: {} lines", writer.lines.len());
        Ok(writer.lines)
    }
}

/// Render transcript lines as file content, one newline-terminated line each.
pub fn render_transcript(lines: &[String]) -> String {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}
