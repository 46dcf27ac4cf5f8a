//! Knowledge persistence service
//!
//! Loading replays a saved transcript through the traversal engine with a
//! muted messenger, so the tree is rebuilt by the same growth steps that
//! created it. Saving consumes the tree into its transcript.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::services::{SessionSummary, TraversalEngine};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{render_transcript, KnowledgeBase};
use crate::infrastructure::traits::{FileSystem, Messenger, MutedMessenger};

/// Service for loading and saving the knowledge tree.
pub struct KnowledgeService {
    fs: Arc<dyn FileSystem>,
}

impl KnowledgeService {
    /// Create a new knowledge service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the knowledge tree from `path`.
    ///
    /// A missing or unreadable file yields the bootstrap tree holding only
    /// `seed`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path, seed: &str) -> ApplicationResult<KnowledgeBase> {
        let mut kb = KnowledgeBase::new(seed);

        if !self.fs.exists(path) {
            debug!("load: no knowledge file at {}", path.display());
            return Ok(kb);
        }
        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("load: cannot read {}: {}", path.display(), e);
                return Ok(kb);
            }
        };

        let summary = Self::replay(&mut kb, content)?;
        info!(
            "load: {} animals recovered from {}",
            summary.learned + 1,
            path.display()
        );
        Ok(kb)
    }

    /// Replay transcript `content` onto `kb` without any output.
    ///
    /// The first line stands for the bootstrap animal and is skipped.
    pub fn replay(kb: &mut KnowledgeBase, content: String) -> ApplicationResult<SessionSummary> {
        let mut muted = MutedMessenger::from_content(content);
        muted.read_line();
        let summary = TraversalEngine::new().play(kb, &mut muted)?;
        debug!("replay: consumed {} lines", muted.lines_read());
        Ok(summary)
    }

    /// Consume `kb` and return the transcript file content.
    pub fn transcript(kb: KnowledgeBase) -> ApplicationResult<String> {
        let lines = kb.into_transcript()?;
        Ok(render_transcript(&lines))
    }

    /// Consume `kb` and write its transcript to `path`.
    ///
    /// Returns the number of lines written.
    #[instrument(level = "debug", skip(self, kb))]
    pub fn save(&self, path: &Path, kb: KnowledgeBase) -> ApplicationResult<usize> {
        let lines = kb.into_transcript()?;
        let content = render_transcript(&lines);

        self.fs
            .ensure_parent(path)
            .with_path_context("create knowledge directory", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write knowledge file", path)?;
        info!("save: {} lines written to {}", lines.len(), path.display());
        Ok(lines.len())
    }
}
