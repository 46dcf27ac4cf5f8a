//! Game session service
//!
//! One session: load the knowledge file, play live, save what was learned.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::services::{KnowledgeService, SessionSummary, TraversalEngine};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, Messenger};

/// Service running complete game sessions.
pub struct GameService {
    settings: Arc<Settings>,
    knowledge: KnowledgeService,
}

impl GameService {
    /// Create a new game service.
    pub fn new(settings: Arc<Settings>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings,
            knowledge: KnowledgeService::new(fs),
        }
    }

    /// Play one session against `io`.
    ///
    /// Saving is best effort: a failed write is logged and the session
    /// still counts as played. The tree is saved before an error from the
    /// session itself is returned.
    #[instrument(level = "debug", skip_all)]
    pub fn play(&self, io: &mut dyn Messenger) -> ApplicationResult<SessionSummary> {
        let path = &self.settings.knowledge_file;
        let mut kb = self.knowledge.load(path, &self.settings.seed_animal)?;

        // Keep what was learned even if the session broke off
        let played = TraversalEngine::new()
            .with_intro(self.settings.intro)
            .play(&mut kb, io);
        if let Err(e) = self.knowledge.save(path, kb) {
            warn!("play: knowledge not saved: {}", e);
        }

        let summary = played?;
        info!(
            "play: {} rounds, {} wins, {} learned",
            summary.rounds, summary.wins, summary.learned
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::{ConsoleMessenger, RealFileSystem};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn settings(temp: &TempDir) -> Settings {
        Settings {
            knowledge_file: temp.path().join("knowledge.txt"),
            seed_animal: "cat".to_string(),
            intro: false,
        }
    }

    fn play(service: &GameService, input: &str) -> SessionSummary {
        let mut io = ConsoleMessenger::new(Cursor::new(input.to_string()), Vec::new());
        service.play(&mut io).unwrap()
    }

    #[test]
    fn given_two_sessions_then_second_remembers_first() {
        let temp = TempDir::new().unwrap();
        let service = GameService::new(Arc::new(settings(&temp)), Arc::new(RealFileSystem));

        let first = play(&service, "No\ndog\nDoes it bark?\n\n");
        assert_eq!(first.learned, 1);

        // bark -> yes -> dog is guessed right
        let second = play(&service, "Yes\nYes\nQuit\n");
        assert_eq!(second.wins, 1);
        assert_eq!(second.learned, 0);
    }

    /// Answers from a script, fails every line it has to write.
    struct ClosedOutput {
        answers: std::vec::IntoIter<&'static str>,
    }

    impl Messenger for ClosedOutput {
        fn say(&mut self, _text: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "output closed",
            ))
        }

        fn prompt(&mut self, _text: &str) -> std::io::Result<()> {
            Ok(())
        }

        fn read_line(&mut self) -> Option<String> {
            self.answers.next().map(str::to_string)
        }
    }

    #[test]
    fn given_broken_output_after_learning_when_playing_then_knowledge_is_saved() {
        let temp = TempDir::new().unwrap();
        let s = settings(&temp);
        let path = s.knowledge_file.clone();
        let service = GameService::new(Arc::new(s), Arc::new(RealFileSystem));
        let mut io = ClosedOutput {
            answers: vec!["No", "dog", "Does it bark?"].into_iter(),
        };

        let result = service.play(&mut io);

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "cat\nNo\ndog\nDoes it bark?\n"
        );
    }

    #[test]
    fn given_unwritable_path_when_playing_then_session_still_succeeds() {
        let temp = TempDir::new().unwrap();
        let mut s = settings(&temp);
        // a directory cannot be written as a file
        s.knowledge_file = temp.path().to_path_buf();
        let service = GameService::new(Arc::new(s), Arc::new(RealFileSystem));

        let summary = play(&service, "Yes\n\n");
        assert_eq!(summary.wins, 1);
    }
}
