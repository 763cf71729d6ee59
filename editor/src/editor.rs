//! The editor aggregate: the scene being edited plus its undo/redo history.

use vellum_core::abstract_editor::{AsAny, EditActionHistory};
use vellum_scene::Scene;

use crate::command::SceneCommand;
use crate::settings::EditorSettings;

/// A scene and the history of commands recorded against it.
///
/// Batch operations in [`mutate`](crate::mutate) mutate `scene` directly and
/// push one [`SceneCommand`] per operation onto `history`.
pub struct Editor {
    pub scene: Scene,
    /// Undo/redo history for scene commands.
    pub history: EditActionHistory<Scene>,
    settings: EditorSettings,
}

impl Editor {
    /// Creates an editor over an empty scene.
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_scene(Scene::new(), settings)
    }

    /// Creates an editor over an existing scene.
    pub fn with_scene(scene: Scene, settings: EditorSettings) -> Self {
        let history = EditActionHistory::new(settings.history.max_undo);
        log::info!(
            "Editor initialized ({} graphics, max undo {})",
            scene.len(),
            settings.history.max_undo
        );
        Self {
            scene,
            history,
            settings,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Records a command whose effect is already applied to the scene.
    pub fn push_command(&mut self, command: impl Into<SceneCommand>) {
        self.history.push(Box::new(command.into()));
    }

    /// The command the next [`undo`](Self::undo) would revert.
    pub fn last_command(&self) -> Option<&SceneCommand> {
        self.history.last_action()?.as_any().downcast_ref()
    }

    /// Undoes the most recent command. Returns `false` if there was nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        if let Err(e) = self.history.undo(&mut self.scene) {
            log::warn!("Undo failed: {e}");
            return false;
        }
        true
    }

    /// Redoes the most recently undone command. Returns `false` if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Err(e) = self.history.redo(&mut self.scene) {
            log::warn!("Redo failed: {e}");
            return false;
        }
        true
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("graphics", &self.scene.len())
            .field("history", &self.history)
            .field("settings", &self.settings)
            .finish()
    }
}
