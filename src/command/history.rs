use super::{Command, CommandResult};
use crate::scene::Scene;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command and record it. The redo stack is cleared on success;
    /// a failed command leaves both stacks untouched.
    pub fn execute(&mut self, command: Command, scene: &mut Scene) -> CommandResult {
        command.execute(scene)?;
        log::info!("Executed: {}", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the last executed command. Does nothing when there is none.
    pub fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(());
        };
        if let Err(err) = command.undo(scene) {
            log::warn!("Undo of '{}' failed: {err}", command.label());
            self.undo_stack.push(command);
            return Err(err);
        }
        log::info!("Undid: {}", command.label());
        self.redo_stack.push(command);
        Ok(())
    }

    /// Redo the last undone command. Does nothing when there is none.
    pub fn redo(&mut self, scene: &mut Scene) -> CommandResult {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(());
        };
        if let Err(err) = command.execute(scene) {
            log::warn!("Redo of '{}' failed: {err}", command.label());
            self.redo_stack.push(command);
            return Err(err);
        }
        log::info!("Redid: {}", command.label());
        self.undo_stack.push(command);
        Ok(())
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Oldest first
    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
