mod commands;
mod history;

use thiserror::Error;

use crate::error::CanvasError;
use crate::id_generator::ItemId;

pub use commands::Command;
pub use history::CommandHistory;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command targets an item that is not in the scene
    #[error("item {0} not found")]
    ItemNotFound(ItemId),
    /// The command parameters do not fit the target item
    #[error("invalid command parameters")]
    InvalidParameters,
    /// The scene rejected the change
    #[error(transparent)]
    Scene(#[from] CanvasError),
}
