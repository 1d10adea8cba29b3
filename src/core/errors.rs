/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::block::Collection;
use crate::core::types::BlockId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Simulator errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Out of memory building initial state: {reason}")]
    #[diagnostic(
        code(memsim::resource_exhaustion),
        help("The host could not reserve memory for the block arena. The simulation cannot start without its initial state.")
    )]
    ResourceExhaustion { reason: String },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(memsim::invalid_config),
        help("Check MEMSIM_* environment overrides and SimConfig values.")
    )]
    InvalidConfig(String),

    #[error("Block {id} is not a member of the {collection} collection")]
    #[diagnostic(
        code(memsim::not_a_member),
        help("detach/relocate was invoked against the wrong collection. This is a logic defect, not a recoverable condition.")
    )]
    NotAMember { id: BlockId, collection: Collection },

    #[error("Block {id} is already linked into a collection")]
    #[diagnostic(
        code(memsim::already_member),
        help("A block must be detached before it can be appended elsewhere.")
    )]
    AlreadyMember { id: BlockId },

    #[error("Stale block handle (index {index}, generation {generation})")]
    #[diagnostic(
        code(memsim::stale_handle),
        help("The handle outlived its block, most likely across a coalescing pass.")
    )]
    StaleHandle { index: u32, generation: u32 },

    #[error("Collection links corrupted: {detail}")]
    #[diagnostic(
        code(memsim::link_corruption),
        help("An invariant audit failed. The shared state can no longer be trusted.")
    )]
    LinkCorruption { detail: String },

    #[error("Failed to start {actor} actor: {reason}")]
    #[diagnostic(
        code(memsim::actor_startup),
        help("Thread creation failed. Check host thread limits.")
    )]
    ActorStartup { actor: String, reason: String },

    #[error("The {actor} actor terminated abnormally")]
    #[diagnostic(
        code(memsim::actor_panicked),
        help("An actor panicked, most likely on an integrity failure. See the log stream for the diagnostic.")
    )]
    ActorPanicked { actor: String },
}
