pub mod types;

mod client;

pub use client::HttpBackend;
pub use types::{
    ActionRequest, ActionResponse, ApiError, Field, FieldId, Livestock, NasaData, PlayerRequest,
    PlayerResponse, Quest, RegionInfo, Snapshot,
};

/// The three calls the client makes against the farm backend.
///
/// Implementations block; callers keep them off the render thread.
pub trait GameBackend: Send + Sync {
    /// `POST /api/player`
    fn create_or_resume(&self, request: &PlayerRequest) -> Result<PlayerResponse, ApiError>;

    /// `POST /api/perform_action`
    fn perform_action(&self, request: &ActionRequest) -> Result<ActionResponse, ApiError>;

    /// `GET /api/game_state`
    fn environment(&self) -> Result<NasaData, ApiError>;
}
