#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The `(user, content)` pair already has a bookmark.
    #[error("Place {content_id} is already bookmarked")]
    AlreadyBookmarked { content_id: String },

    /// A projected coordinate string could not be turned into a finite number.
    #[error("Invalid coordinate: map_x={map_x}, map_y={map_y}")]
    InvalidCoordinate { map_x: String, map_y: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
