#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write output")]
    Write(#[from] std::io::Error),
    #[error("failed to encode JSON")]
    Json(#[from] serde_json::Error),
    #[error("failed to draw chart")]
    Draw(#[from] crate::draw::DrawError),
    #[error(transparent)]
    Location(#[from] crate::commands::LocationError),
    #[error(transparent)]
    Approval(#[from] crate::approvals::ApprovalError),
    #[error(transparent)]
    Simulation(#[from] crate::simulation::SimulationError),
    #[error("unknown vehicle type `{0}`")]
    UnknownVehicle(String),
    #[error("failed to format timestamp")]
    Time(#[from] time::error::Format),
}
