use tokio::sync::watch;

use crate::deployment::Deployment;
use crate::simulation::Simulator;
use crate::utils::shutdown::ShutdownHandle;

pub mod simulate;

pub struct TaskParams {
    pub simulator: Simulator,
    /// Stop once no deployment is in transit anymore.
    pub until_complete: bool,
    pub fleet: watch::Sender<Vec<Deployment>>,
    pub shutdown: ShutdownHandle,
}
