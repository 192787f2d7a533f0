use crate::device::DriverResult;

/// The steps of one synchronous draw cycle.
///
/// [`run_cycle`] fixes the order; implementations only say what each step
/// does. An asynchronous, multi-buffered policy would replace `run_cycle`
/// without touching the facade.
pub trait FrameStages {
    /// Render target resolved for this draw (e.g. an acquired drawable).
    type Target;
    /// Recorded, not yet submitted, GPU work.
    type Commands;

    fn acquire(&mut self) -> DriverResult<Self::Target>;
    fn encode(&mut self, target: &Self::Target) -> DriverResult<Self::Commands>;
    fn commit(&mut self, commands: Self::Commands) -> DriverResult<()>;
    /// Presents the target if it is presentable; otherwise a no-op.
    fn present(&mut self, target: Self::Target) -> DriverResult<()>;
    /// Blocks until the committed work has completed.
    fn wait(&mut self) -> DriverResult<()>;
}

/// acquire → encode → commit → present → wait.
///
/// A failed step ends the cycle; nothing after it runs.
pub fn run_cycle<S: FrameStages>(stages: &mut S) -> DriverResult<()> {
    let target = stages.acquire()?;
    let commands = stages.encode(&target)?;
    stages.commit(commands)?;
    stages.present(target)?;
    stages.wait()
}
