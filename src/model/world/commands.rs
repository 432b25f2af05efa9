use crate::model::events::GuiCommand;
use crate::model::world::World;

impl World {
    /// Applies every queued command in arrival order.
    pub(crate) fn apply_commands(&mut self) {
        loop {
            // Release the borrow before handling; a reset may publish.
            let next = self.inbox.borrow_mut().pop_front();
            let Some(command) = next else {
                break;
            };
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: GuiCommand) {
        match command {
            GuiCommand::AppQuit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            GuiCommand::SimTogglePause => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, "Simulation pause toggled");
            }
            GuiCommand::FileNewSimulation => {
                self.reset();
            }
            GuiCommand::FileLoadSimulation
            | GuiCommand::FileSaveSimulation
            | GuiCommand::ViewShowMenu => {
                tracing::debug!(?command, "Command left to the host");
            }
            GuiCommand::None => {}
        }
    }

    /// Destroys every entity, clears component data and restarts ids.
    ///
    /// The event bus and its subscriptions are kept.
    pub fn reset(&mut self) -> usize {
        let destroyed = self.ecs.reset_all();
        self.spatial_hash.clear();
        self.frame = 0;
        self.metrics.reset();
        tracing::info!(destroyed, "World reset");
        destroyed
    }
}
