//! Window event handling: keys into the session, resizes into the viewport.

use winit::event::WindowEvent;
use winit::keyboard::PhysicalKey;

use crate::App;

impl App {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::Resized(size) => {
                self.session.viewport.resize(size.width, size.height);
                log::debug!(
                    "Viewport {}x{} (aspect {:.2}, fov {}, clip {}..{})",
                    self.session.viewport.width,
                    self.session.viewport.height,
                    self.session.viewport.aspect(),
                    self.session.viewport.fov_degrees,
                    self.session.viewport.near,
                    self.session.viewport.far
                );
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = self.bindings.resolve(key, event.state, event.repeat) {
                        self.session.handle_action(action);
                    }
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                false
            }
            _ => false,
        }
    }
}
