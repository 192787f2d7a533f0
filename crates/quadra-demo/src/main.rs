use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use quadra_driver::logging::{init_logging, LoggingConfig};
use quadra_driver::{Driver, DriverConfig, DriverError, NativeWindow, SurfaceErrorAction};

mod scene;

use scene::Scene;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut demo = Demo::default();

    event_loop
        .run_app(&mut demo)
        .context("winit event loop terminated with error")?;

    match demo.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Window plus the driver presenting into it.
struct Session {
    window: Arc<Window>,
    driver: Driver,
    scene: Scene,
}

impl Session {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("quadra")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let host: Arc<dyn NativeWindow> = window.clone();
        let mut driver =
            Driver::new(DriverConfig::default(), Some(host)).context("failed to start driver")?;
        driver.reset().context("driver reset failed")?;

        let size = window.inner_size();
        let scene = Scene::new(&mut driver, size.width, size.height)?;

        Ok(Self {
            window,
            driver,
            scene,
        })
    }
}

#[derive(Default)]
struct Demo {
    session: Option<Session>,
    failure: Option<anyhow::Error>,
}

impl Demo {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        // Drop the driver (and its worker) before the window goes away.
        self.session = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match Session::new(event_loop) {
            Ok(session) => {
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(err) => self.fail(event_loop, err.context("failed to start demo")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let result = match event {
            WindowEvent::CloseRequested => {
                self.session = None;
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => session
                .scene
                .resize(&mut session.driver, size.width, size.height)
                .context("failed to resize screen"),

            WindowEvent::RedrawRequested => match session.scene.frame(&mut session.driver) {
                // A lost or outdated surface has already been reconfigured.
                Err(DriverError::Drawable { action, .. }) if action != SurfaceErrorAction::Fatal => {
                    log::debug!("skipped frame ({action:?})");
                    Ok(())
                }
                other => other.context("frame failed"),
            },

            _ => Ok(()),
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }
}
