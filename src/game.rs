//! Frame driver
//!
//! [`Game`] owns the world and the renderer. Commands may arrive from any
//! thread through [`Game::command_sender`]; they are applied at the start of
//! the next [`Game::update`], so a frame never sees a control flag change
//! halfway through.
//!
//! Relayed frames are routed by event name through [`Game::handle_event`]:
//! commands steer the ship and a report request is answered with this
//! client's [`ClientStatus`].

use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::Result;
use crate::protocol::{
    CLIENT_COMMAND, CLIENT_REPORT, CLIENT_STATUS, ClientStatus, Command, CommandMessage,
    CommandState,
};
use crate::relay::RelayFrame;
use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::{self, GameWorld};

/// Reported as the `browser` field of [`ClientStatus`]
pub const CLIENT_AGENT: &str = concat!("asteroid-field/", env!("CARGO_PKG_VERSION"));

pub struct Game<R: Renderer> {
    world: GameWorld,
    renderer: R,
    commands_tx: Sender<CommandMessage>,
    commands_rx: Receiver<CommandMessage>,
    destroyed: bool,
}

impl<R: Renderer> Game<R> {
    /// Create the world described by `settings` and attach a renderer
    pub fn new(settings: &Settings, renderer: R) -> Result<Self> {
        settings.validate()?;
        let world = sim::create_world(
            settings.world_width,
            settings.world_height,
            settings.seed,
            settings.asteroid_count,
            settings.max_placement_attempts,
        )?;
        Ok(Self::from_world(world, renderer))
    }

    pub fn from_world(world: GameWorld, renderer: R) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel();
        Self {
            world,
            renderer,
            commands_tx,
            commands_rx,
            destroyed: false,
        }
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Queue endpoint for input/network threads
    pub fn command_sender(&self) -> Sender<CommandMessage> {
        self.commands_tx.clone()
    }

    /// Apply a command right away (same-thread input)
    pub fn handle_command(&mut self, command: Command, state: CommandState) {
        sim::handle_command(&mut self.world, command, state);
    }

    /// Apply a relayed wire frame; unknown commands are ignored
    pub fn handle_frame(&mut self, frame: &str) -> Result<()> {
        match CommandMessage::decode(frame)? {
            Some(msg) => self.handle_command(msg.command, msg.state),
            None => log::debug!("Ignoring unknown command frame {}", frame),
        }
        Ok(())
    }

    /// Status answered to a report request
    pub fn client_status(&self) -> ClientStatus {
        let (width, height) = self.renderer.viewport();
        ClientStatus {
            browser: CLIENT_AGENT.to_string(),
            width,
            height,
        }
    }

    /// Route one relayed frame by event name.
    ///
    /// Returns the reply to send back, if the event expects one. Events this
    /// client does not handle (including other clients' status replies) are
    /// ignored.
    pub fn handle_event(&mut self, frame: &RelayFrame) -> Result<Option<RelayFrame>> {
        match frame.event.as_str() {
            CLIENT_COMMAND => {
                self.handle_frame(&frame.payload)?;
                Ok(None)
            }
            CLIENT_REPORT => {
                let status = self.client_status();
                log::debug!("Reporting status {:?}", status);
                Ok(Some(RelayFrame::new(CLIENT_STATUS, &status.encode())))
            }
            other => {
                log::trace!("Ignoring {} event", other);
                Ok(None)
            }
        }
    }

    /// Run one frame: drain queued commands, step the world, draw it
    pub fn update(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        while let Ok(msg) = self.commands_rx.try_recv() {
            sim::handle_command(&mut self.world, msg.command, msg.state);
        }
        sim::tick(&mut self.world);
        self.renderer.update_scene(&self.world)?;
        self.renderer.render();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    pub fn handle_mouse(&mut self, x: f64, y: f64) {
        self.renderer.mouse_click(x, y);
    }

    /// Release the renderer; later updates do nothing
    pub fn destroy(&mut self) {
        if !self.destroyed {
            self.renderer.destroy();
            self.destroyed = true;
        }
    }
}
