//! `GameSession`: one round of Rat Plague, owning every body, controller and
//! HUD element. The frame loop calls [`GameSession::update`]; input and the
//! restart control call into it between frames.

use engine_core::{MeshPose, Name, Transform};
use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use input::{Action, ActionEvent};
use physics::{PhysicsBody, PhysicsWorld};

use crate::assets::ModelBundle;
use crate::config::{GameConfig, RestartScope};
use crate::error::{AssetError, SetupError};
use crate::hud::{Hud, Viewport, DEATH_MESSAGE};
use crate::locomotion::LocomotionController;
use crate::outcome::{self, Outcome, OutcomeRegion, PlacedRegion};
use crate::patrol::PatrolPath;
use crate::room::{self, Room, GRAVITY, PLAYER_START};
use crate::state::GamePhase;
use crate::tuning::Tuning;

pub struct GameSession {
    pub physics: PhysicsWorld,
    pub world: World,
    pub room: Room,
    pub locomotion: LocomotionController,
    pub patrol: PatrolPath,
    /// Roomba position the patrol writes; the body catches up on the next step.
    hazard_xz: Vec2,
    pub phase: GamePhase,
    pub hud: Hud,
    pub viewport: Viewport,
    tuning: Tuning,
    restart_scope: RestartScope,
    models: Vec<ModelBundle>,
}

impl GameSession {
    /// Build the room. Variants that load models start in `Loading`.
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        let tuning = config.variant.tuning();
        let patrol = PatrolPath::new(room::patrol_route(), tuning.patrol_speed, tuning.arrival_epsilon)?;

        let mut physics = PhysicsWorld::with_gravity(GRAVITY);
        let mut world = World::new();
        let room = Room::build(&mut physics, &mut world, patrol.start());

        let phase = if tuning.loads_assets {
            GamePhase::Loading
        } else {
            GamePhase::Playing
        };
        log::info!("Session ready for {:?} in {:?}", config.variant, phase);

        Ok(Self {
            physics,
            world,
            room,
            locomotion: LocomotionController::new(&tuning),
            hazard_xz: patrol.start(),
            patrol,
            phase,
            hud: Hud::default(),
            viewport: Viewport::new(config.window_width, config.window_height, tuning.fov_degrees),
            tuning,
            restart_scope: config.restart_scope,
            models: Vec::new(),
        })
    }

    /// Hand over the result of model loading. Failure is fatal: the session
    /// stays in `Loading` with the error on screen.
    pub fn complete_loading(&mut self, result: Result<Vec<ModelBundle>, AssetError>) {
        match result {
            Ok(models) => match self.phase.begin() {
                Ok(next) => {
                    log::info!("Loaded {} model bundles, starting play", models.len());
                    self.models = models;
                    self.phase = next;
                }
                Err(e) => log::warn!("Ignoring late asset load: {}", e),
            },
            Err(e) => {
                log::error!("Asset loading failed: {}", e);
                self.hud.show_message(format!("Failed to load assets: {}", e));
            }
        }
    }

    pub fn models(&self) -> &[ModelBundle] {
        &self.models
    }

    /// Advance one frame. Does nothing to gameplay outside `Playing`.
    pub fn update(&mut self, dt: f32) {
        if self.phase.is_active() {
            let player = self.body(self.room.player);
            let velocity = self.physics.body_velocity(player).unwrap_or(Vec3::ZERO);
            let command = self.locomotion.update(velocity, dt);
            if let Some(force) = command.force {
                self.physics.apply_force(player, force);
            }
            if let Some(impulse) = command.impulse {
                self.physics.apply_impulse(player, impulse);
            }

            self.hazard_xz = self.patrol.advance(self.hazard_xz, dt);
            let hazard = self.body(self.room.hazard);
            self.physics
                .set_kinematic_position(hazard, room::hazard_position(self.hazard_xz));

            self.physics.step();
            self.sync_transforms();

            if let Some(outcome) = self.check_outcome() {
                self.conclude(outcome);
            }
        }
        self.hud.refresh_dash(&self.locomotion.dash);
    }

    /// Run the outcome check against current body positions without changing anything.
    pub fn check_outcome(&self) -> Option<Outcome> {
        if !self.phase.is_active() {
            return None;
        }
        let player = self.physics.body_position(self.body(self.room.player))?;
        let traps = self.room.traps.iter().filter_map(|&e| self.placed(e));
        outcome::check(
            player,
            traps,
            self.placed(self.room.hazard).as_ref(),
            self.placed(self.room.goal).as_ref(),
        )
    }

    /// Check outcomes and apply any terminal transition. Returns what fired.
    pub fn evaluate_outcome(&mut self) -> Option<Outcome> {
        let outcome = self.check_outcome()?;
        self.conclude(outcome);
        Some(outcome)
    }

    fn conclude(&mut self, outcome: Outcome) {
        match self.phase.conclude(outcome) {
            Ok(next) => {
                log::info!("Round over: {:?} ({})", outcome, self.touched(outcome));
                self.phase = next;
                let message = if outcome.is_death() {
                    DEATH_MESSAGE
                } else {
                    self.tuning.win_message
                };
                self.hud.show_outcome(message);
            }
            Err(e) => log::warn!("{}", e),
        }
    }

    /// Name of the prop behind an outcome.
    pub fn touched(&self, outcome: Outcome) -> &'static str {
        let entity = match outcome {
            Outcome::CaughtByTrap(i) => self.room.traps.get(i).copied(),
            Outcome::CaughtByHazard => Some(self.room.hazard),
            Outcome::ReachedGoal => Some(self.room.goal),
        };
        entity
            .and_then(|e| self.world.get::<&Name>(e).ok().map(|name| name.0))
            .unwrap_or("unknown")
    }

    /// The restart control. Only honoured after a round has ended.
    pub fn restart(&mut self) {
        let next = match self.phase.restart() {
            Ok(next) => next,
            Err(e) => {
                log::debug!("{}", e);
                return;
            }
        };

        let player = self.body(self.room.player);
        self.physics.reset_body(player, PLAYER_START);
        self.locomotion.reset();

        if self.restart_scope == RestartScope::Full {
            self.patrol.rewind();
            self.hazard_xz = self.patrol.start();
            let hazard = self.body(self.room.hazard);
            self.physics
                .reset_body(hazard, room::hazard_position(self.hazard_xz));
        }

        self.sync_transforms();
        self.phase = next;
        self.hud.clear_outcome();
        self.hud.refresh_dash(&self.locomotion.dash);
        log::info!("Restarted ({:?})", self.restart_scope);
    }

    /// Apply a resolved key edge.
    ///
    /// Presses only count while playing (restart only after a round ends);
    /// releases always clear their flag.
    pub fn handle_action(&mut self, event: ActionEvent) {
        if event.action == Action::Restart {
            if event.is_initial_press() && self.phase.is_terminal() {
                self.restart();
            }
            return;
        }

        let pressed = event.is_press();
        if pressed && !self.phase.is_active() {
            return;
        }
        if event.action == Action::Dash {
            if event.is_initial_press() {
                self.locomotion.request_dash();
            } else if !pressed {
                self.locomotion.input.dash_requested = false;
            }
            return;
        }

        let input = &mut self.locomotion.input;
        match event.action {
            Action::Forward => input.forward = pressed,
            Action::Backward => input.backward = pressed,
            Action::Left => input.left = pressed,
            Action::Right => input.right = pressed,
            Action::Dash | Action::Restart => {}
        }
    }

    /// Copy body poses onto scene transforms for the presentation layer.
    pub fn sync_transforms(&mut self) {
        for (_, (body, transform, pose)) in self
            .world
            .query_mut::<(&PhysicsBody, &mut Transform, &MeshPose)>()
        {
            let Some(position) = self.physics.body_position(body.rigid_body) else {
                continue;
            };
            transform.position = position;
            if let Some(height) = pose.fixed_height {
                transform.position.y = height;
            }
            if pose.face_velocity {
                let velocity = self.physics.body_velocity(body.rigid_body).unwrap_or(Vec3::ZERO);
                transform.face_planar_velocity(velocity);
            }
        }
    }

    /// Scene transform of an entity, as last synced.
    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// Live player position from the physics world.
    pub fn player_position(&self) -> Vec3 {
        self.physics
            .body_position(self.body(self.room.player))
            .unwrap_or(PLAYER_START)
    }

    pub fn hazard_position(&self) -> Vec2 {
        self.hazard_xz
    }

    fn body(&self, entity: Entity) -> physics::RigidBodyHandle {
        self.world
            .get::<&PhysicsBody>(entity)
            .map(|b| b.rigid_body)
            .unwrap_or_else(|_| physics::RigidBodyHandle::invalid())
    }

    fn placed(&self, entity: Entity) -> Option<PlacedRegion> {
        let region = *self.world.get::<&OutcomeRegion>(entity).ok()?;
        let center = self.physics.body_position(self.body(entity))?;
        Some(PlacedRegion { region, center })
    }
}
