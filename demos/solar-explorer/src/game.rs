/// Solar Explorer: sun and eight planets on circular orbits, hover slow-motion,
/// click-to-observe, and scripted warp travel between planets.
///
/// The host renders spheres from the instance buffer, draws orbit rings from
/// the catalog JSON, and drives the UI from the per-tick game events.

use glam::Vec2;
use helio_engine::*;

use crate::bodies::{self, CelestialBody, PLANETS, PLANET_COUNT};
use crate::config::ExplorerConfig;
use crate::facts::{FactDesk, FactOrigin, FactView};
use crate::hover::HoverModulator;
use crate::selection::{SelectOutcome, Selection};
use crate::travel::{CameraRig, RigOutcome};
use crate::warp::WarpTunnel;

// ── Custom event kinds from the host ─────────────────────────────────

const CUSTOM_SELECT: u32 = 1;
const CUSTOM_TOGGLE_NAV: u32 = 2;
const CUSTOM_TRAVEL: u32 = 3;
const CUSTOM_SET_TRAVEL_SPEED: u32 = 4;
const CUSTOM_ZOOM: u32 = 5;
const CUSTOM_POINTER_LEAVE: u32 = 6;
/// Two-finger / modifier drag: a = dx, b = dy in viewport pixels.
const CUSTOM_PAN: u32 = 7;
/// Viewport resize (sent by the worker as kind=99).
const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ─────────────────────────────────────

pub const EVENT_FOCUS: f32 = 1.0;
pub const EVENT_TRAVEL: f32 = 2.0;
pub const EVENT_HOVER: f32 = 3.0;
pub const EVENT_FACT: f32 = 4.0;
pub const EVENT_ARRIVED: f32 = 5.0;
pub const EVENT_CLOCK: f32 = 6.0;

// ── Camera / input ───────────────────────────────────────────────────

/// World-unit drag distance before a click becomes a drag.
const DRAG_THRESHOLD: f32 = 5.0;
/// Multiplicative dolly per wheel tick.
const ZOOM_STEP: f32 = 1.05;
/// Extra on-screen slack around a planet for hover and click.
const HIT_PADDING: f32 = 4.0;
/// Warp stars use their own stream so tunnel layout does not shift camera jitter.
const WARP_SEED: u64 = 0x5741_5250;

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn index_or_none(index: Option<usize>) -> f32 {
    index.map(|i| i as f32).unwrap_or(-1.0)
}

pub struct SolarExplorer {
    config: ExplorerConfig,
    clock: SimClock,
    hover: HoverModulator,
    selection: Selection,
    rig: CameraRig,
    facts: FactDesk,
    warp: WarpTunnel,
    max_points: usize,
    last_travel: RigOutcome,

    sun_id: Option<EntityId>,
    planet_ids: [Option<EntityId>; PLANET_COUNT],

    // Drag state
    dragging: bool,
    drag_moved: bool,
    drag_start: Vec2,
    last_pointer: Vec2,
}

impl SolarExplorer {
    pub fn new() -> Self {
        Self::with_config(ExplorerConfig::default())
    }

    pub fn with_config(config: ExplorerConfig) -> Self {
        let hover = HoverModulator::new(config.hover.slow_factor, config.hover.normal_factor);
        let rig = CameraRig::new(config.rig.clone());
        let facts = FactDesk::new(config.facts.source());
        let warp = WarpTunnel::new(config.warp.clone(), &mut Rng::new(WARP_SEED));
        let max_points = Self::point_capacity(&config);
        Self {
            config,
            clock: SimClock::new(),
            hover,
            selection: Selection::new(),
            rig,
            facts,
            warp,
            max_points,
            last_travel: RigOutcome::default(),
            sun_id: None,
            planet_ids: [None; PLANET_COUNT],
            dragging: false,
            drag_moved: false,
            drag_start: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
        }
    }

    /// Point section size: room for the whole tunnel, never below the engine default.
    fn point_capacity(config: &ExplorerConfig) -> usize {
        config.warp.star_count.max(GameConfig::default().max_points)
    }

    /// Merge a JSON override into the settings. Malformed input is logged and ignored.
    pub fn configure(&mut self, json: &str) {
        let config = match ExplorerConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed configuration: {e}");
                return;
            }
        };
        // Leave slow motion cleanly before the factors change.
        self.hover.exit(&mut self.clock);
        self.hover = HoverModulator::new(config.hover.slow_factor, config.hover.normal_factor);
        self.rig = CameraRig::new(config.rig.clone());
        self.facts.set_source(config.facts.source());
        let active = self.warp.is_active();
        self.warp = WarpTunnel::new(config.warp.clone(), &mut Rng::new(WARP_SEED));
        self.warp.set_active(active);
        if config.warp.star_count > self.max_points {
            // The buffer is sized once, when the runner is built.
            log::warn!(
                "warp star_count {} exceeds point capacity {}; extra stars are not drawn",
                config.warp.star_count,
                self.max_points
            );
        }
        self.config = config;
        log::info!("configuration updated");
    }

    pub fn settings(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn facts(&self) -> &FactDesk {
        &self.facts
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered()
    }

    pub fn warp_active(&self) -> bool {
        self.warp.is_active()
    }

    // ── Actions ────────────────────────────────────────────────────

    fn select(&mut self, body: usize) {
        if self.selection.select(body) == SelectOutcome::Changed {
            self.facts.request(body);
        }
    }

    fn deselect(&mut self) {
        if self.selection.deselect() {
            self.facts.clear();
        }
    }

    fn travel(&mut self, body: usize) {
        if self.selection.start_travel(body) {
            self.facts.clear();
            let planet = &PLANETS[body];
            log::info!(
                "travelling to {} ({}) at {}x",
                planet.short_name(),
                planet.alt_name().unwrap_or(planet.id),
                self.selection.travel_speed()
            );
        }
    }

    /// Front-most planet under a viewport point at simulation time `t`.
    fn hit_test(camera: &Camera3D, point: Vec2, t: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, planet) in PLANETS.iter().enumerate() {
            let Some((screen, depth)) = camera.project(planet.position(t)) else {
                continue;
            };
            let reach = camera.projected_radius(planet.radius, depth) + HIT_PADDING;
            if screen.distance(point) <= reach && best.map_or(true, |(_, d)| depth < d) {
                best = Some((i, depth));
            }
        }
        best.map(|(i, _)| i)
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::Custom { kind, a, b, .. } => match kind {
                CUSTOM_SELECT => match bodies::index_from_event(a) {
                    Some(body) => self.select(body),
                    None => self.deselect(),
                },
                CUSTOM_TOGGLE_NAV => self.selection.toggle_nav(),
                CUSTOM_TRAVEL => {
                    if let Some(body) = bodies::index_from_event(a) {
                        self.travel(body);
                    }
                }
                CUSTOM_SET_TRAVEL_SPEED => self.selection.set_travel_speed(a),
                CUSTOM_ZOOM => {
                    // a = direction (+1 zoom in, -1 zoom out)
                    if a > 0.0 {
                        ctx.camera.dolly(1.0 / ZOOM_STEP);
                    } else if a < 0.0 {
                        ctx.camera.dolly(ZOOM_STEP);
                    }
                }
                CUSTOM_POINTER_LEAVE => {
                    self.hover.exit(&mut self.clock);
                    self.dragging = false;
                    self.drag_moved = false;
                }
                CUSTOM_PAN => ctx.camera.pan(Vec2::new(a, b)),
                CUSTOM_RESIZE => ctx.camera.resize(a, b),
                _ => {}
            },
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.drag_moved = false;
                self.drag_start = Vec2::new(x, y);
                self.last_pointer = self.drag_start;
            }
            InputEvent::PointerMove { x, y } => {
                let pos = Vec2::new(x, y);
                if self.dragging {
                    if pos.distance(self.drag_start) > DRAG_THRESHOLD {
                        self.drag_moved = true;
                    }
                    if self.drag_moved {
                        ctx.camera.drag_rotate(pos - self.last_pointer);
                    }
                    self.last_pointer = pos;
                }
                // Hover tracks the pointer during drags too.
                let hit = Self::hit_test(&ctx.camera, pos, self.clock.elapsed_f32());
                self.hover.observe(hit, &mut self.clock);
            }
            InputEvent::PointerUp { x, y } => {
                let hit = Self::hit_test(&ctx.camera, Vec2::new(x, y), self.clock.elapsed_f32());
                if self.dragging && !self.drag_moved {
                    // Click (not a drag). Empty space keeps the current selection.
                    if let Some(body) = hit {
                        self.select(body);
                    }
                }
                self.hover.observe(hit, &mut self.clock);
                self.dragging = false;
                self.drag_moved = false;
            }
        }
    }

    /// Move entities to their orbit positions and apply highlight state.
    fn sync_entities(&self, ctx: &mut EngineContext, t: f32) {
        if let Some(entity) = self.sun_id.and_then(|id| ctx.scene.get_mut(id)) {
            entity.rotation += bodies::SUN_SPIN;
        }
        let selected = self.selection.focus().selected();
        for (i, planet) in PLANETS.iter().enumerate() {
            let Some(entity) = self.planet_ids[i].and_then(|id| ctx.scene.get_mut(id)) else {
                continue;
            };
            entity.pos = planet.position(t);
            entity.rotation += bodies::PLANET_SPIN;
            let highlighted = selected == Some(i) || self.hover.hovered() == Some(i);
            if let Some(mesh) = entity.mesh.as_mut() {
                mesh.halo = highlighted;
                mesh.emissive = if highlighted {
                    bodies::EMISSIVE_HIGHLIGHT
                } else {
                    bodies::EMISSIVE_IDLE
                };
            }
        }
    }

    fn fact_code(&self) -> (f32, Option<usize>) {
        match self.facts.view() {
            FactView::Hidden => (0.0, None),
            FactView::Loading { body } => (1.0, Some(*body)),
            FactView::Ready { body, origin: FactOrigin::Generated, .. } => (2.0, Some(*body)),
            FactView::Ready { body, origin: FactOrigin::Fallback, .. } => (3.0, Some(*body)),
        }
    }

    /// Per-tick state snapshot. Earlier snapshots from this frame are
    /// dropped so several fixed steps never crowd out one-shot events.
    fn publish_state(&self, ctx: &mut EngineContext) {
        ctx.events.retain(|e| e.kind == EVENT_ARRIVED);

        let focus = self.selection.focus();
        ctx.emit_event(GameEvent {
            kind: EVENT_FOCUS,
            a: index_or_none(focus.selected()),
            b: index_or_none(focus.travel_target()),
            c: flag(self.selection.nav_open()),
        });
        ctx.emit_event(GameEvent {
            kind: EVENT_TRAVEL,
            a: self.selection.travel_speed(),
            b: flag(self.warp.is_active()),
            c: self.last_travel.distance,
        });
        ctx.emit_event(GameEvent {
            kind: EVENT_HOVER,
            a: index_or_none(self.hover.hovered()),
            b: 0.0,
            c: 0.0,
        });
        let (code, body) = self.fact_code();
        ctx.emit_event(GameEvent {
            kind: EVENT_FACT,
            a: code,
            b: index_or_none(body),
            c: 0.0,
        });
        ctx.emit_event(GameEvent {
            kind: EVENT_CLOCK,
            a: self.clock.elapsed_f32(),
            b: self.clock.speed_factor(),
            c: 0.0,
        });
    }
}

impl Default for SolarExplorer {
    fn default() -> Self {
        Self::new()
    }
}

fn planet_mesh(planet: &CelestialBody) -> SphereMesh {
    let mesh = SphereMesh::new(planet.radius, planet.rgb()).with_emissive(bodies::EMISSIVE_IDLE);
    if planet.has_ring {
        mesh.with_ring(RingMesh {
            inner: planet.radius * bodies::RING_INNER,
            outer: planet.radius * bodies::RING_OUTER,
        })
    } else {
        mesh
    }
}

impl Game for SolarExplorer {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_instances: 16,
            max_points: self.max_points,
            max_events: 32,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.camera.position = self.rig.config().home();
        ctx.camera.target = glam::Vec3::ZERO;

        // ── Spawn Sun ────────────────────────────────────────────────
        let sun_color = Rgb::from_hex(bodies::SUN_COLOR).unwrap_or(Rgb::WHITE);
        let sun_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun_id)
                .with_tag("sun")
                .with_mesh(
                    SphereMesh::new(bodies::SUN_RADIUS, sun_color)
                        .with_emissive(bodies::SUN_EMISSIVE),
                ),
        );
        self.sun_id = Some(sun_id);

        // ── Spawn planets ────────────────────────────────────────────
        let t = self.clock.elapsed_f32();
        for (i, planet) in PLANETS.iter().enumerate() {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(planet.id)
                    .with_pos(planet.position(t))
                    .with_mesh(planet_mesh(planet)),
            );
            self.planet_ids[i] = Some(id);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        // Replies that arrived since the last tick.
        self.facts.pump();

        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        // ── Advance time ─────────────────────────────────────────────
        self.clock.advance(dt);
        let t = self.clock.elapsed_f32();

        self.sync_entities(ctx, t);

        // ── Camera ───────────────────────────────────────────────────
        let outcome = self.rig.update(
            &mut ctx.camera,
            self.selection.focus(),
            t,
            self.selection.travel_speed(),
            dt,
            &mut ctx.rng,
        );
        if outcome.arrived {
            if let Some(body) = self.selection.complete_travel() {
                log::info!("arrived at {}", PLANETS[body].short_name());
                self.facts.request(body);
                ctx.emit_event(GameEvent {
                    kind: EVENT_ARRIVED,
                    a: body as f32,
                    b: outcome.distance,
                    c: 0.0,
                });
            }
        }
        self.last_travel = outcome;
        ctx.camera.update();

        self.warp.set_active(outcome.warp);
        self.warp.update(dt);

        self.publish_state(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.warp.write_points(ctx.render_buffer, self.max_points);
    }
}
