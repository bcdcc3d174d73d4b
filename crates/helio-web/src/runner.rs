use helio_engine::{
    build_render_buffer, EngineContext, FixedTimestep, Game, InputEvent, InputQueue,
    ProtocolLayout, RenderBuffer, RenderContext, HEADER_FLOATS,
};

/// Generic runner that wires up the engine loop.
///
/// Each concrete visualization creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame_counter: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances, config.max_points);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            header: [0.0; HEADER_FLOATS],
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-rate updates, then rebuild the render buffer and header.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        let fixed_dt = self.timestep.dt();
        for step in 0..steps {
            // Input is delivered to the first fixed step only.
            if step == 0 {
                self.game.update(&mut self.ctx, &self.input, fixed_dt);
            } else {
                self.game.update(&mut self.ctx, &InputQueue::new(), fixed_dt);
            }
        }
        if steps > 0 {
            self.input.drain();
        }

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.layout.write_header(
            &mut self.header,
            self.frame_counter,
            &self.render_buffer,
            self.ctx.events.len(),
            &self.ctx.camera,
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    // ---- Pointer accessors for the host's memory views ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count().min(self.layout.max_instances as u32)
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.render_buffer.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.render_buffer.point_count().min(self.layout.max_points as u32)
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        (self.ctx.events.len().min(self.layout.max_events)) as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_engine::{Entity, GameEvent, Rgb, SphereMesh};

    /// Counts updates and echoes custom events back as game events.
    struct Counter {
        updates: u32,
        inputs_seen: usize,
    }

    impl Game for Counter {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_mesh(SphereMesh::new(1.0, Rgb::WHITE)));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, _dt: f32) {
            self.updates += 1;
            self.inputs_seen += input.len();
            ctx.emit_event(GameEvent { kind: 1.0, ..Default::default() });
        }
    }

    fn runner() -> GameRunner<Counter> {
        let mut r = GameRunner::new(Counter { updates: 0, inputs_seen: 0 });
        r.init();
        r
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = GameRunner::new(Counter { updates: 0, inputs_seen: 0 });
        r.tick(1.0);
        assert_eq!(r.game().updates, 0);
    }

    #[test]
    fn input_reaches_exactly_one_update() {
        let mut r = runner();
        r.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        r.tick(3.0 / 60.0 + 0.001);
        assert_eq!(r.game().updates, 3);
        assert_eq!(r.game().inputs_seen, 1);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().inputs_seen, 1);
    }

    #[test]
    fn short_frames_keep_input_queued() {
        let mut r = runner();
        r.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        r.tick(0.001);
        assert_eq!(r.game().updates, 0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().inputs_seen, 1);
    }

    #[test]
    fn render_buffer_and_header_follow_scene() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.game_events_len(), 1);
        assert_eq!(r.header[helio_engine::bridge::protocol::HEADER_FRAME_COUNTER], 1.0);
    }
}
