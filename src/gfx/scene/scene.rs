use cgmath::Vector3;
use log::{debug, info, trace, warn};

use super::object::{MeshLayout, Object3D};
use super::state::{Coalesced, InputState, WindowState};
use crate::config::SceneConfig;
use crate::errors::{CoreError, Result};
use crate::gfx::camera::{CameraAction, CameraController, SceneCamera};
use crate::gfx::geometry::GeometryData;
use crate::gfx::picking::{PickColor, PickColorAllocator, Ray};
use crate::input::{InputEvent, Modifiers, MouseButton, MouseButtons};

/// Non-owning handle to an object in a [`Scene`].
///
/// Handles are positions in creation order and become stale when the scene
/// is re-initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The scene context: every mesh plus camera, window, input and picking state.
///
/// All operations run on the host's single dispatch thread. Event callbacks
/// update state and request a redraw; the renderer consumes that request once
/// per frame with [`take_pending_update`](Self::take_pending_update).
pub struct Scene {
    config: SceneConfig,
    objects: Vec<Object3D>,
    pick_colors: PickColorAllocator,
    picked_color: PickColor,

    camera: SceneCamera,
    controller: CameraController,
    window: WindowState,
    input: InputState,

    clear_color: [f32; 4],
    timer_interval_ms: u32,
    pending_update: Coalesced,
    pending_timer: Coalesced,
    pending_texture_reload: Coalesced,
    running: bool,
}

impl Scene {
    /// Creates a scene with default configuration.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        log_init(&config);
        Self::fresh(config)
    }

    fn fresh(config: SceneConfig) -> Self {
        Self {
            objects: Vec::with_capacity(config.capacity_hint),
            pick_colors: PickColorAllocator::new(),
            picked_color: PickColor::NONE,
            camera: SceneCamera::new(&config.camera),
            controller: CameraController::new(&config.controller),
            window: WindowState {
                width: config.window.width,
                height: config.window.height,
                fullscreen: config.window.fullscreen,
            },
            input: InputState::default(),
            clear_color: config.clear_color,
            timer_interval_ms: config.timer_interval_ms,
            pending_update: Coalesced::new(),
            pending_timer: Coalesced::new(),
            pending_texture_reload: Coalesced::new(),
            running: true,
            config,
        }
    }

    /// (Re)initialises the scene from `config`.
    ///
    /// Drops every object, resets the pick colour allocator, camera, window,
    /// input state and request flags. Existing [`ObjectId`]s become stale.
    pub fn init(&mut self, config: SceneConfig) {
        log_init(&config);
        *self = Self::fresh(config);
    }

    /// Re-initialises with the current configuration and a new capacity hint.
    pub fn init_scene(&mut self, capacity_hint: usize) {
        let config = self.config.clone().with_capacity_hint(capacity_hint);
        self.init(config);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // Objects

    /// Creates a mesh with zeroed buffers, gives it the next pick colour and
    /// appends it to the scene.
    pub fn add_object(
        &mut self,
        location: Vector3<f32>,
        vertex_count: usize,
        triangle_count: usize,
    ) -> Result<ObjectId> {
        self.add_object_with_layout(location, MeshLayout::new(vertex_count, triangle_count))
    }

    pub fn add_object_with_layout(
        &mut self,
        location: Vector3<f32>,
        layout: MeshLayout,
    ) -> Result<ObjectId> {
        let object = Object3D::with_layout(location, layout)?;
        self.insert(object)
    }

    /// Adds a mesh filled from generated geometry. Nothing is inserted if any
    /// buffer is rejected.
    pub fn add_geometry(
        &mut self,
        location: Vector3<f32>,
        geometry: &GeometryData,
    ) -> Result<ObjectId> {
        let mut object = Object3D::with_layout(location, geometry.layout())?;
        object.set_vertices(&geometry.vertices)?;
        object.set_normals(&geometry.normals)?;
        object.set_uvs(&geometry.uvs)?;
        object.set_triangles(&geometry.indices)?;
        self.insert(object)
    }

    fn insert(&mut self, mut object: Object3D) -> Result<ObjectId> {
        let color = self.pick_colors.allocate()?;
        object.set_pick_color(color);

        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        debug!("Added object {} with pick colour {:?}", id.0, color.rgb());

        self.request_redraw();
        Ok(id)
    }

    pub fn object(&self, id: ObjectId) -> Result<&Object3D> {
        self.objects.get(id.0).ok_or(CoreError::UnknownObject(id.0))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object3D> {
        self.objects.get_mut(id.0).ok_or(CoreError::UnknownObject(id.0))
    }

    /// All objects in creation order.
    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    /// Objects paired with their handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // Camera, window and background

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    /// Direct camera access. Callers changing the view should also call
    /// [`request_redraw`](Self::request_redraw).
    pub fn camera_mut(&mut self) -> &mut SceneCamera {
        &mut self.camera
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset(&self.config.camera);
        self.request_redraw();
    }

    pub fn controller_mut(&mut self) -> &mut CameraController {
        &mut self.controller
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window.fullscreen = fullscreen;
        self.request_redraw();
    }

    pub fn fullscreen(&self) -> bool {
        self.window.fullscreen
    }

    /// Overwrites the background colour. Components are stored as given.
    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.clear_color = [r, g, b, a];
        self.request_redraw();
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    // Request flags

    /// Asks for one redraw. Returns true if no redraw was pending before.
    pub fn request_redraw(&mut self) -> bool {
        self.pending_update.request()
    }

    /// Frame-draw step: consumes the pending redraw, if any.
    pub fn take_pending_update(&mut self) -> bool {
        self.pending_update.take()
    }

    pub fn is_update_pending(&self) -> bool {
        self.pending_update.is_pending()
    }

    /// Asks for the timer to be armed. Returns true if the caller should arm
    /// it now (for [`timer_interval_ms`](Self::timer_interval_ms)); false if
    /// one is already outstanding.
    pub fn request_timer(&mut self) -> bool {
        self.pending_timer.request()
    }

    pub fn is_timer_pending(&self) -> bool {
        self.pending_timer.is_pending()
    }

    pub fn timer_interval_ms(&self) -> u32 {
        self.timer_interval_ms
    }

    pub fn set_timer_interval_ms(&mut self, millis: u32) {
        self.timer_interval_ms = millis;
    }

    /// Consumes a pending texture reload request.
    pub fn take_texture_reload(&mut self) -> bool {
        self.pending_texture_reload.take()
    }

    // Lifecycle

    pub fn quit(&mut self) {
        info!("Scene loop stopping");
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // Event callbacks

    pub fn handle_event(&mut self, event: InputEvent) {
        trace!("Handling {:?}", event);
        match event {
            InputEvent::MouseButtonDown { button, x, y } => {
                self.on_mouse_button_down(button, x, y)
            }
            InputEvent::MouseButtonUp { button, x, y } => self.on_mouse_button_up(button, x, y),
            InputEvent::MouseMotion {
                buttons,
                x,
                y,
                xrel,
                yrel,
            } => self.on_mouse_motion(buttons, x, y, xrel, yrel),
            InputEvent::KeyDown {
                key,
                character,
                modifiers,
            } => self.on_key_down(key, character, modifiers),
            InputEvent::KeyUp {
                key,
                character,
                modifiers,
            } => self.on_key_up(key, character, modifiers),
            InputEvent::Resize { width, height } => self.on_resize(width, height),
            InputEvent::Timer => self.on_timer(),
            InputEvent::ReloadTextures => self.on_reload_textures(),
        }
    }

    pub fn on_mouse_button_down(&mut self, button: MouseButton, x: i32, y: i32) {
        self.input.mouse_window = (x, y);
        self.input.buttons.insert(button.held_flag());
        self.controller.process_button(button, &mut self.camera);
        self.request_redraw();
    }

    pub fn on_mouse_button_up(&mut self, button: MouseButton, x: i32, y: i32) {
        self.input.mouse_window = (x, y);
        self.input.buttons.remove(button.held_flag());
        self.request_redraw();
    }

    /// `buttons` is the held-button state reported with the motion event.
    pub fn on_mouse_motion(
        &mut self,
        buttons: MouseButtons,
        x: i32,
        y: i32,
        xrel: i32,
        yrel: i32,
    ) {
        self.input.mouse_window = (x, y);
        self.input.buttons = buttons;
        self.controller.process_motion(
            buttons,
            self.input.modifiers,
            (xrel, yrel),
            &mut self.camera,
        );
        self.request_redraw();
    }

    /// Records the modifier state and runs the camera action bound to `key`, if any.
    pub fn on_key_down(&mut self, key: u32, character: Option<char>, modifiers: Modifiers) {
        trace!("Key down {} ({:?}) with {:?}", key, character, modifiers);
        self.input.modifiers = modifiers;
        if let Some(action) = CameraAction::from_key(key, modifiers) {
            let defaults = &self.config.camera;
            self.controller.apply_action(action, &mut self.camera, defaults);
        }
        self.request_redraw();
    }

    pub fn on_key_up(&mut self, key: u32, character: Option<char>, modifiers: Modifiers) {
        trace!("Key up {} ({:?}) with {:?}", key, character, modifiers);
        self.input.modifiers = modifiers;
        self.request_redraw();
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        debug!("Window resized to {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self.request_redraw();
    }

    /// The armed timer fired: it may be armed again, and a redraw is due.
    pub fn on_timer(&mut self) {
        self.pending_timer.take();
        self.request_redraw();
    }

    pub fn on_reload_textures(&mut self) {
        self.pending_texture_reload.request();
        self.request_redraw();
    }

    // Input state

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn modifiers(&self) -> Modifiers {
        self.input.modifiers
    }

    pub fn set_mouse_scene_position(&mut self, position: [f64; 3]) {
        self.input.mouse_scene = position;
    }

    pub fn set_mouse_gui_position(&mut self, position: [f64; 3]) {
        self.input.mouse_gui = position;
    }

    // Picking

    /// Records the pick colour the renderer read back under the cursor.
    pub fn set_picked_color(&mut self, rgb: [u8; 3]) {
        self.picked_color = PickColor::from_rgb(rgb);
    }

    pub fn picked_color(&self) -> PickColor {
        self.picked_color
    }

    /// The pickable object whose colour was last reported, if any.
    pub fn picked_object(&self) -> Option<ObjectId> {
        let index = self.picked_color.index()?;
        match self.objects.get(index) {
            Some(object) if object.pick_color() == self.picked_color && object.pickable => {
                Some(ObjectId(index))
            }
            Some(_) => None,
            None => {
                warn!("Picked colour {:?} matches no object", self.picked_color.rgb());
                None
            }
        }
    }

    /// Nearest visible, pickable object drawn with the movable camera whose
    /// world bounding box `ray` hits.
    pub fn pick_ray(&self, ray: &Ray) -> Option<ObjectId> {
        self.iter()
            .filter(|(_, o)| o.visible && o.pickable && o.uses_movable_camera)
            .filter_map(|(id, o)| {
                let distance = o.world_bounding_box()?.intersect_ray(ray)?;
                Some((id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Ray-picks at a window pixel through the current camera. A collapsed
    /// window picks nothing.
    pub fn pick_at(&self, x: i32, y: i32) -> Option<ObjectId> {
        let ray = self.camera.screen_to_ray(
            (x as f32, y as f32),
            (self.window.width as f32, self.window.height as f32),
        )?;
        self.pick_ray(&ray)
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            visible_objects: self.objects.iter().filter(|o| o.visible).count(),
            total_vertices: self.objects.iter().map(Object3D::vertex_count).sum(),
            total_triangles: self.objects.iter().map(Object3D::triangle_count).sum(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn log_init(config: &SceneConfig) {
    info!(
        "Initialising scene (capacity hint {}, window {}x{})",
        config.capacity_hint, config.window.width, config.window.height
    );
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub visible_objects: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}
