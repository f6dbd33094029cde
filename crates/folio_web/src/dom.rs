//! DOM rendering for the ambient layers.
//!
//! # Responsibility
//! - Materialize particles, orbs, grid lines and motes as absolutely
//!   positioned `div`s.
//! - Drive them from one `requestAnimationFrame` loop plus pointer and
//!   resize listeners.
//!
//! # Invariants
//! - `AmbientLayer::stop` cancels the pending frame, detaches both
//!   listeners and removes every node, and runs on drop.
//! - Missing DOM APIs leave the layer inert; nothing panics.

use crate::style::{
    grid_line_styles, grid_offset_styles, mote_position_styles, mote_styles, orb_node_styles,
    orb_styles, particle_styles, projection_styles, GRID_LINE_CLASS, MOTE_CLASS, ORB_CLASS, PARTICLE_CLASS,
};
use folio_core::{
    FieldSurface, GridLayer, MoteLayer, MountedField, OrbLayer, Particle, ParticleField,
    Projection, SiteConfig, Viewport,
};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, MouseEvent, Window};

/// Particle nodes inside a container element.
pub struct DomSurface {
    document: Document,
    container: HtmlElement,
    nodes: Vec<Option<HtmlElement>>,
}

impl DomSurface {
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self {
            document,
            container,
            nodes: Vec::new(),
        }
    }
}

impl FieldSurface for DomSurface {
    fn create_element(&mut self, index: usize, particle: &Particle) {
        let node = create_node(&self.document, &self.container, PARTICLE_CLASS, &particle_styles(particle));
        if self.nodes.len() <= index {
            self.nodes.resize(index + 1, None);
        }
        self.nodes[index] = node;
    }

    fn render(&mut self, index: usize, projection: &Projection) {
        if let Some(Some(node)) = self.nodes.get(index) {
            apply_styles(node, &projection_styles(projection));
        }
    }

    fn remove_element(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index).and_then(Option::take) {
            node.remove();
        }
    }
}

/// Nodes owned by one tween-driven layer; removed on drop.
struct Nodes(Vec<HtmlElement>);

impl Drop for Nodes {
    fn drop(&mut self) {
        for node in self.0.drain(..) {
            node.remove();
        }
    }
}

struct Scene {
    grid: GridLayer,
    grid_nodes: Nodes,
    orbs: OrbLayer,
    orb_nodes: Nodes,
    motes: MoteLayer,
    mote_nodes: Nodes,
    field: MountedField<DomSurface>,
    rng: StdRng,
    last_frame_ms: Option<f64>,
}

impl Scene {
    fn frame(&mut self, timestamp_ms: f64) -> bool {
        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| ((timestamp_ms - last) / 1000.0).max(0.0));
        self.last_frame_ms = Some(timestamp_ms);

        for (offset, node) in self.grid.tick(dt).iter().zip(&self.grid_nodes.0) {
            apply_styles(node, &grid_offset_styles(*offset));
        }
        for (frame, node) in self.orbs.tick(dt).iter().zip(&self.orb_nodes.0) {
            apply_styles(node, &orb_styles(frame));
        }
        for (frame, node) in self.motes.tick(dt, &mut self.rng).iter().zip(&self.mote_nodes.0) {
            apply_styles(node, &mote_position_styles(frame));
        }
        self.field.frame()
    }

    fn resize(&mut self, viewport: Viewport) {
        self.orbs.resize(viewport, &mut self.rng);
        self.motes.resize(viewport);
        self.field.resize(viewport);
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Running ambient layers bound to one container.
pub struct AmbientLayer {
    window: Window,
    scene: Rc<RefCell<Option<Scene>>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    frame_handle: Rc<Cell<Option<i32>>>,
    pointer_callback: Option<Closure<dyn FnMut(MouseEvent)>>,
    resize_callback: Option<Closure<dyn FnMut()>>,
}

impl AmbientLayer {
    /// Builds every layer inside `container` and starts the frame loop.
    ///
    /// Returns `None` when the page has no window or document.
    pub fn start(container: HtmlElement, config: &SiteConfig) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            warn!("event=ambient_mount module=web status=degraded reason=no_window");
            return None;
        };
        let Some(document) = window.document() else {
            warn!("event=ambient_mount module=web status=degraded reason=no_document");
            return None;
        };

        let viewport = read_viewport(&window);
        let mut rng = StdRng::from_entropy();

        // Back to front: grid, orbs, motes, particle field.
        let grid = GridLayer::spawn(&config.backdrop);
        let grid_nodes = Nodes(
            grid.lines()
                .iter()
                .filter_map(|line| {
                    create_node(&document, &container, GRID_LINE_CLASS, &grid_line_styles(line))
                })
                .collect(),
        );
        let orbs = OrbLayer::spawn(&config.orbs, viewport, &mut rng);
        let orb_nodes = Nodes(
            (0..orbs.len())
                .filter_map(|index| {
                    create_node(&document, &container, ORB_CLASS, &orb_node_styles(index))
                })
                .collect(),
        );
        let motes = MoteLayer::spawn(&config.backdrop, viewport, &mut rng);
        let mote_nodes = Nodes(
            motes
                .frames()
                .iter()
                .filter_map(|frame| {
                    let node = create_node(&document, &container, MOTE_CLASS, &mote_styles(frame))?;
                    apply_styles(&node, &mote_position_styles(frame));
                    Some(node)
                })
                .collect(),
        );
        let field = ParticleField::spawn(config.particles.clone(), viewport, &mut rng);
        let scene = Scene {
            grid,
            grid_nodes,
            orbs,
            orb_nodes,
            motes,
            mote_nodes,
            field: MountedField::mount(DomSurface::new(document, container), field),
            rng,
            last_frame_ms: None,
        };

        let mut layer = Self {
            window,
            scene: Rc::new(RefCell::new(Some(scene))),
            frame_callback: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
            pointer_callback: None,
            resize_callback: None,
        };
        layer.install_frame_loop();
        layer.install_listeners();
        Some(layer)
    }

    pub fn is_running(&self) -> bool {
        self.scene.borrow().is_some()
    }

    /// Stops the loop, detaches listeners and removes every node.
    pub fn stop(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        self.frame_callback.borrow_mut().take();

        if let Some(callback) = self.pointer_callback.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("mousemove", callback.as_ref().unchecked_ref());
        }
        if let Some(callback) = self.resize_callback.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
        }

        if self.scene.borrow_mut().take().is_some() {
            debug!("event=ambient_unmount module=web status=ok");
        }
    }

    fn install_frame_loop(&mut self) {
        let window = self.window.clone();
        let scene = Rc::clone(&self.scene);
        let slot = Rc::clone(&self.frame_callback);
        let handle = Rc::clone(&self.frame_handle);

        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp_ms: f64| {
            handle.set(None);
            let keep_going = scene
                .try_borrow_mut()
                .ok()
                .and_then(|mut scene| scene.as_mut().map(|scene| scene.frame(timestamp_ms)))
                .unwrap_or(false);
            if !keep_going {
                return;
            }
            if let Ok(slot) = slot.try_borrow() {
                if let Some(callback) = slot.as_ref() {
                    handle.set(request_frame(&window, callback));
                }
            }
        });

        self.frame_handle
            .set(request_frame(&self.window, &callback));
        *self.frame_callback.borrow_mut() = Some(callback);
    }

    fn install_listeners(&mut self) {
        let scene = Rc::clone(&self.scene);
        let pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Ok(mut scene) = scene.try_borrow_mut() {
                if let Some(scene) = scene.as_mut() {
                    scene
                        .field
                        .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
                }
            }
        });
        if add_listener(&self.window, "mousemove", pointer.as_ref()) {
            self.pointer_callback = Some(pointer);
        }

        let scene = Rc::clone(&self.scene);
        let window = self.window.clone();
        let resize = Closure::<dyn FnMut()>::new(move || {
            if let Ok(mut scene) = scene.try_borrow_mut() {
                if let Some(scene) = scene.as_mut() {
                    scene.resize(read_viewport(&window));
                }
            }
        });
        if add_listener(&self.window, "resize", resize.as_ref()) {
            self.resize_callback = Some(resize);
        }
    }
}

impl Drop for AmbientLayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Current window size, or `Viewport::ZERO` when it cannot be read.
pub fn read_viewport(window: &Window) -> Viewport {
    let width = window.inner_width().ok().and_then(|value| value.as_f64());
    let height = window.inner_height().ok().and_then(|value| value.as_f64());
    Viewport::from_host(width, height)
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

fn add_listener(window: &Window, event: &str, callback: &JsValue) -> bool {
    window
        .add_event_listener_with_callback(event, callback.unchecked_ref())
        .is_ok()
}

fn create_node(
    document: &Document,
    container: &HtmlElement,
    class: &str,
    styles: &[(&'static str, String)],
) -> Option<HtmlElement> {
    let node = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    node.set_class_name(class);
    apply_styles(&node, styles);
    container.append_child(&node).ok()?;
    Some(node)
}

fn apply_styles(node: &HtmlElement, styles: &[(&'static str, String)]) {
    let style = node.style();
    for (name, value) in styles {
        let _ = style.set_property(name, value);
    }
}
