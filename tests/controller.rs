use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use glam::Vec3;
use orbitview::camera::navigation::OrbitNavigation;
use orbitview::options::NavigationOptions;
use orbitview::scene::Geometry;
use orbitview::viewport::{DebugInspector, DebugSnapshot};
use orbitview::{
    Aabb, HeadlessSurface, Options, Pickable, PointerButton, PointerEvent,
    PointerEventKind, SceneObject, ViewportController, ViewportError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn controller(width: u32, height: u32) -> ViewportController<HeadlessSurface> {
    init_logger();
    let host = HeadlessSurface::new(width, height);
    ViewportController::initialize(host, width, height)
}

fn with_navigation(
    navigation: NavigationOptions,
) -> ViewportController<HeadlessSurface> {
    init_logger();
    let options = Options {
        navigation,
        ..Options::default()
    };
    let orbit = Box::new(OrbitNavigation::new(options.navigation.clone()));
    ViewportController::initialize_with_options(
        HeadlessSurface::new(800, 600),
        800,
        600,
        &options,
        orbit,
    )
}

fn cube(name: &str, center: Vec3, edge: f32) -> SceneObject {
    SceneObject::mesh(name, Geometry::cuboid(Vec3::splat(edge)))
        .with_translation(center)
}

#[test]
fn focus_on_reference_cube() {
    let mut ctrl = controller(600, 600);
    let object = cube("box", Vec3::ZERO, 20.0);

    let framing = ctrl.focus_on(&object, Some(1.1)).unwrap();

    assert_relative_eq!(framing.distance, 14.36, epsilon = 0.05);
    assert_eq!(framing.target, Vec3::ZERO);
    assert_eq!(ctrl.camera().target, Vec3::ZERO);
    assert_eq!(ctrl.navigation_state().target, Vec3::ZERO);
    let expected_z = 10.0 + framing.distance;
    assert_relative_eq!(ctrl.camera().eye.z, expected_z, epsilon = 1e-4);
}

#[test]
fn focused_volume_stays_inside_frustum() {
    let volumes = [
        Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0)),
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
        Aabb::new(Vec3::new(-50.0, -2.0, -3.0), Vec3::new(50.0, 2.0, 3.0)),
        Aabb::new(Vec3::new(5.0, 20.0, -40.0), Vec3::new(9.0, 60.0, -30.0)),
        Aabb::new(Vec3::new(-0.5, -200.0, -0.5), Vec3::new(0.5, 200.0, 0.5)),
        Aabb::new(Vec3::splat(-100.0), Vec3::splat(100.0)),
    ];
    let viewports = [(800, 600), (300, 900), (1920, 1080)];

    for (width, height) in viewports {
        let mut ctrl = controller(width, height);
        for volume in &volumes {
            for margin in [1.0, 1.1, 1.5, 3.0] {
                let _ = ctrl.focus_on_bounds(volume, Some(margin)).unwrap();
                let frustum = ctrl.camera().frustum();
                let tolerance = 1e-3 * volume.max_dimension().max(1.0);
                assert!(
                    frustum.contains_aabb(volume, tolerance),
                    "{volume:?} escapes the view at margin {margin} \
                     in {width}x{height}"
                );
            }
        }
    }
}

#[test]
fn resize_then_render_sets_aspect() {
    let mut ctrl = controller(800, 600);
    ctrl.on_resize(1280, 320).unwrap();
    ctrl.render_frame().unwrap();

    assert_relative_eq!(ctrl.camera().aspect(), 4.0);
    assert_eq!(ctrl.host().output_size(), Some((1280, 320)));
    let rendered = ctrl.host().last_camera().unwrap();
    assert_relative_eq!(rendered.aspect(), 4.0);
}

#[test]
fn host_resize_applies_on_next_frame() {
    let mut ctrl = controller(800, 600);
    ctrl.host_mut().resize(400, 400);
    assert_eq!(ctrl.viewport_size(), (800, 600));

    ctrl.render_frame().unwrap();
    assert_eq!(ctrl.viewport_size(), (400, 400));
    assert_relative_eq!(ctrl.camera().aspect(), 1.0);
    assert_eq!(ctrl.host().output_size(), Some((400, 400)));
}

#[test]
fn explicit_resize_supersedes_pending_host_resize() {
    let mut ctrl = controller(800, 600);
    ctrl.host_mut().resize(400, 400);
    ctrl.on_resize(1000, 500).unwrap();
    ctrl.render_frame().unwrap();
    assert_eq!(ctrl.viewport_size(), (1000, 500));
}

#[test]
fn pixel_ratio_is_forwarded_on_resize() {
    init_logger();
    let host = HeadlessSurface::new(800, 600).with_pixel_ratio(2.0);
    let mut ctrl = ViewportController::initialize(host, 800, 600);
    ctrl.on_resize(640, 480).unwrap();
    assert_eq!(orbitview::HostSurface::pixel_ratio(ctrl.host()), 2.0);
    assert_eq!(ctrl.host().output_size(), Some((640, 480)));
}

#[test]
fn double_teardown_removes_listener_once() {
    let mut ctrl = controller(800, 600);
    assert_eq!(ctrl.host().listener_count(), 1);

    ctrl.teardown().unwrap();
    assert_eq!(ctrl.host().listener_count(), 0);
    assert_eq!(ctrl.host().listeners_removed(), 1);

    let err = ctrl.teardown().unwrap_err();
    assert!(matches!(
        err,
        ViewportError::DoubleTeardown {
            operation: "teardown"
        }
    ));
    assert_eq!(ctrl.host().listeners_removed(), 1);
    assert!(ctrl.is_torn_down());
}

#[test]
fn pick_prefers_nearer_candidate_in_any_order() {
    let mut ctrl = controller(800, 600);
    let bounds = Aabb::new(Vec3::splat(-20.0), Vec3::splat(20.0));
    let _ = ctrl.focus_on_bounds(&bounds, None).unwrap();
    let near = cube("near", Vec3::new(0.3, 0.2, 5.0), 10.0);
    let far = cube("far", Vec3::new(0.3, 0.2, -5.0), 10.0);
    let center = (400.0, 300.0);

    let forward: [&dyn Pickable; 2] = [&near, &far];
    let reversed: [&dyn Pickable; 2] = [&far, &near];
    let a = ctrl.pick_at(center.0, center.1, Some(&forward[..])).unwrap();
    let b = ctrl.pick_at(center.0, center.1, Some(&reversed[..])).unwrap();
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.object.name(), "near");
    assert_eq!(b.object.name(), "near");
    assert_relative_eq!(a.distance, b.distance);
}

#[test]
fn pick_against_empty_set_misses() {
    let ctrl = controller(800, 600);
    let none: [&dyn Pickable; 0] = [];
    assert!(ctrl.pick_at(400.0, 300.0, Some(&none[..])).unwrap().is_none());
}

#[test]
fn disabled_navigation_still_picks() {
    let mut ctrl = controller(800, 600);
    ctrl.set_navigation_enabled(false).unwrap();
    let eye = ctrl.camera().eye;

    let down = PointerEvent::down(400.0, 300.0, PointerButton::Primary);
    let _ = ctrl.dispatch_pointer(&down).unwrap();
    let _ = ctrl
        .dispatch_pointer(&PointerEvent::moved(700.0, 300.0))
        .unwrap();
    ctrl.render_frame().unwrap();
    assert_eq!(ctrl.camera().eye, eye);

    let target = cube("target", Vec3::new(0.3, 0.2, 0.0), 10.0);
    let candidates: [&dyn Pickable; 1] = [&target];
    let hit = ctrl.pick_at(400.0, 300.0, Some(&candidates[..])).unwrap();
    assert_eq!(hit.map(|h| h.object.name()), Some("target"));
}

#[test]
fn drag_rotates_camera_on_next_frame() {
    let mut ctrl = controller(800, 600);
    let down = PointerEvent::down(400.0, 300.0, PointerButton::Primary);
    let up = PointerEvent::up(500.0, 300.0, PointerButton::Primary);
    let _ = ctrl.dispatch_pointer(&down).unwrap();
    let _ = ctrl
        .dispatch_pointer(&PointerEvent::moved(500.0, 300.0))
        .unwrap();
    let _ = ctrl.dispatch_pointer(&up).unwrap();
    ctrl.render_frame().unwrap();

    let eye = ctrl.camera().eye;
    assert!(eye.x < 0.0);
    assert_relative_eq!(eye.length(), 150.0, epsilon = 1e-2);
    assert_eq!(ctrl.camera().target, Vec3::ZERO);
}

#[test]
fn subscribers_receive_matching_events() {
    let mut ctrl = controller(800, 600);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let downs = ctrl
        .subscribe(PointerEventKind::Down, move |e| {
            sink.borrow_mut().push((e.x, e.y));
        })
        .unwrap();
    let sink = Rc::clone(&seen);
    let _also = ctrl
        .subscribe(PointerEventKind::Down, move |_| {
            sink.borrow_mut().push((-1.0, -1.0));
        })
        .unwrap();

    let down = PointerEvent::down(10.0, 20.0, PointerButton::Primary);
    let outcome = ctrl.dispatch_pointer(&down).unwrap();
    assert_eq!(outcome.handlers_run, 2);
    assert!(!outcome.prevent_default);
    assert_eq!(*seen.borrow(), [(10.0, 20.0), (-1.0, -1.0)]);

    assert!(ctrl.unsubscribe(downs).unwrap());
    assert!(!ctrl.unsubscribe(downs).unwrap());
    let down = PointerEvent::down(0.0, 0.0, PointerButton::Primary);
    let outcome = ctrl.dispatch_pointer(&down).unwrap();
    assert_eq!(outcome.handlers_run, 1);

    let moved = PointerEvent::moved(1.0, 1.0);
    let outcome = ctrl.dispatch_pointer(&moved).unwrap();
    assert_eq!(outcome.handlers_run, 0);
}

#[test]
fn context_menu_prevents_default() {
    let mut ctrl = controller(800, 600);
    let menu = PointerEvent::context_menu(5.0, 5.0);
    let outcome = ctrl.dispatch_pointer(&menu).unwrap();
    assert!(outcome.prevent_default);
    assert_eq!(outcome.handlers_run, 0);
}

#[test]
fn teardown_drops_subscriptions() {
    let mut ctrl = controller(800, 600);
    let sub = ctrl.subscribe(PointerEventKind::Up, |_| {}).unwrap();
    ctrl.teardown().unwrap();
    assert!(matches!(
        ctrl.unsubscribe(sub),
        Err(ViewportError::DoubleTeardown {
            operation: "unsubscribe"
        })
    ));
}

struct Recorder(Rc<RefCell<Vec<DebugSnapshot>>>);

impl DebugInspector for Recorder {
    fn inspect(&mut self, snapshot: &DebugSnapshot) {
        self.0.borrow_mut().push(snapshot.clone());
    }
}

#[test]
fn inspector_receives_a_snapshot_per_frame() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let recorder = Box::new(Recorder(Rc::clone(&frames)));
    let mut ctrl = controller(800, 600).with_inspector(recorder);

    ctrl.render_frame().unwrap();
    ctrl.render_frame().unwrap();

    let frames = frames.borrow();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].frame, 2);
    assert_eq!(frames[1].viewport, (800, 600));
    assert_eq!(frames[1].eye, [0.0, 0.0, 150.0]);
    let json = frames[1].to_json().unwrap();
    assert!(json.contains("\"navigation_enabled\": true"));
}

#[test]
fn custom_options_and_navigation() {
    init_logger();
    let options = Options::from_toml(
        r"
[camera]
fovy = 50.0
initial_distance = 80.0
",
    )
    .unwrap();
    let navigation = Box::new(OrbitNavigation::new(options.navigation.clone()));
    let ctrl = ViewportController::initialize_with_options(
        HeadlessSurface::new(640, 480),
        640,
        480,
        &options,
        navigation,
    );
    assert_eq!(ctrl.camera().fovy(), 50.0);
    assert_eq!(ctrl.camera().eye, Vec3::new(0.0, 0.0, 80.0));
    assert_relative_eq!(ctrl.navigation_state().distance, 80.0);
    assert_eq!(ctrl.navigation_state().target, Vec3::ZERO);
}

#[test]
fn volume_beyond_far_plane_is_refused() {
    let mut ctrl = controller(800, 600);
    let before = *ctrl.camera();
    let huge = Aabb::new(Vec3::splat(-350.0), Vec3::splat(350.0));

    let err = ctrl.focus_on_bounds(&huge, Some(1.1)).unwrap_err();

    match err {
        ViewportError::ExceedsClipRange { depth, zfar } => {
            assert_eq!(zfar, 1000.0);
            assert!(depth > zfar);
        }
        other => panic!("expected a clip range error, got {other:?}"),
    }
    assert_eq!(*ctrl.camera(), before);
    ctrl.render_frame().unwrap();
    assert_eq!(ctrl.camera().eye, before.eye);
}

#[test]
fn inverted_navigation_limits_survive_frames() {
    let mut ctrl = with_navigation(NavigationOptions {
        min_distance: 300.0,
        max_distance: 20.0,
        min_elevation: 45.0,
        max_elevation: -45.0,
        ..NavigationOptions::default()
    });
    let down = PointerEvent::down(400.0, 300.0, PointerButton::Primary);
    let _ = ctrl.dispatch_pointer(&down).unwrap();
    let _ = ctrl
        .dispatch_pointer(&PointerEvent::moved(400.0, 900.0))
        .unwrap();
    let wheel = PointerEvent::wheel(0.0, 0.0, -1.0);
    let _ = ctrl.dispatch_pointer(&wheel).unwrap();

    ctrl.render_frame().unwrap();

    let state = ctrl.navigation_state();
    assert!(state.elevation <= 45.0_f32.to_radians() + 1e-5);
    assert!(state.distance.is_finite());
}

#[test]
fn invalid_limits_in_toml_are_rejected() {
    init_logger();
    let err = Options::from_toml(
        r"
[navigation]
min_distance = 50.0
max_distance = 5.0
",
    )
    .unwrap_err();
    assert!(matches!(err, ViewportError::OptionsParse(_)));
}

#[test]
fn framing_inside_min_distance_is_kept() {
    let mut ctrl = with_navigation(NavigationOptions {
        min_distance: 100.0,
        ..NavigationOptions::default()
    });
    let object = cube("box", Vec3::ZERO, 20.0);
    let framing = ctrl.focus_on(&object, Some(1.1)).unwrap();
    let eye = ctrl.camera().eye;
    assert!(framing.distance < 100.0);

    ctrl.render_frame().unwrap();
    ctrl.render_frame().unwrap();

    assert_relative_eq!(ctrl.camera().eye.x, eye.x, epsilon = 1e-3);
    assert_relative_eq!(ctrl.camera().eye.y, eye.y, epsilon = 1e-3);
    assert_relative_eq!(ctrl.camera().eye.z, eye.z, epsilon = 1e-3);
}
