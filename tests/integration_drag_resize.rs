use std::time::{Duration, Instant};

use desk_wm::{
    AppDescriptor, Bounds, DesktopConfig, PointerEvent, SnapRegion, WindowManager, WindowState,
};

fn desktop() -> WindowManager<&'static str> {
    WindowManager::new(DesktopConfig::default(), 1280, 800)
}

#[test]
fn header_drag_moves_window() {
    let mut wm = desktop();
    let id = wm.open(AppDescriptor::new("Files", "files"));
    let now = Instant::now();
    wm.handle_pointer(PointerEvent::press(300, 115), now);
    assert!(wm.is_capturing());
    wm.handle_pointer(PointerEvent::moved(400, 215), now);
    wm.handle_pointer(PointerEvent::release(400, 215), now);
    assert!(!wm.is_capturing());
    let record = wm.get(id).unwrap();
    assert_eq!(record.bounds(), Bounds::new(200, 200, 600, 400));
    assert_eq!(record.state(), WindowState::Normal);
}

#[test]
fn keyboard_snap_mid_drag_keeps_docked_geometry() {
    let mut wm = desktop();
    let id = wm.open(AppDescriptor::new("Files", "files"));
    let now = Instant::now();
    wm.handle_pointer(PointerEvent::press(300, 115), now);
    wm.handle_pointer(PointerEvent::moved(400, 215), now);
    wm.snap(id, SnapRegion::RightHalf);
    assert!(!wm.is_capturing());

    wm.handle_pointer(PointerEvent::moved(3, 500), now);
    wm.handle_pointer(PointerEvent::release(3, 500), now);
    let record = wm.get(id).unwrap();
    assert_eq!(record.state(), WindowState::Snapped(SnapRegion::RightHalf));
    assert_eq!(record.bounds(), Bounds::new(640, 0, 640, 740));
    // the snapshot is where the drag had left the window
    assert_eq!(record.restore_bounds(), Some(Bounds::new(200, 200, 600, 400)));
}

#[test]
fn minimize_mid_resize_leaves_bounds_alone() {
    let mut wm = desktop();
    let id = wm.open(AppDescriptor::new("Files", "files"));
    let now = Instant::now();
    wm.handle_pointer(PointerEvent::press(101, 300), now);
    wm.handle_pointer(PointerEvent::moved(51, 300), now);
    wm.minimize(id);
    wm.handle_pointer(PointerEvent::moved(400, 300), now);
    wm.handle_pointer(PointerEvent::release(400, 300), now);
    assert!(!wm.is_capturing());
    assert_eq!(wm.get(id).unwrap().bounds(), Bounds::new(50, 100, 650, 400));
    wm.restore(id);
    assert_eq!(wm.get(id).unwrap().state(), WindowState::Normal);
    assert_eq!(wm.get(id).unwrap().bounds(), Bounds::new(50, 100, 650, 400));
}

#[test]
fn west_edge_resize_keeps_east_edge_fixed() {
    let mut wm = desktop();
    let id = wm.open(AppDescriptor::new("Files", "files"));
    let now = Instant::now();
    wm.handle_pointer(PointerEvent::press(101, 300), now);
    wm.handle_pointer(PointerEvent::moved(51, 300), now);
    assert_eq!(wm.get(id).unwrap().bounds(), Bounds::new(50, 100, 650, 400));
    // past the minimum width the window stops shrinking
    wm.handle_pointer(PointerEvent::moved(500, 300), now);
    assert_eq!(wm.get(id).unwrap().bounds(), Bounds::new(400, 100, 300, 400));
    wm.handle_pointer(PointerEvent::release(500, 300), now);
    assert!(!wm.is_capturing());
}

#[test]
fn fixed_size_windows_have_no_resize_handles() {
    let mut wm = desktop();
    let id = wm.open(
        AppDescriptor::new("Calculator", "calc")
            .with_size(400, 300)
            .resizable(false),
    );
    wm.handle_pointer(PointerEvent::press(101, 300), Instant::now());
    assert!(!wm.is_capturing());
    assert_eq!(wm.get(id).unwrap().bounds(), Bounds::new(100, 100, 400, 300));
}

#[test]
fn header_buttons_act_on_press() {
    let mut wm = desktop();
    let a = wm.open(AppDescriptor::new("A", "a"));
    let now = Instant::now();
    // maximize sits left of close: x 616..656 in a 600-wide window at x 100
    wm.handle_pointer(PointerEvent::press(630, 110), now);
    assert_eq!(wm.get(a).unwrap().state(), WindowState::Maximized);
    wm.restore(a);
    // close: x 656..696
    wm.handle_pointer(PointerEvent::press(670, 110), now);
    assert!(wm.get(a).is_none());
}

#[test]
fn header_double_click_toggles_maximize() {
    let mut wm = desktop();
    let id = wm.open(AppDescriptor::new("Files", "files"));
    let now = Instant::now();
    wm.handle_pointer(PointerEvent::press(300, 115), now);
    wm.handle_pointer(PointerEvent::release(300, 115), now);
    let later = now + Duration::from_millis(200);
    wm.handle_pointer(PointerEvent::press(300, 115), later);
    assert_eq!(wm.get(id).unwrap().state(), WindowState::Maximized);
    assert!(!wm.is_capturing());
}

#[test]
fn blur_ends_drag_in_place() {
    let mut wm = desktop();
    let id = wm.open(AppDescriptor::new("Files", "files"));
    let now = Instant::now();
    wm.handle_pointer(PointerEvent::press(300, 115), now);
    wm.handle_pointer(PointerEvent::moved(10, 400), now);
    assert!(wm.snap_preview().is_some());
    wm.blur();
    assert!(!wm.is_capturing());
    assert!(wm.snap_preview().is_none());
    // later motion no longer drags and no snap happened
    wm.handle_pointer(PointerEvent::moved(600, 600), now);
    let record = wm.get(id).unwrap();
    assert_eq!(record.state(), WindowState::Normal);
    assert_eq!(record.bounds(), Bounds::new(-190, 385, 600, 400));
}
