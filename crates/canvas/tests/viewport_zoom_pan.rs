use canvas::{Point, ScreenRect, ViewportState, FIT_MIN_EXTENT, MAX_EXTENT};

const EPS: f64 = 1e-9;

fn close(a: Point, b: Point) -> bool {
  (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

#[test]
fn default_window_and_view_box() {
  let viewport = ViewportState::default();
  assert_eq!(viewport, ViewportState::new(0.0, 0.0, 100.0, 100.0).unwrap());
  assert_eq!(viewport.to_string(), "0 0 100 100");
}

#[test]
fn degenerate_extents_are_rejected() {
  assert!(ViewportState::new(0.0, 0.0, 0.0, 10.0).is_err());
  assert!(ScreenRect::new(100.0, 0.0).is_err());
  assert!(ScreenRect::new(f64::NAN, 10.0).is_err());
}

#[test]
fn pan_moves_origin_against_the_drag() {
  let screen = ScreenRect::new(200.0, 400.0).unwrap();
  let mut viewport = ViewportState::default();

  viewport.pan(20.0, -40.0, &screen);

  assert!(close(viewport.origin(), Point::new(-10.0, 10.0)));
  assert_eq!((viewport.w, viewport.h), (100.0, 100.0));
}

#[test]
fn screen_and_model_conversions_are_inverse() {
  let screen = ScreenRect::new(640.0, 480.0).unwrap();
  let viewport = ViewportState::new(-35.0, 12.5, 320.0, 240.0).unwrap();
  let cursor = Point::new(123.0, 456.0);

  let model = viewport.screen_to_model(cursor, &screen);
  assert!(close(viewport.model_to_screen(model, &screen), cursor));
}

#[test]
fn zoom_keeps_the_point_under_the_cursor() {
  let screen = ScreenRect::new(400.0, 300.0).unwrap();
  let mut viewport = ViewportState::new(5.0, -20.0, 100.0, 75.0).unwrap();
  let cursor = Point::new(100.0, 50.0);
  let before = viewport.screen_to_model(cursor, &screen);

  assert!(viewport.zoom_at(-200.0, cursor, &screen));
  assert!((viewport.w - 80.0).abs() < EPS);
  assert!((viewport.h - 60.0).abs() < EPS);
  assert!(close(viewport.screen_to_model(cursor, &screen), before));

  assert!(viewport.zoom_at(250.0, cursor, &screen));
  assert!((viewport.w - 100.0).abs() < EPS);
  assert!(close(viewport.screen_to_model(cursor, &screen), before));
}

#[test]
fn zoom_outside_bounds_is_a_no_op() {
  let screen = ScreenRect::new(100.0, 100.0).unwrap();
  let cursor = Point::new(50.0, 50.0);

  let mut tight = ViewportState::new(0.0, 0.0, 12.0, 12.0).unwrap();
  let before = tight;
  assert!(!tight.zoom_at(-500.0, cursor, &screen));
  assert_eq!(tight, before);

  let mut wide = ViewportState::new(0.0, 0.0, 4000.0, 4000.0).unwrap();
  let before = wide;
  assert!(!wide.zoom_at(500.0, cursor, &screen));
  assert_eq!(wide, before);

  // s = 0 is never a valid factor.
  assert!(!wide.zoom_at(-1000.0, cursor, &screen));
  assert_eq!(wide, before);
  assert!(wide.w <= MAX_EXTENT);
}

#[test]
fn fit_on_nothing_is_the_default_window() {
  assert_eq!(ViewportState::fit_to(Vec::new()), ViewportState::default());
}

#[test]
fn fit_covers_all_points_with_padding() {
  let viewport = ViewportState::fit_to(vec![Point::new(0.0, 0.0), Point::new(200.0, 100.0), Point::new(50.0, 30.0)]);
  assert_eq!(viewport, ViewportState { x: -20.0, y: -20.0, w: 240.0, h: 140.0 });
}

#[test]
fn fit_on_a_single_point_uses_the_minimum_extent() {
  let viewport = ViewportState::fit_to(vec![Point::new(100.0, 100.0)]);
  assert_eq!(viewport.w, FIT_MIN_EXTENT);
  assert_eq!(viewport.h, FIT_MIN_EXTENT);
  assert_eq!(viewport.origin(), Point::new(75.0, 75.0));
}
