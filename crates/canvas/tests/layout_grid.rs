mod common;

use canvas::{GridLayout, Point};
use common::Node;

fn positions(nodes: &[canvas::PositionedRecord<Node>]) -> Vec<(f64, f64)> {
  nodes.iter().map(|n| (n.x, n.y)).collect()
}

#[test]
fn existing_coordinates_are_kept_exactly() {
  let placed = GridLayout::default().place(vec![Node::at("a", 50, 50), Node::at("b", 100, 100)]);

  assert_eq!(positions(&placed), vec![(50.0, 50.0), (100.0, 100.0)]);
  for node in &placed {
    assert_eq!(node.original(), node.position());
    assert!(!node.has_unsaved_change());
  }
}

#[test]
fn unpositioned_records_take_distinct_cells_in_row_major_order() {
  let placed = GridLayout::default().place(vec![Node::loose("a"), Node::loose("b")]);
  assert_eq!(positions(&placed), vec![(10.0, 10.0), (30.0, 10.0)]);
}

#[test]
fn occupied_cell_is_skipped() {
  let placed = GridLayout::default().place(vec![Node::at("fixed", 10, 10), Node::loose("free")]);
  assert_eq!(placed[1].position(), Point::new(30.0, 10.0));
}

#[test]
fn off_grid_coordinates_reserve_the_nearest_cell() {
  // (14, 7) rounds to cell (0, 0).
  let placed = GridLayout::default().place(vec![Node::at("fixed", 14, 7), Node::loose("free")]);
  assert_eq!(placed[0].position(), Point::new(14.0, 7.0));
  assert_eq!(placed[1].position(), Point::new(30.0, 10.0));
}

#[test]
fn halfway_coordinates_round_up() {
  let layout = GridLayout::default();
  assert_eq!(layout.cell_of(Point::new(20.0, 20.0)), (1, 1));
  assert_eq!(layout.cell_of(Point::new(0.0, 0.0)), (0, 0));
}

#[test]
fn rows_wrap_after_the_configured_columns() {
  let records = (0..6).map(|i| Node::loose(&format!("n{}", i))).collect();
  let placed = GridLayout::default().place(records);
  assert_eq!(placed[4].position(), Point::new(90.0, 10.0));
  assert_eq!(placed[5].position(), Point::new(10.0, 30.0));
}

#[test]
fn output_keeps_input_order() {
  let placed = GridLayout::default().place(vec![Node::loose("first"), Node::at("fixed", 10, 10), Node::loose("last")]);

  let names: Vec<&str> = placed.iter().map(|n| n.record.name.as_str()).collect();
  assert_eq!(names, vec!["first", "fixed", "last"]);
  assert_eq!(positions(&placed), vec![(30.0, 10.0), (10.0, 10.0), (50.0, 10.0)]);
}

#[test]
fn layout_is_deterministic() {
  let input = vec![Node::loose("a"), Node::at("b", 31, 9), Node::loose("c"), Node::at("d", 200, 5), Node::loose("e")];
  let layout = GridLayout::default();
  assert_eq!(layout.place(input.clone()), layout.place(input));
}

#[test]
fn moving_a_record_leaves_the_original_untouched() {
  let mut placed = GridLayout::default().place(vec![Node::loose("a")]);
  let node = &mut placed[0];

  node.x += 7.5;
  assert!(node.has_unsaved_change());
  assert_eq!(node.original(), Point::new(10.0, 10.0));

  node.revert();
  assert!(!node.has_unsaved_change());

  node.move_to(Point::new(12.4, 40.6));
  assert_eq!(node.persisted_record().x, Some(12));
  assert_eq!(node.persisted_record().y, Some(41));
  node.mark_saved(Point::new(12.0, 41.0));
  assert!(!node.has_unsaved_change());
}

#[test]
fn custom_grid_is_validated() {
  assert!(GridLayout::new(0.0, 5, 10.0).is_err());
  assert!(GridLayout::new(20.0, 0, 10.0).is_err());

  let wide = GridLayout::new(50.0, 2, 0.0).unwrap();
  let placed = wide.place(vec![Node::loose("a"), Node::loose("b"), Node::loose("c")]);
  assert_eq!(positions(&placed), vec![(0.0, 0.0), (50.0, 0.0), (0.0, 50.0)]);
}
