use std::collections::HashSet;

use weighted_graph_editor::graph::{
	BulkRow, EditorConfig, EditorSession, NodeId, Point, RelaxParams, Scale, Template, Topology,
	distance, relax,
};

fn session() -> EditorSession {
	EditorSession::new(EditorConfig::default(), 800.0, 600.0, 42)
}

fn id(name: &str) -> NodeId {
	NodeId::from(name)
}

#[test]
fn weight_two_edge_calibrates_and_stretches() {
	let mut s = session();
	s.add_node(Some(id("A")), Point::new(300.0, 300.0));
	s.add_node(Some(id("B")), Point::new(310.0, 300.0));

	s.add_edge(id("A"), id("B"), 2.0, "").unwrap();
	assert_eq!(s.scale().pixels_per_unit(), Some(75.0));

	s.settle(1);

	let d = distance(s.position(&id("A")).unwrap(), s.position(&id("B")).unwrap());
	assert!((d - 150.0).abs() < 1e-9, "distance was {d}");
	assert_eq!(s.position(&id("A")), Some(Point::new(230.0, 300.0)));
	assert_eq!(s.position(&id("B")), Some(Point::new(380.0, 300.0)));
}

#[test]
fn repulsion_alone_separates_a_tight_cluster() {
	let mut s = session();
	s.add_node(Some(id("A")), Point::new(400.0, 300.0));
	s.add_node(Some(id("B")), Point::new(410.0, 302.0));
	s.add_node(Some(id("C")), Point::new(404.0, 311.0));
	let min_separation = s.config().min_separation();

	s.settle(200);

	let nodes = [id("A"), id("B"), id("C")];
	for (i, u) in nodes.iter().enumerate() {
		for v in &nodes[i + 1..] {
			let d = distance(s.position(u).unwrap(), s.position(v).unwrap());
			assert!(d >= min_separation - 1e-3, "{u} and {v} are only {d} apart");
		}
	}
}

#[test]
fn bulk_import_of_one_row() {
	let mut s = session();
	let rows = [BulkRow::new("X", "Y", "3", "link").unwrap()];

	s.load_bulk(&rows).unwrap();

	assert_eq!(s.graph().node_count(), 2);
	assert_eq!(s.graph().edge_count(), 1);
	let edge = s.graph().edge(&id("X"), &id("Y")).unwrap();
	assert_eq!(edge.weight, 3.0);
	assert_eq!(edge.label, "link");
	assert_eq!(s.scale().pixels_per_unit(), Some(50.0));
	assert_eq!(s.positions().len(), 2);
}

#[test]
fn bulk_import_dedupes_labels_and_coerces_weights() {
	let mut s = session();
	let rows = [
		BulkRow::new("X", "Y", "oops", "").unwrap(),
		BulkRow::new("Y", "Z", "4", "").unwrap(),
		BulkRow::new("Z", "X", "", "").unwrap(),
	];

	s.load_bulk(&rows).unwrap();

	let order: Vec<String> = s.graph().node_ids().map(ToString::to_string).collect();
	assert_eq!(order, ["X", "Y", "Z"]);
	assert_eq!(s.graph().edge(&id("X"), &id("Y")).unwrap().weight, 1.0);
	assert_eq!(s.scale().pixels_per_unit(), Some(150.0));
}

#[test]
fn bulk_import_replaces_previous_graph_and_scale() {
	let mut s = session();
	let a = s.add_node(None, Point::new(100.0, 100.0));
	let b = s.add_node(None, Point::new(300.0, 100.0));
	s.add_edge(a, b, 10.0, "").unwrap();

	s.load_bulk(&[BulkRow::new("P", "Q", "6", "").unwrap()]).unwrap();

	assert!(!s.graph().contains(&NodeId::Index(1)));
	assert_eq!(s.scale().pixels_per_unit(), Some(25.0));
}

#[test]
fn mapping_keeps_both_directions() {
	let mut s = session();
	let topology = Topology::from_json(r#"{"A": {"B": 1.0}, "B": {"A": 1.0}}"#).unwrap();

	s.load_topology(&topology).unwrap();

	assert_eq!(s.graph().node_count(), 2);
	assert_eq!(s.graph().edge_count(), 2);
	assert!(s.graph().has_edge(&id("A"), &id("B")));
	assert!(s.graph().has_edge(&id("B"), &id("A")));
	assert_eq!(s.scale().pixels_per_unit(), Some(150.0));
}

#[test]
fn mapping_adds_unlisted_neighbors() {
	let mut s = session();
	let topology = Topology::from_json(r#"{"hub": {"leaf": 2.0}}"#).unwrap();

	s.load_topology(&topology).unwrap();

	assert!(s.graph().contains(&id("leaf")));
	assert!(s.position(&id("leaf")).is_some());
	assert_eq!(s.scale().pixels_per_unit(), Some(75.0));
}

#[test]
fn templates_load_inside_bounds() {
	for template in Template::ALL {
		let mut s = session();
		s.load_template(template).unwrap();

		let margin = s.config().node_radius;
		assert_eq!(s.positions().len(), s.graph().node_count());
		for p in s.positions().values() {
			assert!(p.x >= margin && p.x <= 800.0 - margin);
			assert!(p.y >= margin && p.y <= 600.0 - margin);
		}
	}
}

#[test]
fn same_seed_same_layout() {
	let mut first = session();
	let mut second = session();
	first.load_template(Template::Nsfnet).unwrap();
	second.load_template(Template::Nsfnet).unwrap();
	assert_eq!(first.positions(), second.positions());
}

#[test]
fn drag_burst_never_moves_the_pinned_node() {
	let mut s = session();
	s.load_template(Template::Usa).unwrap();
	let dragged = id("Denver");
	let to = Point::new(12.25, -3.5);

	for _ in 0..10 {
		s.drag_to(&dragged, to);
		let p = s.position(&dragged).unwrap();
		assert_eq!(p.x.to_bits(), to.x.to_bits());
		assert_eq!(p.y.to_bits(), to.y.to_bits());
	}
}

#[test]
fn engine_is_usable_without_a_session() {
	let mut s = session();
	s.add_node(Some(id("A")), Point::new(100.0, 100.0));
	s.add_node(Some(id("B")), Point::new(130.0, 100.0));
	s.add_edge(id("A"), id("B"), 1.0, "").unwrap();

	let mut positions = s.positions().clone();
	let params = RelaxParams::for_canvas(s.config(), 800.0, 600.0);
	relax(
		s.graph(),
		&mut positions,
		Scale::fixed(150.0),
		&HashSet::from([id("A")]),
		1,
		&params,
	);

	assert_eq!(positions[&id("A")], Point::new(100.0, 100.0));
	// only the free end moves, closing half of the gap
	assert_eq!(positions[&id("B")], Point::new(190.0, 100.0));
}
