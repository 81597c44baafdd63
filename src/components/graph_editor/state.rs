use log::{debug, warn};

use crate::graph::{Annotation, EditorSession, NodeId, Point, parse_weight};

use super::types::{Mode, Prompt};

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
}

/// Everything the editor canvas owns: the session plus interaction state.
pub struct EditorState {
	pub session: EditorSession,
	pub mode: Mode,
	pub drag: DragState,
	pub info: String,
}

impl EditorState {
	pub fn new(session: EditorSession) -> Self {
		Self {
			session,
			mode: Mode::default(),
			drag: DragState::default(),
			info: String::from("Select an item"),
		}
	}

	pub fn set_mode(&mut self, mode: Mode) {
		self.mode = mode;
		self.session.select(None);
		self.drag = DragState::default();
		self.info = match mode {
			Mode::AddEdge => "Click node to start edge".into(),
			_ => "Select an item".into(),
		};
		debug!("Mode set to: {mode:?}");
	}

	fn label_of(&self, id: &NodeId) -> String {
		self.session
			.graph()
			.node(id)
			.map(|n| n.label.clone())
			.unwrap_or_else(|| id.to_string())
	}

	fn describe_selection(&mut self) {
		self.info = match self.session.selection().cloned() {
			Some(id) => format!("Node: {}", self.label_of(&id)),
			None => "Select an item".into(),
		};
	}

	/// Dispatches a primary-button press at `at` according to the current mode.
	pub fn press(&mut self, at: Point, prompt: &dyn Prompt) {
		let clicked = self.session.node_at(at);
		match self.mode {
			Mode::Move => {
				self.session.select(clicked.clone());
				self.drag = DragState {
					active: clicked.is_some(),
					node: clicked,
				};
				self.describe_selection();
			}
			Mode::AddNode => {
				if clicked.is_none() {
					let id = self.session.add_node(None, at);
					self.info = format!("Added node {id}");
				}
			}
			Mode::AddEdge => self.press_for_edge(clicked, prompt),
			Mode::AddText => {
				if let Some(text) = prompt.ask("Enter text:", "").filter(|t| !t.is_empty()) {
					self.session.add_annotation(Annotation::text(at, text));
				}
			}
			Mode::AddCircle => self.session.add_annotation(Annotation::circle(at)),
			Mode::AddArrow => self.session.add_annotation(Annotation::arrow(at)),
		}
	}

	fn press_for_edge(&mut self, clicked: Option<NodeId>, prompt: &dyn Prompt) {
		let Some(end) = clicked else {
			self.session.select(None);
			self.info = "Click node to start edge".into();
			return;
		};
		let Some(start) = self.session.selection().cloned() else {
			self.info = format!("Start Node: {}", self.label_of(&end));
			self.session.select(Some(end));
			return;
		};
		self.session.select(None);
		if start == end {
			self.info = "Select start node".into();
			return;
		}

		let weight = prompt
			.ask("Enter edge weight:", "1.0")
			.map_or(1.0, |w| parse_weight(&w));
		let label = prompt
			.ask("Enter edge label (optional):", "")
			.unwrap_or_default();
		self.info = match self.session.connect(start, end, weight, label) {
			Ok(()) => "Edge added".into(),
			Err(err) => {
				warn!("Could not add edge: {err}");
				err.to_string()
			}
		};
	}

	/// Follows the pointer while a node is held in move mode.
	pub fn drag_to(&mut self, at: Point) {
		if self.mode != Mode::Move || !self.drag.active {
			return;
		}
		if let Some(id) = self.drag.node.clone() {
			self.session.drag_to(&id, at);
		}
	}

	pub fn release(&mut self) {
		self.drag = DragState::default();
	}

	pub fn recolor_selected(&mut self, color: &str) {
		if let Some(id) = self.session.selection().cloned() {
			if let Err(err) = self.session.set_node_color(&id, color) {
				warn!("Could not recolor: {err}");
			}
		}
	}

	pub fn relabel_selected(&mut self, prompt: &dyn Prompt) {
		let Some(id) = self.session.selection().cloned() else {
			return;
		};
		let current = self.label_of(&id);
		if let Some(label) = prompt.ask("Enter new label:", &current) {
			if let Err(err) = self.session.set_node_label(&id, label) {
				warn!("Could not relabel: {err}");
			}
			self.describe_selection();
		}
	}

	pub fn delete_selected(&mut self) {
		if self.session.delete_selected().is_some() {
			self.drag = DragState::default();
			self.describe_selection();
		}
	}

	pub fn clear(&mut self) {
		self.session.clear();
		self.drag = DragState::default();
		self.describe_selection();
	}
}
