use leptos::prelude::*;

use super::state::EditorState;

/// What a click on the canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	/// Select and drag nodes.
	#[default]
	Move,
	/// Place a node on empty canvas.
	AddNode,
	/// Click a start node, then an end node.
	AddEdge,
	/// Place a text annotation.
	AddText,
	/// Place a circle annotation.
	AddCircle,
	/// Place an arrow annotation.
	AddArrow,
}

impl Mode {
	/// Modes in toolbar order.
	pub const ALL: [Mode; 6] = [
		Mode::Move,
		Mode::AddNode,
		Mode::AddEdge,
		Mode::AddText,
		Mode::AddCircle,
		Mode::AddArrow,
	];

	/// Toolbar caption.
	pub fn label(self) -> &'static str {
		match self {
			Mode::Move => "Move/Select",
			Mode::AddNode => "Add Node",
			Mode::AddEdge => "Add Edge",
			Mode::AddText => "+ Text",
			Mode::AddCircle => "+ Circle",
			Mode::AddArrow => "+ Arrow",
		}
	}
}

/// Source of free-form text answers, such as a modal browser prompt.
pub trait Prompt {
	/// Asks `message` with `default` prefilled; `None` when the user cancels.
	fn ask(&self, message: &str, default: &str) -> Option<String>;
}

/// Reactive mirror of the parts of [`EditorState`] shown outside the canvas.
#[derive(Clone, Copy)]
pub struct PanelSignals {
	pub mode: RwSignal<Mode>,
	pub info: RwSignal<String>,
	pub has_selection: RwSignal<bool>,
	pub bulk_open: RwSignal<bool>,
}

impl PanelSignals {
	pub fn new() -> Self {
		Self {
			mode: RwSignal::new(Mode::default()),
			info: RwSignal::new(String::from("Select an item")),
			has_selection: RwSignal::new(false),
			bulk_open: RwSignal::new(false),
		}
	}

	/// Copies the panel-visible state after a mutation.
	pub fn sync(&self, state: &EditorState) {
		self.mode.set(state.mode);
		self.info.set(state.info.clone());
		self.has_selection
			.set(state.session.selection().is_some());
	}
}
