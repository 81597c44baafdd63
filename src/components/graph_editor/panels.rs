use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::warn;

use crate::graph::{BulkRow, Template};

use super::component::{BrowserPrompt, EditorHandle, alert, with_state};
use super::export::export_png;
use super::types::{Mode, PanelSignals};

/// Mode switches and whole-graph actions.
pub fn toolbar(handle: EditorHandle, signals: PanelSignals) -> impl IntoView {
	let mode_buttons = Mode::ALL
		.into_iter()
		.map(|mode| {
			let handle = handle.clone();
			view! {
				<button
					class:active=move || signals.mode.get() == mode
					on:click=move |_| with_state(&handle, signals, |s| s.set_mode(mode))
				>
					{mode.label()}
				</button>
			}
		})
		.collect_view();

	let template_buttons = Template::ALL
		.into_iter()
		.map(|template| {
			let handle = handle.clone();
			view! {
				<button on:click=move |_| {
					with_state(&handle, signals, |s| {
						if let Err(err) = s.session.load_template(template) {
							alert(&err.to_string());
						}
					})
				}>{template.name()}</button>
			}
		})
		.collect_view();

	let (layout_handle, clear_handle, export_handle) =
		(handle.clone(), handle.clone(), handle);

	view! {
		<div class="graph-editor-toolbar">
			{mode_buttons}
			<button on:click=move |_| {
				with_state(&layout_handle, signals, |s| s.session.auto_layout())
			}>"Auto Layout"</button>
			<button
				class="bulk"
				on:click=move |_| signals.bulk_open.set(true)
			>"Bulk Input"</button>
			<span class="templates">"Templates: " {template_buttons}</span>
			<button on:click=move |_| with_state(&clear_handle, signals, |s| s.clear())>
				"Clear"
			</button>
			<button
				class="export"
				on:click=move |_| {
					if let Err(err) = export_png(&export_handle.borrow().session) {
						warn!("Export failed: {err:?}");
					}
				}
			>"Export PNG"</button>
		</div>
	}
}

/// Details and edits for the selected node.
pub fn properties_panel(handle: EditorHandle, signals: PanelSignals) -> impl IntoView {
	let no_selection = move || !signals.has_selection.get();
	let (color_handle, label_handle, delete_handle) = (handle.clone(), handle.clone(), handle);

	view! {
		<div class="graph-editor-properties">
			<h3>"Properties"</h3>
			<p>{move || signals.info.get()}</p>
			<label>
				"Change Color "
				<input
					type="color"
					disabled=no_selection
					on:change=move |ev| {
						let color = event_target_value(&ev);
						with_state(&color_handle, signals, |s| s.recolor_selected(&color));
					}
				/>
			</label>
			<button
				disabled=no_selection
				on:click=move |_| {
					with_state(&label_handle, signals, |s| s.relabel_selected(&BrowserPrompt))
				}
			>"Edit Label"</button>
			<button
				class="delete"
				disabled=no_selection
				on:click=move |_| with_state(&delete_handle, signals, |s| s.delete_selected())
			>"Delete"</button>
		</div>
	}
}

/// Table of `source -> target` connections turned into a fresh graph on Generate.
pub fn bulk_dialog(handle: EditorHandle, signals: PanelSignals) -> impl IntoView {
	let rows = RwSignal::new(Vec::<BulkRow>::new());
	let selected_row = RwSignal::new(None::<usize>);
	let (source, target, weight, label) = (
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
		RwSignal::new(String::new()),
	);

	let add_row = move |_: MouseEvent| {
		match BulkRow::new(
			&source.get_untracked(),
			&target.get_untracked(),
			&weight.get_untracked(),
			&label.get_untracked(),
		) {
			Ok(row) => {
				rows.update(|rows| rows.push(row));
				for input in [source, target, weight, label] {
					input.set(String::new());
				}
			}
			Err(err) => alert(&err.to_string()),
		}
	};

	let delete_row = move |_: MouseEvent| match selected_row.get_untracked() {
		Some(i) if i < rows.with_untracked(Vec::len) => {
			rows.update(|rows| {
				rows.remove(i);
			});
			selected_row.set(None);
		}
		_ => alert("Please select a row to delete."),
	};

	let generate = move |_: MouseEvent| {
		let table = rows.get_untracked();
		with_state(&handle, signals, |s| match s.session.load_bulk(&table) {
			Ok(()) => {
				s.info = format!("Generated graph from {} connections", table.len());
				signals.bulk_open.set(false);
			}
			Err(err) => alert(&err.to_string()),
		});
	};

	let table_rows = move || {
		rows.get()
			.into_iter()
			.enumerate()
			.map(|(i, row)| {
				view! {
					<tr
						class:selected=move || selected_row.get() == Some(i)
						on:click=move |_| selected_row.set(Some(i))
					>
						<td>{row.source}</td>
						<td>{row.target}</td>
						<td>{row.weight}</td>
						<td>{row.label}</td>
					</tr>
				}
			})
			.collect_view()
	};

	let field = move |name: &'static str, value: RwSignal<String>| {
		view! {
			<label>
				{name}
				<input
					type="text"
					prop:value=move || value.get()
					on:input=move |ev| value.set(event_target_value(&ev))
				/>
			</label>
		}
	};

	view! {
		<div
			class="graph-editor-bulk"
			style:display=move || if signals.bulk_open.get() { "block" } else { "none" }
		>
			<h3>"Bulk Graph Input"</h3>
			<p>"Enter connections (Source -> Target). Weight is optional (default 1)."</p>
			<table>
				<thead>
					<tr>
						<th>"Source Node"</th>
						<th>"Target Node"</th>
						<th>"Weight"</th>
						<th>"Label"</th>
					</tr>
				</thead>
				<tbody>{table_rows}</tbody>
			</table>
			<div class="inputs">
				{field("Source:", source)}
				{field("Target:", target)}
				{field("Weight:", weight)}
				{field("Label:", label)}
				<button on:click=add_row>"Add Row"</button>
			</div>
			<div class="actions">
				<button on:click=move |_| {
					rows.set(Vec::new());
					selected_row.set(None);
				}>"Clear Table"</button>
				<button class="delete" on:click=delete_row>"Delete Row"</button>
				<button on:click=move |_| signals.bulk_open.set(false)>"Cancel"</button>
				<button class="generate" on:click=generate>"Generate Graph"</button>
			</div>
		</div>
	}
}
