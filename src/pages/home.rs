use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;
use log::{error, info, warn};

use crate::components::biography_panel::BiographyPanel;
use crate::components::controls::{GraphControls, GraphHeader};
use crate::components::graph_canvas::GraphCanvas;
use crate::components::reference_modal::ReferenceModal;
use crate::components::timeline::Timeline;
use crate::config::GraphConfig;
use crate::data::Dataset;
use crate::view_state::{GraphViewState, ReferenceTarget};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let dataset = Dataset::bundled()
		.inspect(|d| {
			info!(
				"loaded {} persons, {} relationships",
				d.persons.len(),
				d.relationships.len()
			)
		})
		.inspect_err(|e| error!("bundled data is invalid: {e}"));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{dataset.map(|dataset| view! { <CompanionsGraph dataset=Arc::new(dataset) /> })}
		</ErrorBoundary>
	}
}

/// Graph, side panel, timeline and reference modal around one shared state.
#[component]
fn CompanionsGraph(dataset: Arc<Dataset>) -> impl IntoView {
	let config = GraphConfig::default();
	let timeline = dataset.timeline.clone();
	let transition_ms = config.transition_ms;
	let canvas_height = config.canvas_height;
	let state = RwSignal::new(GraphViewState::new(dataset, config));

	let scene = Memo::new(move |_| state.with(|s| s.scene().clone()));
	let focus = Signal::derive(move || state.with(|s| s.pending_center().map(str::to_owned)));
	let biography = Signal::derive(move || state.with(|s| s.selected_biography().cloned()));
	let category = Signal::derive(move || state.with(|s| s.selected_person().map(|p| p.category.clone())));
	let reference = Signal::derive(move || state.with(|s| s.reference().cloned()));

	// At most one center transition is in flight; a newer click clears the old timer.
	let transition = StoredValue::new(None::<TimeoutHandle>);
	on_cleanup(move || {
		if let Some(Some(handle)) = transition.try_get_value() {
			handle.clear();
		}
	});

	let on_node_click = Callback::new(move |id: String| {
		let Some(ticket) = state.try_update(|s| s.select_node(&id)) else {
			return;
		};
		if let Some(stale) = transition.try_update_value(Option::take).flatten() {
			stale.clear();
		}
		let settle_ticket = ticket.clone();
		let scheduled = set_timeout_with_handle(
			move || {
				let settled = state.try_update(|s| s.settle(&settle_ticket)).unwrap_or(false);
				if settled {
					// Keep the union on screen for one frame, then prune.
					request_animation_frame(move || state.update(GraphViewState::refresh));
				}
			},
			Duration::from_millis(transition_ms),
		);
		match scheduled {
			Ok(handle) => transition.set_value(Some(handle)),
			Err(_) => {
				warn!("could not schedule transition to {}", ticket.center());
				state.update(|s| {
					s.settle(&ticket);
					s.refresh();
				});
			}
		}
	});

	let toggle = move |f: fn(&mut GraphViewState)| Callback::new(move |()| state.update(f));
	let open_reference = Callback::new(move |target: ReferenceTarget| {
		state.update(|s| s.open_reference(target))
	});

	view! {
		<div class="w-full min-h-screen bg-calm-beige">
			<GraphHeader />
			<GraphControls
				suhbah=Signal::derive(move || state.with(|s| s.filter().suhbah))
				family=Signal::derive(move || state.with(|s| s.filter().family))
				drag=Signal::derive(move || state.with(|s| s.drag_enabled()))
				on_toggle_suhbah=toggle(GraphViewState::toggle_suhbah)
				on_toggle_family=toggle(GraphViewState::toggle_family)
				on_toggle_drag=toggle(GraphViewState::toggle_drag)
			/>

			<div class="relative">
				<div class="absolute left-4 top-4 z-10 text-xs text-gray-600 bg-white/90 border border-gray-200 rounded px-2 py-1 shadow">
					{move || scene.with(|s| format!("Nodes: {} • Edges: {}", s.nodes.len(), s.edges.len()))}
				</div>
				<div class="relative" style=format!("width: 100%; height: {canvas_height}px;")>
					<GraphCanvas
						data=scene
						focus=focus
						on_node_click=on_node_click
						transition_ms=transition_ms
						height=Some(canvas_height)
					/>
					<Show when=move || scene.with(|s| s.nodes.is_empty())>
						<div class="absolute inset-0 flex items-center justify-center text-sm text-gray-500">
							"No nodes to display."
						</div>
					</Show>
					<BiographyPanel
						biography=biography
						category=category
						on_close=toggle(GraphViewState::clear_selection)
						on_open_reference=open_reference
					/>
				</div>

				<Timeline events=timeline />
			</div>

			<ReferenceModal target=reference on_close=toggle(GraphViewState::close_reference) />
		</div>
	}
}
