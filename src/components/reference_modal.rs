use leptos::ev;
use leptos::prelude::*;

use crate::config::ModalConfig;
use crate::view_state::ReferenceTarget;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalSize {
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
	Right,
	Bottom,
	Corner,
}

/// A resize in progress, anchored where the pointer went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeDrag {
	pub handle: ResizeHandle,
	pub start_x: f64,
	pub start_y: f64,
	pub start: ModalSize,
}

impl ResizeDrag {
	/// Size for the pointer at `(x, y)`, never below the configured minimum.
	pub fn resized(&self, x: f64, y: f64, config: &ModalConfig) -> ModalSize {
		let width = (self.start.width + x - self.start_x).max(config.min_width);
		let height = (self.start.height + y - self.start_y).max(config.min_height);
		match self.handle {
			ResizeHandle::Right => ModalSize {
				width,
				height: self.start.height,
			},
			ResizeHandle::Bottom => ModalSize {
				width: self.start.width,
				height,
			},
			ResizeHandle::Corner => ModalSize { width, height },
		}
	}
}

/// Overlay that shows an external reference page in a sandboxed frame.
///
/// The frame may run scripts and open popups, but cannot navigate the top
/// window or reach this origin.
#[component]
pub fn ReferenceModal(
	#[prop(into)] target: Signal<Option<ReferenceTarget>>,
	on_close: Callback<()>,
	#[prop(optional)] config: ModalConfig,
) -> impl IntoView {
	let size = RwSignal::new(ModalSize {
		width: config.width,
		height: config.height,
	});
	let resizing = RwSignal::new(None::<ResizeDrag>);

	let begin = move |handle: ResizeHandle| {
		move |ev: ev::MouseEvent| {
			ev.prevent_default();
			resizing.set(Some(ResizeDrag {
				handle,
				start_x: ev.client_x() as f64,
				start_y: ev.client_y() as f64,
				start: size.get_untracked(),
			}));
		}
	};
	let on_mousemove = move |ev: ev::MouseEvent| {
		if let Some(drag) = resizing.get_untracked() {
			size.set(drag.resized(ev.client_x() as f64, ev.client_y() as f64, &config));
		}
	};
	let on_mouseup = move |_: ev::MouseEvent| resizing.set(None);

	move || {
		target.get().map(|target| {
			let ReferenceTarget { name, url } = target;
			let (frame_title, frame_url) = (format!("Reference article about {name}"), url.clone());
			view! {
				<div
					class="fixed inset-0 bg-black/50 z-50 flex items-center justify-center p-2"
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseup
				>
					<div
						class="bg-white rounded-lg shadow-2xl flex flex-col relative"
						style=move || {
							let s = size.get();
							format!(
								"width: {}px; height: {}px; max-width: 95vw; max-height: 95vh;",
								s.width,
								s.height,
							)
						}
					>
						<div class="flex justify-between items-center border-b border-gray-200 px-6 py-4 flex-shrink-0">
							<h2 class="text-2xl font-bold text-gray-800 truncate">{name}</h2>
							<button
								class="text-gray-500 hover:text-gray-700 text-2xl leading-none ml-4 flex-shrink-0"
								on:click=move |_| on_close.run(())
							>
								"✕"
							</button>
						</div>

						<div class="overflow-hidden flex-1">
							<iframe
								src=frame_url
								class="w-full h-full border-none"
								title=frame_title
								sandbox="allow-scripts allow-popups"
							></iframe>
						</div>

						<div class="border-t border-gray-200 px-6 py-4 flex justify-between items-center bg-gray-50 flex-shrink-0">
							<a
								href=url
								target="_blank"
								rel="noopener noreferrer"
								class="text-sm font-semibold text-blue-600 hover:text-blue-800 hover:underline"
							>
								"Open Full Page →"
							</a>
							<button
								class="px-4 py-2 bg-gray-200 hover:bg-gray-300 text-gray-800 font-medium rounded transition-colors"
								on:click=move |_| on_close.run(())
							>
								"Close"
							</button>
						</div>

						<div
							class="absolute right-0 top-0 bottom-0 w-1 cursor-col-resize hover:bg-blue-500 hover:w-2 transition-all"
							on:mousedown=begin(ResizeHandle::Right)
						></div>
						<div
							class="absolute left-0 right-0 bottom-0 h-1 cursor-row-resize hover:bg-blue-500 hover:h-2 transition-all"
							on:mousedown=begin(ResizeHandle::Bottom)
						></div>
						<div
							class="absolute bottom-0 right-0 w-4 h-4 cursor-nwse-resize"
							style="background: linear-gradient(135deg, transparent 50%, #3b82f6 50%);"
							on:mousedown=begin(ResizeHandle::Corner)
						></div>
					</div>
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn drag(handle: ResizeHandle) -> ResizeDrag {
		ResizeDrag {
			handle,
			start_x: 100.0,
			start_y: 100.0,
			start: ModalSize {
				width: 1200.0,
				height: 800.0,
			},
		}
	}

	#[test]
	fn right_edge_only_changes_width() {
		let size = drag(ResizeHandle::Right).resized(150.0, 300.0, &ModalConfig::default());
		assert_eq!(
			size,
			ModalSize {
				width: 1250.0,
				height: 800.0
			}
		);
	}

	#[test]
	fn bottom_edge_only_changes_height() {
		let size = drag(ResizeHandle::Bottom).resized(500.0, 50.0, &ModalConfig::default());
		assert_eq!(
			size,
			ModalSize {
				width: 1200.0,
				height: 750.0
			}
		);
	}

	#[test]
	fn corner_respects_minimums() {
		let size = drag(ResizeHandle::Corner).resized(-5000.0, -5000.0, &ModalConfig::default());
		assert_eq!(
			size,
			ModalSize {
				width: 400.0,
				height: 300.0
			}
		);
	}
}
