use leptos::ev;
use leptos::prelude::*;

use crate::data::TimelineEvent;

/// Slider position over a chronological event list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineCursor {
	index: usize,
	len: usize,
}

impl TimelineCursor {
	pub fn new(len: usize) -> Self {
		Self { index: 0, len }
	}

	pub fn index(&self) -> usize {
		self.index
	}

	/// Move to `index`, clamped to the last event.
	pub fn select(&mut self, index: usize) {
		self.index = index.min(self.len.saturating_sub(1));
	}

	/// Share of the track left of the thumb, in percent.
	pub fn progress_percent(&self) -> f64 {
		if self.len < 2 {
			return 0.0;
		}
		self.index as f64 / (self.len - 1) as f64 * 100.0
	}

	pub fn track_style(&self) -> String {
		let p = self.progress_percent();
		format!(
			"background: linear-gradient(to right, #d4af37 0%, #d4af37 {p}%, #e5e7eb {p}%, #e5e7eb 100%)"
		)
	}
}

/// Life timeline with a slider, event markers and a details card.
#[component]
pub fn Timeline(events: Vec<TimelineEvent>) -> impl IntoView {
	if events.is_empty() {
		return ().into_any();
	}
	let max = events.len() - 1;
	let cursor = RwSignal::new(TimelineCursor::new(events.len()));
	let events = StoredValue::new(events);
	let selected = move || events.with_value(|e| e[cursor.get().index()].clone());

	let on_input = move |evt: ev::Event| {
		if let Ok(index) = event_target_value(&evt).parse::<usize>() {
			cursor.update(|c| c.select(index));
		}
	};

	let markers = events.with_value(|e| {
		e.iter()
			.enumerate()
			.map(|(index, event)| {
				let is_selected = move || cursor.get().index() == index;
				view! {
					<button
						title=format!("{}: {}", event.title, event.description)
						class=move || {
							if is_selected() {
								"relative group transition-all opacity-100"
							} else {
								"relative group transition-all opacity-60 hover:opacity-80"
							}
						}
						on:click=move |_| cursor.update(|c| c.select(index))
					>
						<div class=move || {
							if is_selected() {
								"w-3 h-3 rounded-full cursor-pointer transition-all bg-prophet-gold ring-2 ring-prophet-gold ring-offset-2"
							} else {
								"w-3 h-3 rounded-full cursor-pointer transition-all bg-gray-400 hover:bg-prophet-gold"
							}
						}></div>
						<div class="absolute bottom-full mb-2 left-1/2 transform -translate-x-1/2 bg-gray-800 text-white text-xs px-2 py-1 rounded whitespace-nowrap opacity-0 group-hover:opacity-100 transition-opacity pointer-events-none">
							{event.year}
						</div>
					</button>
				}
			})
			.collect_view()
	});

	view! {
		<div class="bg-white border-t border-gray-200 p-6">
			<h2 class="text-xl font-bold text-gray-800 mb-4">"Prophet Muhammad's Life Timeline"</h2>

			<div class="mb-6">
				<div class="flex items-center gap-4 mb-4">
					<div class="flex-1">
						<input
							type="range"
							min="0"
							max=max.to_string()
							class="w-full h-2 bg-gray-200 rounded-lg appearance-none cursor-pointer accent-prophet-gold"
							style=move || cursor.get().track_style()
							prop:value=move || cursor.get().index().to_string()
							on:input=on_input
						/>
					</div>
					<span class="text-sm font-semibold text-gray-700 whitespace-nowrap">
						{move || {
							let event = selected();
							format!("{} CE (Age {})", event.year, event.age)
						}}
					</span>
				</div>
				<div class="flex justify-between px-0 mb-2">{markers}</div>
			</div>

			<div class="bg-gradient-to-br from-prophet-gold/5 to-family-green/5 rounded-lg p-6 border border-prophet-gold/20">
				<div class="mb-3">
					<h3 class="text-lg font-bold text-gray-800 mb-1">{move || selected().title}</h3>
					<p class="text-sm font-semibold text-prophet-gold">
						{move || {
							let event = selected();
							format!("{} CE • Age {}", event.year, event.age)
						}}
					</p>
				</div>
				<p class="text-gray-700 leading-relaxed">{move || selected().details}</p>
			</div>
		</div>
	}
	.into_any()
}
