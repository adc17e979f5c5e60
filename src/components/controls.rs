use leptos::prelude::*;

/// Page header with the tier legend.
#[component]
pub fn GraphHeader() -> impl IntoView {
	view! {
		<div class="bg-white border-b border-gray-200 shadow-sm p-6">
			<h1 class="text-3xl font-bold text-gray-800 mb-1">"Companions Graph"</h1>
			<p class="text-gray-600 text-sm mb-4">"Mapping Exemplary Lives"</p>
			<div class="flex gap-6 text-xs flex-wrap">
				<LegendSwatch
					label="Center Node"
					style="border: 3px solid #d4af37; background: #fffbf0;"
				/>
				<LegendSwatch
					label="Level 1 (Direct)"
					style="border: 2px solid #1f2937; background: #ffffff;"
				/>
				<LegendSwatch
					label="Level 2 (Secondary)"
					style="border: 2px solid #a89a7e; background: #faf9f7;"
				/>
				<div class="text-gray-600 font-semibold">"Click a node to make it the center"</div>
			</div>
		</div>
	}
}

#[component]
fn LegendSwatch(label: &'static str, style: &'static str) -> impl IntoView {
	view! {
		<div class="flex items-center gap-2">
			<div class="w-6 h-6 rounded" style=style></div>
			<span class="font-semibold text-gray-700">{label}</span>
		</div>
	}
}

#[component]
fn ToggleBox(
	label: &'static str,
	#[prop(into)] checked: Signal<bool>,
	on_toggle: Callback<()>,
	#[prop(default = "accent-blue-600")] accent: &'static str,
	children: Children,
) -> impl IntoView {
	view! {
		<label class="flex items-center gap-2 cursor-pointer hover:bg-gray-50 px-3 py-2 rounded">
			<input
				type="checkbox"
				class=format!("w-4 h-4 {accent}")
				prop:checked=move || checked.get()
				on:change=move |_| on_toggle.run(())
			/>
			<span class="text-sm font-medium text-gray-700">{label}</span>
			{children()}
		</label>
	}
}

/// Relationship filters and the drag switch.
#[component]
pub fn GraphControls(
	#[prop(into)] suhbah: Signal<bool>,
	#[prop(into)] family: Signal<bool>,
	#[prop(into)] drag: Signal<bool>,
	on_toggle_suhbah: Callback<()>,
	on_toggle_family: Callback<()>,
	on_toggle_drag: Callback<()>,
) -> impl IntoView {
	let drag_badge = move || {
		if drag.get() {
			("ml-2 text-xs font-semibold px-2 py-1 rounded bg-blue-100 text-blue-700", "ON")
		} else {
			("ml-2 text-xs font-semibold px-2 py-1 rounded bg-gray-100 text-gray-600", "OFF")
		}
	};

	view! {
		<div class="bg-white border-b border-gray-200 px-6 py-4 flex gap-6 items-center justify-between flex-wrap">
			<div class="flex gap-6 items-center">
				<ToggleBox
					label="Companionship (Suhbah)"
					checked=suhbah
					on_toggle=on_toggle_suhbah
					accent="accent-prophet-gold"
				>
					<div class="w-3 h-3 bg-prophet-gold rounded-full opacity-60 ml-2"></div>
				</ToggleBox>
				<ToggleBox
					label="Family Relations"
					checked=family
					on_toggle=on_toggle_family
					accent="accent-family-green"
				>
					<div class="w-3 h-3 bg-family-green rounded-full opacity-50 ml-2"></div>
				</ToggleBox>
			</div>
			<ToggleBox label="Enable Drag Nodes" checked=drag on_toggle=on_toggle_drag>
				<span class=move || drag_badge().0>{move || drag_badge().1}</span>
			</ToggleBox>
		</div>
	}
}
