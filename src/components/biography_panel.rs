use leptos::ev;
use leptos::prelude::*;

use crate::data::Biography;
use crate::view_state::ReferenceTarget;

/// Side panel with the selected person's biography.
///
/// Renders nothing while `biography` is `None`.
#[component]
pub fn BiographyPanel(
	#[prop(into)] biography: Signal<Option<Biography>>,
	/// Category label of the selected person, when known.
	#[prop(into)] category: Signal<Option<String>>,
	on_close: Callback<()>,
	on_open_reference: Callback<ReferenceTarget>,
) -> impl IntoView {
	move || {
		biography.get().map(|bio| {
			let target = ReferenceTarget {
				name: bio.name.clone(),
				url: bio.reference_url.clone(),
			};
			let open_reference = move |_: ev::MouseEvent| on_open_reference.run(target.clone());

			view! {
				<div class="absolute right-0 top-0 w-80 h-full bg-white border-l border-gray-200 overflow-y-auto shadow-lg z-50">
					<div class="p-6">
						<button
							class="absolute top-4 right-4 text-gray-500 hover:text-gray-700"
							title="Close"
							on:click=move |_| on_close.run(())
						>
							"✕"
						</button>

						<div class="mb-4">
							<h2 class="text-2xl font-bold text-gray-800 mb-1">{bio.name}</h2>
							<p class="text-sm font-semibold text-prophet-gold">{bio.title}</p>
							{move || {
								category
									.get()
									.map(|c| {
										view! {
											<span class="inline-block mt-2 px-2 py-0.5 text-xs rounded bg-gray-100 text-gray-600 capitalize">
												{c}
											</span>
										}
									})
							}}
						</div>

						<div class="border-t border-gray-200 pt-4">
							<h3 class="text-sm font-bold text-gray-700 mb-3 uppercase tracking-wide">
								"Brief History"
							</h3>
							<p class="text-sm text-gray-600 leading-relaxed">{bio.history}</p>
						</div>

						<div class="mt-6 pt-4 border-t border-gray-200">
							<button
								class="inline-flex items-center gap-2 text-sm font-semibold text-blue-600 hover:text-blue-800 hover:underline"
								on:click=open_reference
							>
								"Read Full Biography →"
							</button>
						</div>
					</div>
				</div>
			}
		})
	}
}
