use leptos::prelude::*;
use leptos_router::components::A;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="w-full min-h-screen bg-calm-beige flex flex-col items-center justify-center gap-4">
			<h1 class="text-3xl font-bold text-gray-800">"Page not found"</h1>
			<A href="/" attr:class="text-sm font-semibold text-blue-600 hover:underline">
				"Back to the graph"
			</A>
		</div>
	}
}
