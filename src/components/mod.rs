pub mod biography_panel;
pub mod controls;
pub mod graph_canvas;
pub mod reference_modal;
pub mod timeline;
