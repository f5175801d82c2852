pub mod panel;
pub mod view_model;

pub use panel::render_status_page;
pub use view_model::{build_status_page, Notice, StatusPage, StatusQuery};
