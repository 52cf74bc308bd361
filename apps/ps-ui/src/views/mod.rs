pub mod form_view;
pub mod results_view;
pub mod status_view;

pub use form_view::{FormActions, FormView};
pub use results_view::ResultsView;
pub use status_view::StatusView;
