//! The generator form: text, font and width fields.

mod render;
mod state;
mod update;

pub use render::{calculate_form_height, render_form};
pub use state::{CursorMove, Field, FormState, TextInput};
pub use update::{FormAction, handle_key, handle_paste};
