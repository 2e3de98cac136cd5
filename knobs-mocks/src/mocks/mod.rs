//! Built-in component mocks

mod button;
mod error_banner;
mod pill;
mod text_input;

pub use button::{button_mock, button_presets};
pub use error_banner::{error_banner_mock, error_banner_presets};
pub use pill::{pill_mock, pill_presets};
pub use text_input::{text_input_mock, text_input_presets};
