//! FIGfont support for figart.
//!
//! Parses FIGfont 2 (`.flf`) files and renders text into FIGlet-style banners:
//! - `font`: header and FIGcharacter decoding
//! - `layout`: layout modes and the horizontal/vertical smushing rules
//! - `render`: the `Renderer` builder (width bounds, wrapping, alignment)
//! - `builtin`: fonts compiled into the binary

pub mod builtin;
pub mod font;
pub mod layout;
pub mod render;

pub use builtin::BuiltinFont;
pub use font::{Font, FontError, FontWarning, Hardblank, Header, HeaderError, PrintDirection};
pub use layout::{
    HorizontalLayout, HorizontalRule, LayoutDecodeError, LayoutMode, VerticalLayout, VerticalRule,
};
pub use render::{Alignment, RenderError, Renderer};
