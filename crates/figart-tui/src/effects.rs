//! Side effects requested by the reducer.
//!
//! Rendering, clipboard writes and config writes only happen when the runtime
//! executes one of these. A superseded render is stopped through `CancelTask`.

use figart_core::config::ThemeName;
use figart_core::generator::RenderRequest;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::features::copy::CopyTarget;

#[derive(Debug)]
pub enum UiEffect {
    Quit,

    /// Render `request` in the background.
    RenderBanner {
        task: Option<TaskId>,
        request: RenderRequest,
    },

    /// Put `text` on the system clipboard.
    CopyToClipboard { target: CopyTarget, text: String },

    /// Save the theme to the config file.
    PersistTheme { theme: ThemeName },

    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
