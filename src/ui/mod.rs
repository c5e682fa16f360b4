//! Terminal presentation.
//!
//! - [`theme`] - Colors and status icons
//! - [`output`] - Warning sink and report rendering for the terminal

pub mod output;
pub mod theme;

pub use output::{render_constraints, render_report, render_result, TerminalSink};
pub use theme::{should_use_colors, DepcheckTheme};
