//! Turn a command-line parser description into an interactive form.
//!
//! An [`OptionSource`](options::OptionSource) declares the options, a
//! [`FormDialog`](form::FormDialog) keeps one control per option in sync with the
//! assembled argument list, and a [`Surface`](surface::Surface) shows the form and
//! feeds user actions back in.

pub mod error;
pub mod form;
pub mod options;
pub mod surface;

pub use error::FormError;
pub use form::{build, DialogOutcome, DialogState, FormDialog, FormOptions};
pub use options::{ClapSource, OptionSource, ParsedResult};
