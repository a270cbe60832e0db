//! Option sources: where the form learns which options exist and how to parse them.
//!
//! The form never interprets a command line itself. It reads the declared options
//! once through [`OptionSource::groups`] and hands every assembled argument list
//! back to [`OptionSource::parse`], so mutual exclusion, ranges and required-ness
//! remain the parser's business.

mod descriptor;
pub use descriptor::*;

mod parsed;
pub use parsed::*;

mod clap_source;
pub use clap_source::*;

pub mod description;

/// A parser description that can be enumerated and replayed.
pub trait OptionSource {
    /// Declared option groups, in presentation order
    fn groups(&self) -> Vec<OptionGroup>;

    /// Parse an argument list (without the program name)
    fn parse(&self, arguments: &[String]) -> Result<ParsedResult, ParseRejected>;
}

impl<S: OptionSource + ?Sized> OptionSource for &S {
    fn groups(&self) -> Vec<OptionGroup> {
        (**self).groups()
    }

    fn parse(&self, arguments: &[String]) -> Result<ParsedResult, ParseRejected> {
        (**self).parse(arguments)
    }
}
