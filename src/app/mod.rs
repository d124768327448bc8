// Presentation helpers used by the CLI.

pub mod form;
pub mod report;
