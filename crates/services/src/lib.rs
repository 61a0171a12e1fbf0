#![forbid(unsafe_code)]

pub mod assembler;
pub mod error;
pub mod module_view;
pub mod subchapter_view;

pub use assembler::TreeAssembler;
pub use error::{ModuleViewError, SubchapterViewError};
pub use module_view::{ModuleView, ModuleViewService};
pub use subchapter_view::{AdvanceOutcome, Destination, SubchapterFlowService, SubchapterView};
