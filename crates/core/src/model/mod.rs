mod chapter;
mod ids;
mod module;
mod overview;
mod subchapter;

pub use ids::{ChapterId, ModuleId, ParseIdError, RawId, SubchapterId};

pub use chapter::Chapter;
pub use module::Module;
pub use overview::{ProgressEntry, ProgressOverview, RawPercent};
pub use subchapter::Subchapter;
