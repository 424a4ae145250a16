//! Share domain entities.

pub mod link;
pub mod model;

pub use link::{AccessLink, PublicLink};
pub use model::{NewShare, Share, SharePermission, ShareTarget, ShareTargetKind};
