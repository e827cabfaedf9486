// Scene source visibility action
//
// Lets a user pick an OBS scene, then one of that scene's sources, and show,
// hide or toggle it. The scene graph is read fresh on every pass; nothing is
// cached between calls. The remote side is reached through
// `RemoteStateClient`, which `obs_websocket::ObsClient` implements when the
// `obs` feature is enabled.

mod action;
mod error;
mod executor;
pub mod fields;
mod obs;
mod remote;
mod resolver;
mod snapshot;
mod stage;

pub use action::{Action, ActionHost, ActionIdentity, SourceVisibilityAction};
pub use error::{BoxError, Error, Result};
pub use executor::{execute, execute_command, RunOutcome, SkipReason};
pub use fields::{FieldDescriptor, FieldKind, FieldOption, FieldSet};
pub use remote::RemoteStateClient;
pub use resolver::resolve;
pub use snapshot::{fetch_scenes, fetch_sources_of, Scene, Snapshot, Source};
pub use stage::{Stage, UnrecognizedVisibilityMode, VisibilityCommand, VisibilityMode};
