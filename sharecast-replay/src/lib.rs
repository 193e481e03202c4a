// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast with replay for sharecast producers.
//!
//! The crate is layered leaves first:
//!
//! | Type | Role |
//! |------|------|
//! | [`ReplayBuffer`] | bounded, windowed history of recent values |
//! | [`ConnectionController`] | at most one live upstream subscription per hub |
//! | [`MulticastHub`] | fans values out, replays history, applies the terminal policy |
//! | [`ShareReplay`] | owns the current hub and rebuilds it after teardown |
//!
//! Most users only need [`ShareReplayExt::share_replay`] or
//! [`ShareReplayExt::share_replay_with`].

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod config;
pub mod connection;
mod logging;
pub mod multicast_hub;
pub mod replay_buffer;
pub mod share_replay;

pub use self::config::ShareReplayConfig;
pub use self::connection::{ConnectionController, ConnectionStatus};
pub use self::multicast_hub::{MulticastHub, ObserverId, TerminalMarker};
pub use self::replay_buffer::{ReplayBuffer, Snapshot};
pub use self::share_replay::{ShareReplay, ShareReplayExt};
