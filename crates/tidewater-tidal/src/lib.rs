// SPDX-License-Identifier: GPL-3.0-or-later

//! TIDAL API client used to look up tracks and build playlists.
//!
//! The client never performs the interactive login itself: it is handed an
//! access token obtained out-of-band and turns it into a [`TidalSession`]
//! by validating it against the sessions endpoint.

pub mod client;
pub mod error;
pub mod models;

pub use client::{TidalClient, TidalClientBuilder, TidalSession};
pub use error::{Result, TidalError};
pub use models::{ArtistRef, Playlist, SearchPage, Session, TrackItem, UserHandle};
