//! The TokenEstate application layer.
//!
//! [`ViewController`] owns the [`AppState`] and implements every user
//! action: wallet login and logout, browsing and filtering the market,
//! minting and editing listings, and buying shares through the payment flow.
//! External systems are reached only through traits, so the controller runs
//! the same against live services and against `estate-nullables`.

pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod geo;
pub mod notify;
pub mod state;

pub use config::{AppConfig, DataConfig, GeocoderConfig, WalletConfig};
pub use controller::{ViewController, DEMO_ACCOUNT, MAX_BUY_QUANTITY};
pub use error::AppError;
pub use forms::{ListingEdit, MintForm};
pub use geo::{Coordinates, GeoError, Geocoder, MapSession, OlaGeocoder};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use state::{AppState, View};
