//! Typed client for the FoxESS Cloud open API: power stations, inverters and their telemetry.
//!
//! ```no_run
//! # async fn run() -> Result<(), foxesscloud_rs::Error> {
//! use foxesscloud_rs::{Client, ClientConfig};
//! use foxesscloud_rs::model::GetPowerStationListOptions;
//!
//! let client = Client::new(ClientConfig::new("api-token", "my-app/1.0"));
//! let stations = client
//!     .power_stations()
//!     .list(&GetPowerStationListOptions::default())
//!     .await?;
//! for station in stations.items {
//!     println!("{} {}", station.station_id, station.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod model;
pub mod settings;

pub use api::response::{DataListResponse, ListResponse};
pub use api::{build_signature, Client, ClientConfig, Error, InverterService, PowerStationService};
