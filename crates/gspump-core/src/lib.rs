//! Restore orchestration for gspump
//!
//! Walks a backup tree depth-first and pushes every object in the order
//! GeoServer needs them to exist:
//!
//! ```text
//! styles/*                      global styles
//! workspaces/{ws}/              workspace, then namespace
//!   datastores/{ds}/            datastore
//!     featuretypes/{ft}/        feature type, then its layer, then templates
//!     *.ftl                     datastore templates
//!   *.ftl                       workspace templates
//!   styles/*                    workspace styles
//! workspaces/*.ftl              global templates
//! ```
//!
//! Push failures reported by the server never stop the walk. Structural
//! problems (missing descriptor, malformed XML) do, unless
//! [`PumpOptions::keep_going`] is set.

pub mod error;
pub mod node;
pub mod pump;
pub mod report;
pub mod routes;

pub use error::{Error, Result};
pub use node::{ConfigNode, NodeKind};
pub use pump::{Pump, PumpOptions};
pub use report::{PumpReport, PushRecord, SkippedSubtree};
