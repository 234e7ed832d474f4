//! Client for a paginated XML analytics feed service.
//!
//! [`AnalyticsSession`] is the entry point: it validates and serializes
//! report queries, fetches feeds through a [`Transport`], and decodes them
//! into [`DataSet`]s, [`Account`]s, and [`Segment`]s.

pub mod accounts;
pub mod classify;
pub mod error;
pub mod export;
pub mod feed;
pub mod model;
pub mod query;
pub mod report;
pub mod segments;
pub mod session;
pub mod transport;

pub use accounts::AccountDirectoryBuilder;
pub use classify::classify;
pub use error::{ClientError, TransportError, ValidationError};
pub use export::RowFormat;
pub use feed::FeedDocument;
pub use model::{Account, DataPoint, DataSet, Dimension, Goal, Metric, Segment};
pub use query::{QueryArgs, QueryBuilder};
pub use report::ReportResultDecoder;
pub use segments::SegmentCatalogBuilder;
pub use session::AnalyticsSession;
pub use transport::{HttpTransport, RawResponse, Transport};
