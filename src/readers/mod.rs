pub mod erddap_client;
pub mod table_reader;

pub use erddap_client::ErddapClient;
pub use table_reader::{TableContainer, TableDocument, TableReader};
