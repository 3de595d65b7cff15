/// Network adapters for external API calls
mod package_index_client;

pub use package_index_client::PackageIndexClient;
