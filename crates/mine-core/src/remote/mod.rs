//! Remote endpoints: releases listing, raw files and archives

pub mod fetcher;
pub mod query;

pub use fetcher::RemoteFetcher;
pub use query::VersionQuery;
