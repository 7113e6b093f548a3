// ── Country data source ──
//
// The controller talks to the registry through this trait so the list
// logic can be exercised against an in-memory stub.

use std::future::Future;

use terra_api::RegistryClient;

use crate::convert::{countries_from_raw, country_from_raw};
use crate::error::CoreError;
use crate::model::{Country, Region};

/// Read-only country lookups. An empty `Vec` means "no match".
pub trait CountrySource: Send + Sync {
    fn all(&self) -> impl Future<Output = Result<Vec<Country>, CoreError>> + Send;

    fn by_name(&self, query: &str) -> impl Future<Output = Result<Vec<Country>, CoreError>> + Send;

    fn by_region(
        &self,
        region: Region,
    ) -> impl Future<Output = Result<Vec<Country>, CoreError>> + Send;

    fn by_code(&self, code: &str) -> impl Future<Output = Result<Option<Country>, CoreError>> + Send;
}

impl CountrySource for RegistryClient {
    async fn all(&self) -> Result<Vec<Country>, CoreError> {
        Ok(countries_from_raw(self.list_all().await?))
    }

    async fn by_name(&self, query: &str) -> Result<Vec<Country>, CoreError> {
        Ok(countries_from_raw(self.search_by_name(query).await?))
    }

    async fn by_region(&self, region: Region) -> Result<Vec<Country>, CoreError> {
        Ok(countries_from_raw(
            self.filter_by_region(region.as_ref()).await?,
        ))
    }

    async fn by_code(&self, code: &str) -> Result<Option<Country>, CoreError> {
        Ok(RegistryClient::by_code(self, code)
            .await?
            .and_then(country_from_raw))
    }
}
