use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Donor, DonorId},
    error::ApiErrorBody,
    protocol::{Acknowledgement, DonationRecord, DonorRegistration, Eligibility},
};
use tracing::{debug, warn};

pub mod config;
pub mod error;
pub mod flows;
pub mod forms;
pub mod operator;
pub mod view;

pub use config::ApiConfig;
pub use error::{ApiOperation, ConfigError, GatewayError};
pub use operator::Operator;

/// Outbound calls to the registry API. One HTTP request per call, no retries.
#[async_trait]
pub trait RegistryGateway: Send + Sync {
    async fn register_donor(
        &self,
        payload: &DonorRegistration,
    ) -> Result<Acknowledgement, GatewayError>;
    async fn list_donors(&self) -> Result<Vec<Donor>, GatewayError>;
    async fn delete_donor(&self, donor_id: DonorId) -> Result<Acknowledgement, GatewayError>;
    async fn record_donation(
        &self,
        payload: &DonationRecord,
    ) -> Result<Acknowledgement, GatewayError>;
    async fn fetch_donor(&self, donor_id: DonorId) -> Result<Donor, GatewayError>;
    async fn donor_eligibility(&self, donor_id: DonorId) -> Result<Eligibility, GatewayError>;
}

/// HTTP implementation of [`RegistryGateway`].
pub struct RegistryClient {
    http: Client,
    config: ApiConfig,
}

impl RegistryClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        debug!(operation = operation.name(), "registry request");
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::transport(operation, &err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| GatewayError::transport(operation, &err))?;

        if !status.is_success() {
            let error_body = ApiErrorBody::from_body(&body);
            warn!(
                operation = operation.name(),
                status = status.as_u16(),
                reason = error_body.reason(),
                "registry rejected request"
            );
            return Err(GatewayError::rejected(operation, error_body.reason()));
        }

        serde_json::from_slice(&body).map_err(|err| GatewayError::malformed_body(operation, &err))
    }
}

#[async_trait]
impl RegistryGateway for RegistryClient {
    async fn register_donor(
        &self,
        payload: &DonorRegistration,
    ) -> Result<Acknowledgement, GatewayError> {
        let request = self
            .http
            .post(self.config.endpoint("/donors/register"))
            .json(payload);
        self.send_json(ApiOperation::RegisterDonor, request).await
    }

    async fn list_donors(&self) -> Result<Vec<Donor>, GatewayError> {
        let request = self.http.get(self.config.endpoint("/donors"));
        self.send_json(ApiOperation::ListDonors, request).await
    }

    async fn delete_donor(&self, donor_id: DonorId) -> Result<Acknowledgement, GatewayError> {
        let request = self
            .http
            .delete(self.config.endpoint(&format!("/donors/{donor_id}")));
        self.send_json(ApiOperation::DeleteDonor, request).await
    }

    async fn record_donation(
        &self,
        payload: &DonationRecord,
    ) -> Result<Acknowledgement, GatewayError> {
        let request = self
            .http
            .post(self.config.endpoint("/donations/record"))
            .json(payload);
        self.send_json(ApiOperation::RecordDonation, request).await
    }

    async fn fetch_donor(&self, donor_id: DonorId) -> Result<Donor, GatewayError> {
        let request = self
            .http
            .get(self.config.endpoint(&format!("/donors/{donor_id}")));
        self.send_json(ApiOperation::FetchDonor, request).await
    }

    async fn donor_eligibility(&self, donor_id: DonorId) -> Result<Eligibility, GatewayError> {
        let request = self
            .http
            .get(self.config.endpoint(&format!("/donors/{donor_id}/can-donate")));
        self.send_json(ApiOperation::CheckEligibility, request).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod flow_tests;
