use thiserror::Error;

/// The registry calls the gateway knows how to make. Each carries the message
/// shown to the operator when the server rejects the call without a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    RegisterDonor,
    ListDonors,
    DeleteDonor,
    RecordDonation,
    FetchDonor,
    CheckEligibility,
}

impl ApiOperation {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::RegisterDonor => "Registration failed",
            Self::ListDonors => "Failed to load donors",
            Self::DeleteDonor => "Delete failed",
            Self::RecordDonation => "Failed to record donation",
            Self::FetchDonor => "Failed to load donor",
            Self::CheckEligibility => "Failed to check eligibility",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RegisterDonor => "register_donor",
            Self::ListDonors => "list_donors",
            Self::DeleteDonor => "delete_donor",
            Self::RecordDonation => "record_donation",
            Self::FetchDonor => "fetch_donor",
            Self::CheckEligibility => "donor_eligibility",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No usable server response: the transport failed or the body could not
    /// be decoded.
    #[error("{0}")]
    RequestFailed(String),
    /// The server answered with a non-success status.
    #[error("{0}")]
    ApiRejected(String),
}

impl GatewayError {
    pub(crate) fn transport(operation: ApiOperation, err: &reqwest::Error) -> Self {
        let detail = if err.is_connect() {
            "registry API unreachable"
        } else if err.is_decode() || err.is_body() {
            "malformed response body"
        } else {
            "request failed"
        };
        Self::RequestFailed(format!("{}: {detail}", operation.fallback_message()))
    }

    pub(crate) fn malformed_body(operation: ApiOperation, err: &serde_json::Error) -> Self {
        Self::RequestFailed(format!(
            "{}: malformed response body ({err})",
            operation.fallback_message()
        ))
    }

    pub(crate) fn rejected(operation: ApiOperation, reason: Option<&str>) -> Self {
        Self::ApiRejected(
            reason
                .unwrap_or_else(|| operation.fallback_message())
                .to_string(),
        )
    }

    /// Operator-facing text for this failure.
    pub fn message(&self) -> &str {
        match self {
            Self::RequestFailed(message) | Self::ApiRejected(message) => message,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ApiRejected(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid registry API url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("registry API url must start with http:// or https://, got '{scheme}'")]
    UnsupportedScheme { scheme: String },
}
